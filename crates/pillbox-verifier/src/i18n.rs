// crates/pillbox-verifier/src/i18n.rs
// ============================================================================
// Module: Verifier Internationalization Helpers
// Description: Provides message catalog and translation utilities for the verifier.
// Purpose: Centralize user-facing strings for probe diagnostics and summaries.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! Every line the verifier prints is looked up in a small translation catalog
//! and formatted through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported output locales.
///
/// # Invariants
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_', '.']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "ca" => Some(Self::Ca),
            _ => None,
        }
    }
}

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"status"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for verifier output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the output locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current output locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "pillbox-verifier {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("client.init_failed", "Failed to initialize HTTP client: {error}"),
    ("report.render_failed", "Failed to render JSON report: {error}"),
    ("banner.testing", "Testing backend at: {url}"),
    ("banner.start", "🚀 Starting Virtual Pillbox Backend API Tests"),
    ("banner.backend_url", "Backend URL: {url} (source: {source})"),
    ("banner.api_base_url", "API Base URL: {url}"),
    ("probe.health.name", "Backend Health"),
    ("probe.health.start", "🔍 Testing overall backend health..."),
    ("probe.connectivity.name", "Basic Connectivity"),
    ("probe.connectivity.start", "🔍 Testing basic API connectivity..."),
    ("probe.cors.name", "CORS Headers"),
    ("probe.cors.start", "🔍 Testing CORS headers..."),
    ("probe.status_get.name", "GET Status Endpoint"),
    ("probe.status_get.start", "🔍 Testing GET /api/status endpoint..."),
    ("probe.status_post.name", "POST Status Endpoint"),
    ("probe.status_post.start", "🔍 Testing POST /api/status endpoint..."),
    ("probe.diag.root_status", "Backend root status: {status}"),
    ("probe.diag.status_code", "Status Code: {status}"),
    ("probe.diag.response", "Response: {body}"),
    (
        "probe.diag.cors_headers",
        "CORS Headers: Access-Control-Allow-Origin={origin}, \
         Access-Control-Allow-Methods={methods}, Access-Control-Allow-Credentials={credentials}",
    ),
    ("probe.diag.header_absent", "<absent>"),
    ("probe.passed", "✅ {name} test PASSED"),
    ("probe.failed", "❌ {name} test FAILED - {reason}"),
    ("probe.panicked", "❌ {name} FAILED with exception: {error}"),
    ("summary.header", "📊 TEST SUMMARY"),
    ("summary.line.passed", "{name}: ✅ PASSED"),
    ("summary.line.failed", "{name}: ❌ FAILED"),
    ("summary.overall", "Overall: {passed}/{total} tests passed"),
    ("summary.all_passed", "🎉 All backend tests PASSED! Backend is healthy and working properly."),
    ("summary.some_failed", "⚠️  Some backend tests FAILED. Check the details above."),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    ("i18n.lang.read_failed", "Failed to read {env}: {error}"),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Static Catalan catalog entries.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "pillbox-verifier {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("config.load_failed", "No s'ha pogut carregar la configuració: {error}"),
    ("client.init_failed", "No s'ha pogut inicialitzar el client HTTP: {error}"),
    ("report.render_failed", "No s'ha pogut generar l'informe JSON: {error}"),
    ("banner.testing", "Provant el backend a: {url}"),
    ("banner.start", "🚀 Iniciant les proves de l'API del backend de Virtual Pillbox"),
    ("banner.backend_url", "URL del backend: {url} (origen: {source})"),
    ("banner.api_base_url", "URL base de l'API: {url}"),
    ("probe.health.name", "Salut del backend"),
    ("probe.health.start", "🔍 Provant la salut general del backend..."),
    ("probe.connectivity.name", "Connectivitat bàsica"),
    ("probe.connectivity.start", "🔍 Provant la connectivitat bàsica de l'API..."),
    ("probe.cors.name", "Capçaleres CORS"),
    ("probe.cors.start", "🔍 Provant les capçaleres CORS..."),
    ("probe.status_get.name", "Endpoint GET d'estat"),
    ("probe.status_get.start", "🔍 Provant l'endpoint GET /api/status..."),
    ("probe.status_post.name", "Endpoint POST d'estat"),
    ("probe.status_post.start", "🔍 Provant l'endpoint POST /api/status..."),
    ("probe.diag.root_status", "Estat de l'arrel del backend: {status}"),
    ("probe.diag.status_code", "Codi d'estat: {status}"),
    ("probe.diag.response", "Resposta: {body}"),
    (
        "probe.diag.cors_headers",
        "Capçaleres CORS: Access-Control-Allow-Origin={origin}, \
         Access-Control-Allow-Methods={methods}, Access-Control-Allow-Credentials={credentials}",
    ),
    ("probe.diag.header_absent", "<absent>"),
    ("probe.passed", "✅ Prova {name} SUPERADA"),
    ("probe.failed", "❌ Prova {name} FALLIDA - {reason}"),
    ("probe.panicked", "❌ {name} FALLIDA amb excepció: {error}"),
    ("summary.header", "📊 RESUM DE LES PROVES"),
    ("summary.line.passed", "{name}: ✅ SUPERADA"),
    ("summary.line.failed", "{name}: ❌ FALLIDA"),
    ("summary.overall", "Total: {passed}/{total} proves superades"),
    (
        "summary.all_passed",
        "🎉 Totes les proves del backend SUPERADES! El backend funciona correctament.",
    ),
    ("summary.some_failed", "⚠️  Algunes proves del backend han FALLAT. Reviseu els detalls."),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    ("i18n.lang.read_failed", "No s'ha pogut llegir {env}: {error}"),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CATALOG_CA_MAP.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    translate_for(current_locale(), key, args)
}

/// Translates `key` for an explicit locale while substituting `args`.
#[must_use]
pub fn translate_for(locale: Locale, key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }
    substitute(template, &args)
}

/// Replaces `{key}` placeholders in a single pass over `template`.
///
/// Substituted values are never rescanned, so a value containing `{other}`
/// is emitted verbatim. Unknown placeholders are kept as written.
fn substitute(template: &str, args: &[MessageArg]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        result.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let matched = after.find('}').and_then(|end| {
            let name = &after[..end];
            args.iter().find(|arg| arg.key == name).map(|arg| (end, arg.value.as_str()))
        });
        match matched {
            Some((end, value)) => {
                result.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
