// crates/pillbox-config/tests/env_file_properties.rs
// ============================================================================
// Module: Env File Property Tests
// Description: Property coverage for env file parsing and base URL fallback.
// Purpose: Ensure the fallback chain holds for arbitrary surrounding content.
// Dependencies: pillbox-config, proptest, tempfile
// ============================================================================

//! ## Overview
//! Properties:
//! - Files without the backend key always resolve to the default URL.
//! - Files with the key resolve to its value with surrounding quotes removed,
//!   even when that value is empty.
//! - Parsing never panics on arbitrary input.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use pillbox_config::BACKEND_URL_KEY;
use pillbox_config::DEFAULT_BACKEND_URL;
use pillbox_config::EnvFile;
use pillbox_config::resolve_base_url;
use proptest::prelude::*;

// ============================================================================
// SECTION: Strategies
// ============================================================================

/// Lines that never define the backend key.
fn unrelated_line() -> impl Strategy<Value = String> {
    // Keys are capped below the backend key's length so they can never collide.
    prop_oneof![Just(String::new()), "#[ -~]{0,30}", "[A-Z_]{1,12}=[ -~]{0,20}", "[a-z ]{1,20}",]
}

/// URL-ish values without quote characters or surrounding whitespace, including empty.
fn url_value() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        8 => "https?://[a-z0-9.-]{1,20}(:[0-9]{2,5})?(/[a-z0-9]{0,8})?",
    ]
}

/// Optional quote wrapping applied to a value.
fn quoting() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop_oneof![Just(("", "")), Just(("\"", "\"")), Just(("'", "'")), Just(("\"", "")),]
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn files_without_key_resolve_to_default(lines in prop::collection::vec(unrelated_line(), 0..12)) {
        let env = EnvFile::parse(&lines.join("\n"));
        prop_assert_eq!(resolve_base_url(&env), DEFAULT_BACKEND_URL);
    }

    #[test]
    fn key_value_resolves_with_quotes_stripped(
        before in prop::collection::vec(unrelated_line(), 0..6),
        after in prop::collection::vec(unrelated_line(), 0..6),
        value in url_value(),
        (open, close) in quoting(),
    ) {
        let mut lines = before;
        lines.push(format!("{BACKEND_URL_KEY}={open}{value}{close}"));
        lines.extend(after);
        let env = EnvFile::parse(&lines.join("\n"));
        prop_assert_eq!(resolve_base_url(&env), value);
    }

    #[test]
    fn parse_accepts_arbitrary_text(text in any::<String>()) {
        let env = EnvFile::parse(&text);
        prop_assert!(env.len() <= text.lines().count());
    }
}

// ============================================================================
// SECTION: File Loading
// ============================================================================

#[test]
fn loading_from_disk_matches_parsing_text() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(".env");
    let text = "# frontend env\nEXPO_PUBLIC_BACKEND_URL=\"http://127.0.0.1:9000\"\nEXPO_OTHER=1\n";
    std::fs::write(&path, text).expect("write env file");
    let loaded = EnvFile::load(&path).expect("load env file");
    assert_eq!(loaded, EnvFile::parse(text));
    assert_eq!(resolve_base_url(&loaded), "http://127.0.0.1:9000");
}

#[test]
fn empty_quoted_value_resolves_empty() {
    let env = EnvFile::parse(&format!("{BACKEND_URL_KEY}=\"\"\n"));
    assert_eq!(resolve_base_url(&env), "");
}

#[test]
fn missing_file_resolves_to_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let loaded = EnvFile::load(&dir.path().join("nope.env")).expect("missing is tolerated");
    assert_eq!(resolve_base_url(&loaded), DEFAULT_BACKEND_URL);
}
