// crates/pillbox-verifier/src/probes/cors.rs
// ============================================================================
// Module: CORS Headers Probe
// Description: Sends a CORS preflight to the API root.
// Purpose: Verify the backend advertises allowed origins and methods.
// Dependencies: reqwest
// ============================================================================

//! ## Overview
//! The preflight uses the backend URL itself as `Origin`. Only
//! `Access-Control-Allow-Origin` and `Access-Control-Allow-Methods` are
//! required; `Access-Control-Allow-Credentials` is reported but not checked.
//! The response status is not checked.

use std::io::Write;

use reqwest::Method;

use super::Probe;
use super::ProbeContext;
use super::ProbeFailure;
use super::ProbeOutcome;
use super::REQUEST_TIMEOUT;
use super::conclude;
use super::emit;
use crate::client::ProbeRequest;
use crate::client::ProbeResponse;
use crate::t;

/// Allowed-origin response header.
pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
/// Allowed-methods response header.
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
/// Allow-credentials response header (diagnostic only).
pub const ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";

/// Headers that must be present and non-empty.
const REQUIRED_HEADERS: [&str; 2] = [ALLOW_ORIGIN, ALLOW_METHODS];

/// OPTIONS `{api}/` preflight.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorsHeadersProbe;

impl Probe for CorsHeadersProbe {
    fn id(&self) -> &'static str {
        "cors_headers"
    }

    fn name(&self) -> String {
        t!("probe.cors.name")
    }

    fn run(&self, ctx: &ProbeContext<'_>, out: &mut dyn Write) -> ProbeOutcome {
        emit(out, &t!("probe.cors.start"));
        let request =
            ProbeRequest::new(Method::OPTIONS, ctx.api_url("/"), ctx.timeout(REQUEST_TIMEOUT))
                .header("Origin", ctx.config.base_url.as_str())
                .header("Access-Control-Request-Method", "GET");
        let outcome: ProbeOutcome = ctx
            .send(&request)
            .and_then(|response| {
                emit(out, &describe(&response));
                evaluate(&response)
            })
            .into();
        conclude(out, &self.name(), outcome)
    }
}

/// Requires non-empty allow-origin and allow-methods headers.
///
/// # Errors
///
/// Returns [`ProbeFailure::MissingHeaders`] naming every absent or empty header.
pub fn evaluate(response: &ProbeResponse) -> Result<(), ProbeFailure> {
    let missing: Vec<String> = REQUIRED_HEADERS
        .iter()
        .filter(|name| response.header(name).is_none_or(str::is_empty))
        .map(|name| (*name).to_string())
        .collect();
    if missing.is_empty() { Ok(()) } else { Err(ProbeFailure::MissingHeaders(missing)) }
}

/// Renders the CORS header diagnostic line.
fn describe(response: &ProbeResponse) -> String {
    let absent = t!("probe.diag.header_absent");
    let value = |name: &str| response.header(name).unwrap_or(absent.as_str()).to_string();
    t!(
        "probe.diag.cors_headers",
        origin = value(ALLOW_ORIGIN),
        methods = value(ALLOW_METHODS),
        credentials = value(ALLOW_CREDENTIALS),
    )
}
