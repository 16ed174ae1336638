// crates/pillbox-verifier/src/probes/connectivity.rs
// ============================================================================
// Module: Basic Connectivity Probe
// Description: Checks the API root greeting.
// Purpose: Verify `GET /api/` returns `{"message": "Hello World"}`.
// Dependencies: reqwest, serde_json
// ============================================================================

//! ## Overview
//! Requires status 200 and a JSON body whose `message` is exactly
//! [`EXPECTED_MESSAGE`].

use std::io::Write;

use reqwest::Method;
use serde_json::Value;

use super::Probe;
use super::ProbeContext;
use super::ProbeFailure;
use super::ProbeOutcome;
use super::REQUEST_TIMEOUT;
use super::conclude;
use super::emit;
use super::emit_response;
use super::expect_status;
use crate::client::ProbeRequest;
use crate::client::ProbeResponse;
use crate::t;

/// Greeting the API root must return.
pub const EXPECTED_MESSAGE: &str = "Hello World";

/// GET `{api}/` expecting status 200 and the greeting message.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicConnectivityProbe;

impl Probe for BasicConnectivityProbe {
    fn id(&self) -> &'static str {
        "basic_connectivity"
    }

    fn name(&self) -> String {
        t!("probe.connectivity.name")
    }

    fn run(&self, ctx: &ProbeContext<'_>, out: &mut dyn Write) -> ProbeOutcome {
        emit(out, &t!("probe.connectivity.start"));
        let request = ProbeRequest::new(Method::GET, ctx.api_url("/"), ctx.timeout(REQUEST_TIMEOUT));
        let outcome: ProbeOutcome = ctx
            .send(&request)
            .and_then(|response| {
                emit_response(out, &response);
                evaluate(&response)
            })
            .into();
        conclude(out, &self.name(), outcome)
    }
}

/// Checks status 200 and `message == "Hello World"`.
///
/// # Errors
///
/// Returns [`ProbeFailure`] for a non-200 status, a non-JSON body, or a
/// missing or different message.
pub fn evaluate(response: &ProbeResponse) -> Result<(), ProbeFailure> {
    expect_status(response, 200)?;
    let body = response.json().map_err(|err| ProbeFailure::InvalidJson(err.to_string()))?;
    match body.get("message") {
        Some(Value::String(message)) if message == EXPECTED_MESSAGE => Ok(()),
        other => Err(ProbeFailure::UnexpectedMessage {
            actual: other.map_or_else(|| Value::Null.to_string(), Value::to_string),
        }),
    }
}
