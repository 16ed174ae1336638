// crates/pillbox-verifier/src/probes/status.rs
// ============================================================================
// Module: Status Resource Probes
// Description: GET and POST checks against `/api/status`.
// Purpose: Verify status checks can be listed and created.
// Dependencies: reqwest, serde_json
// ============================================================================

//! ## Overview
//! [`StatusGetProbe`] lists status checks and requires a 200 JSON response.
//! [`StatusPostProbe`] creates one and requires the record to echo the
//! submitted client name alongside an `id` and a `timestamp`.

use std::io::Write;

use reqwest::Method;
use serde_json::Value;
use serde_json::json;

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

/// Client name submitted by [`StatusPostProbe`] by default.
pub const TEST_CLIENT_NAME: &str = "Virtual Pillbox Test Client";

/// Fields a created status check must carry.
pub const REQUIRED_FIELDS: [&str; 3] = ["id", "client_name", "timestamp"];

/// Path of the status resource under the API root.
const STATUS_PATH: &str = "/status";

// ============================================================================
// SECTION: GET
// ============================================================================

/// GET `{api}/status`; passes on status 200 with a JSON body.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusGetProbe;

impl Probe for StatusGetProbe {
    fn id(&self) -> &'static str {
        "status_get"
    }

    fn name(&self) -> String {
        t!("probe.status_get.name")
    }

    fn run(&self, ctx: &ProbeContext<'_>, out: &mut dyn Write) -> ProbeOutcome {
        emit(out, &t!("probe.status_get.start"));
        let request =
            ProbeRequest::new(Method::GET, ctx.api_url(STATUS_PATH), ctx.timeout(REQUEST_TIMEOUT));
        let outcome: ProbeOutcome = ctx
            .send(&request)
            .and_then(|response| {
                emit_response(out, &response);
                evaluate_listed(&response)
            })
            .into();
        conclude(out, &self.name(), outcome)
    }
}

// ============================================================================
// SECTION: POST
// ============================================================================

/// POST `{api}/status` with a client name; the created record must echo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPostProbe {
    /// Client name submitted and expected back.
    pub client_name: String,
}

impl Default for StatusPostProbe {
    fn default() -> Self {
        Self {
            client_name: TEST_CLIENT_NAME.to_string(),
        }
    }
}

impl Probe for StatusPostProbe {
    fn id(&self) -> &'static str {
        "status_post"
    }

    fn name(&self) -> String {
        t!("probe.status_post.name")
    }

    fn run(&self, ctx: &ProbeContext<'_>, out: &mut dyn Write) -> ProbeOutcome {
        emit(out, &t!("probe.status_post.start"));
        let request =
            ProbeRequest::new(Method::POST, ctx.api_url(STATUS_PATH), ctx.timeout(REQUEST_TIMEOUT))
                .json(json!({ "client_name": self.client_name }));
        let outcome: ProbeOutcome = ctx
            .send(&request)
            .and_then(|response| {
                emit_response(out, &response);
                evaluate_created(&response, &self.client_name)
            })
            .into();
        conclude(out, &self.name(), outcome)
    }
}

/// Checks status 200 and a JSON body; the body's shape is not inspected.
///
/// # Errors
///
/// Returns [`ProbeFailure`] for a non-200 status or a non-JSON body.
pub fn evaluate_listed(response: &ProbeResponse) -> Result<(), ProbeFailure> {
    expect_status(response, 200)?;
    response.json().map(|_| ()).map_err(|err| ProbeFailure::InvalidJson(err.to_string()))
}

/// Checks status 200, the required fields, and the echoed client name.
///
/// # Errors
///
/// Returns [`ProbeFailure`] for a non-200 status, a non-JSON body, missing
/// fields, or a client name that differs from `client_name`.
pub fn evaluate_created(response: &ProbeResponse, client_name: &str) -> Result<(), ProbeFailure> {
    expect_status(response, 200)?;
    let body = response.json().map_err(|err| ProbeFailure::InvalidJson(err.to_string()))?;
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| body.get(**field).is_none())
        .map(|field| (*field).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ProbeFailure::MissingFields(missing));
    }
    match body.get("client_name") {
        Some(Value::String(echoed)) if echoed == client_name => Ok(()),
        other => Err(ProbeFailure::Mismatch {
            field: "client_name".to_string(),
            expected: client_name.to_string(),
            actual: other.map_or_else(|| Value::Null.to_string(), Value::to_string),
        }),
    }
}
