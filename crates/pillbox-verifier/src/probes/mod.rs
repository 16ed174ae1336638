// crates/pillbox-verifier/src/probes/mod.rs
// ============================================================================
// Module: Backend Probes
// Description: Probe trait, outcomes, and the fixed probe sequence.
// Purpose: Turn one HTTP exchange into a tagged pass/fail outcome.
// Dependencies: pillbox-config, reqwest, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A probe performs exactly one HTTP call, writes human-readable diagnostics,
//! and returns a [`ProbeOutcome`]. Probes never return errors: every failure
//! becomes [`ProbeOutcome::Failed`] with a typed [`ProbeFailure`].
//!
//! Each probe splits into request construction and a pure `evaluate`
//! function over the captured [`ProbeResponse`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod connectivity;
pub mod cors;
pub mod health;
pub mod status;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::time::Duration;

use pillbox_config::VerifierConfig;
use thiserror::Error;

use crate::client::ClientError;
use crate::client::ProbeClient;
use crate::client::ProbeRequest;
use crate::client::ProbeResponse;
use crate::t;

pub use connectivity::BasicConnectivityProbe;
pub use cors::CorsHeadersProbe;
pub use health::BackendHealthProbe;
pub use status::StatusGetProbe;
pub use status::StatusPostProbe;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Timeout for the backend root health request.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for every API request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Reason a probe failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] ClientError),
    /// The response status was not the expected one.
    #[error("status code {0}")]
    Status(u16),
    /// The body could not be decoded as JSON.
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    /// The `message` field did not carry the expected greeting.
    #[error("unexpected response message: {actual}")]
    UnexpectedMessage {
        /// Rendered `message` value (`null` when absent).
        actual: String,
    },
    /// Required response headers were absent or empty.
    #[error("missing required CORS headers: {}", .0.join(", "))]
    MissingHeaders(Vec<String>),
    /// Required response fields were absent.
    #[error("missing required fields in response: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    /// A response field did not echo the submitted value.
    #[error("{field} mismatch: expected {expected}, got {actual}")]
    Mismatch {
        /// Field name.
        field: String,
        /// Submitted value.
        expected: String,
        /// Returned value.
        actual: String,
    },
    /// The probe panicked and was stopped by the runner.
    #[error("probe panicked: {0}")]
    Panicked(String),
}

/// Tagged result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The backend honored the contract.
    Passed,
    /// The backend violated the contract or was unreachable.
    Failed(ProbeFailure),
}

impl ProbeOutcome {
    /// Returns true for [`ProbeOutcome::Passed`].
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&ProbeFailure> {
        match self {
            Self::Passed => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

impl From<Result<(), ProbeFailure>> for ProbeOutcome {
    fn from(result: Result<(), ProbeFailure>) -> Self {
        match result {
            Ok(()) => Self::Passed,
            Err(failure) => Self::Failed(failure),
        }
    }
}

// ============================================================================
// SECTION: Probe Trait
// ============================================================================

/// Shared inputs handed to every probe.
#[derive(Debug, Clone, Copy)]
pub struct ProbeContext<'a> {
    /// Resolved configuration.
    pub config: &'a VerifierConfig,
    /// HTTP client.
    pub client: &'a ProbeClient,
}

impl ProbeContext<'_> {
    /// Returns `{api_base_url}{path}`.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_base_url())
    }

    /// Applies the configured timeout floor.
    #[must_use]
    pub fn timeout(&self, requested: Duration) -> Duration {
        self.config.effective_timeout(requested)
    }

    /// Sends a request, converting transport failures into [`ProbeFailure`].
    ///
    /// # Errors
    ///
    /// Returns [`ProbeFailure::Transport`] when no response is received.
    pub fn send(&self, request: &ProbeRequest) -> Result<ProbeResponse, ProbeFailure> {
        Ok(self.client.send(request)?)
    }
}

/// A single contract check against the backend.
pub trait Probe {
    /// Stable identifier used in machine-readable reports.
    fn id(&self) -> &'static str;

    /// Localized display name.
    fn name(&self) -> String;

    /// Runs the probe, writing diagnostics to `out`.
    fn run(&self, ctx: &ProbeContext<'_>, out: &mut dyn Write) -> ProbeOutcome;
}

/// Returns the probes in their fixed execution order.
#[must_use]
pub fn default_probes() -> Vec<Box<dyn Probe>> {
    vec![
        Box::new(BackendHealthProbe),
        Box::new(BasicConnectivityProbe),
        Box::new(CorsHeadersProbe),
        Box::new(StatusGetProbe),
        Box::new(StatusPostProbe::default()),
    ]
}

// ============================================================================
// SECTION: Diagnostics
// ============================================================================

/// Writes one diagnostic line. Diagnostic output is best-effort.
pub fn emit(out: &mut dyn Write, line: &str) {
    let _ = writeln!(out, "{line}");
}

/// Writes the status code and rendered body of a response.
pub(crate) fn emit_response(out: &mut dyn Write, response: &ProbeResponse) {
    emit(out, &t!("probe.diag.status_code", status = response.status));
    emit(out, &t!("probe.diag.response", body = response.display_body()));
}

/// Writes the pass/fail verdict line and returns the outcome unchanged.
pub(crate) fn conclude(out: &mut dyn Write, name: &str, outcome: ProbeOutcome) -> ProbeOutcome {
    match &outcome {
        ProbeOutcome::Passed => emit(out, &t!("probe.passed", name = name)),
        ProbeOutcome::Failed(reason) => {
            emit(out, &t!("probe.failed", name = name, reason = reason));
        }
    }
    outcome
}

/// Requires an exact status code.
pub(crate) const fn expect_status(
    response: &ProbeResponse,
    expected: u16,
) -> Result<(), ProbeFailure> {
    if response.status == expected {
        Ok(())
    } else {
        Err(ProbeFailure::Status(response.status))
    }
}
