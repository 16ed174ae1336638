// crates/pillbox-verifier/src/probes/health.rs
// ============================================================================
// Module: Backend Health Probe
// Description: Checks that the backend root answers at all.
// Purpose: Separate "backend down" from contract failures.
// Dependencies: reqwest
// ============================================================================

//! ## Overview
//! The health probe passes on any HTTP response from the backend root,
//! whatever its status. Only transport failures fail it.

use std::io::Write;

use reqwest::Method;

use super::HEALTH_TIMEOUT;
use super::Probe;
use super::ProbeContext;
use super::ProbeOutcome;
use super::conclude;
use super::emit;
use crate::client::ProbeRequest;
use crate::t;

/// GET on the backend root; any response passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackendHealthProbe;

impl Probe for BackendHealthProbe {
    fn id(&self) -> &'static str {
        "backend_health"
    }

    fn name(&self) -> String {
        t!("probe.health.name")
    }

    fn run(&self, ctx: &ProbeContext<'_>, out: &mut dyn Write) -> ProbeOutcome {
        emit(out, &t!("probe.health.start"));
        let request =
            ProbeRequest::new(Method::GET, ctx.config.base_url.as_str(), ctx.timeout(HEALTH_TIMEOUT));
        let outcome = match ctx.send(&request) {
            Ok(response) => {
                emit(out, &t!("probe.diag.root_status", status = response.status));
                ProbeOutcome::Passed
            }
            Err(failure) => ProbeOutcome::Failed(failure),
        };
        conclude(out, &self.name(), outcome)
    }
}
