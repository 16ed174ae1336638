// crates/pillbox-verifier/src/runner.rs
// ============================================================================
// Module: Probe Runner
// Description: Runs probes in order and collects their outcomes.
// Purpose: Keep one broken probe from aborting the rest of the run.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The runner executes every probe in the given order with no
//! short-circuiting. Each call is wrapped in [`std::panic::catch_unwind`]; a
//! panicking probe is recorded as [`ProbeFailure::Panicked`] and the run
//! continues.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::io::Write;
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;

use crate::probes::Probe;
use crate::probes::ProbeContext;
use crate::probes::ProbeFailure;
use crate::probes::ProbeOutcome;
use crate::probes::emit;
use crate::report::ProbeRecord;
use crate::report::RunReport;
use crate::t;

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Runs `probes` sequentially and returns the collected report.
pub fn run_probes(
    probes: &[Box<dyn Probe>],
    ctx: &ProbeContext<'_>,
    out: &mut dyn Write,
) -> RunReport {
    let mut records = Vec::with_capacity(probes.len());
    for probe in probes {
        emit(out, "");
        let name = probe.name();
        let outcome = match catch_unwind(AssertUnwindSafe(|| probe.run(ctx, &mut *out))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                emit(out, &t!("probe.panicked", name = name, error = message));
                ProbeOutcome::Failed(ProbeFailure::Panicked(message))
            }
        };
        records.push(ProbeRecord {
            id: probe.id(),
            name,
            outcome,
        });
    }
    RunReport {
        base_url: ctx.config.base_url.clone(),
        api_base_url: ctx.config.api_base_url(),
        records,
    }
}

/// Extracts a readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "unknown panic".to_string()
}
