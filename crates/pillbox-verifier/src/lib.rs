// crates/pillbox-verifier/src/lib.rs
// ============================================================================
// Module: Pillbox Verifier Library
// Description: Contract probes for the Virtual Pillbox backend.
// Purpose: Run a fixed sequence of HTTP probes and report pass/fail.
// Dependencies: pillbox-config, reqwest, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The verifier resolves a [`pillbox_config::VerifierConfig`] once, then runs
//! five independent probes against the backend in a fixed order:
//! backend health, basic connectivity, CORS preflight, `GET /api/status`,
//! and `POST /api/status`. Each probe returns a tagged [`ProbeOutcome`]; the
//! [`runner`] collects them into a [`RunReport`].
//!
//! Invariants:
//! - Probes run sequentially on the calling thread with blocking I/O.
//! - No probe failure (including a panic) stops later probes.
//! - No retries; each probe makes exactly one request.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod i18n;
pub mod probes;
pub mod report;
pub mod runner;


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use client::ClientError;
pub use client::ProbeClient;
pub use client::ProbeRequest;
pub use client::ProbeResponse;
pub use probes::Probe;
pub use probes::ProbeContext;
pub use probes::ProbeFailure;
pub use probes::ProbeOutcome;
pub use probes::default_probes;
pub use report::ProbeRecord;
pub use report::RunReport;
pub use report::write_banner;
pub use runner::run_probes;
