// crates/pillbox-verifier/src/report.rs
// ============================================================================
// Module: Run Report
// Description: Aggregated probe outcomes and their text/JSON renderings.
// Purpose: Produce the run summary and the overall verdict.
// Dependencies: pillbox-config, serde, serde_json
// ============================================================================

//! ## Overview
//! [`RunReport`] keeps probe records in execution order. The overall verdict
//! is true iff every probe passed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use pillbox_config::VerifierConfig;
use serde::Serialize;

use crate::probes::ProbeOutcome;
use crate::t;

/// Width of the `=` separator lines.
const SEPARATOR_WIDTH: usize = 60;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome of one probe within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRecord {
    /// Stable probe identifier.
    pub id: &'static str,
    /// Localized display name.
    pub name: String,
    /// Probe outcome.
    pub outcome: ProbeOutcome,
}

/// Ordered outcomes of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Backend base URL the run targeted.
    pub base_url: String,
    /// API root the run targeted.
    pub api_base_url: String,
    /// Probe records in execution order.
    pub records: Vec<ProbeRecord>,
}

impl RunReport {
    /// Returns the number of passed probes.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.records.iter().filter(|record| record.outcome.is_passed()).count()
    }

    /// Returns the number of probes run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Returns true when every probe passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    /// Returns the outcome recorded for `id`, if that probe ran.
    #[must_use]
    pub fn outcome(&self, id: &str) -> Option<&ProbeOutcome> {
        self.records.iter().find(|record| record.id == id).map(|record| &record.outcome)
    }

    /// Writes the per-probe PASS/FAIL lines and the overall verdict.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when `out` rejects a write.
    pub fn write_summary(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", separator())?;
        writeln!(out, "{}", t!("summary.header"))?;
        writeln!(out, "{}", separator())?;
        for record in &self.records {
            let line = if record.outcome.is_passed() {
                t!("summary.line.passed", name = record.name)
            } else {
                t!("summary.line.failed", name = record.name)
            };
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
        writeln!(out, "{}", t!("summary.overall", passed = self.passed(), total = self.total()))?;
        let verdict =
            if self.all_passed() { t!("summary.all_passed") } else { t!("summary.some_failed") };
        writeln!(out, "{verdict}")
    }

    /// Renders the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serialization error, if any.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let view = JsonReport {
            base_url: &self.base_url,
            api_base_url: &self.api_base_url,
            passed: self.passed(),
            total: self.total(),
            success: self.all_passed(),
            probes: self
                .records
                .iter()
                .map(|record| JsonProbe {
                    id: record.id,
                    name: &record.name,
                    status: if record.outcome.is_passed() { "passed" } else { "failed" },
                    reason: record.outcome.failure().map(ToString::to_string),
                })
                .collect(),
        };
        serde_json::to_string_pretty(&view)
    }
}

/// Serialized form of [`RunReport`].
#[derive(Serialize)]
struct JsonReport<'a> {
    /// Backend base URL.
    base_url: &'a str,
    /// API root.
    api_base_url: &'a str,
    /// Passed probe count.
    passed: usize,
    /// Total probe count.
    total: usize,
    /// Overall verdict.
    success: bool,
    /// Per-probe entries.
    probes: Vec<JsonProbe<'a>>,
}

/// Serialized form of [`ProbeRecord`].
#[derive(Serialize)]
struct JsonProbe<'a> {
    /// Stable probe identifier.
    id: &'static str,
    /// Display name.
    name: &'a str,
    /// `passed` or `failed`.
    status: &'static str,
    /// Failure reason for failed probes.
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

// ============================================================================
// SECTION: Banner
// ============================================================================

/// Writes the startup banner naming the target URLs.
///
/// # Errors
///
/// Returns the underlying I/O error when `out` rejects a write.
pub fn write_banner(config: &VerifierConfig, out: &mut dyn Write) -> std::io::Result<()> {
    let api_base_url = config.api_base_url();
    writeln!(out, "{}", t!("banner.testing", url = api_base_url))?;
    writeln!(out, "{}", separator())?;
    writeln!(out, "{}", t!("banner.start"))?;
    writeln!(
        out,
        "{}",
        t!("banner.backend_url", url = config.base_url, source = config.base_url_source)
    )?;
    writeln!(out, "{}", t!("banner.api_base_url", url = api_base_url))?;
    writeln!(out, "{}", separator())
}

/// Returns a separator line.
fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}
