// crates/pillbox-config/src/error.rs
// ============================================================================
// Module: Config Errors
// Description: Error type for configuration loading and override parsing.
// Purpose: Give callers a typed failure to report before any probe runs.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`ConfigError`] is returned before any probe runs. The CLI reports it on
//! stderr and exits `1`.

use thiserror::Error;

/// Errors raised while resolving verifier configuration.
///
/// # Invariants
/// - A missing env file never produces an error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The env file exists but could not be read.
    #[error("failed to read env file {path}: {source}")]
    Read {
        /// Display form of the env file path.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The env file contents are not valid UTF-8.
    #[error("env file {path} must be valid UTF-8")]
    InvalidUtf8 {
        /// Display form of the env file path.
        path: String,
    },
    /// An override value is not valid UTF-8.
    #[error("{name} must be valid UTF-8")]
    OverrideNotUtf8 {
        /// Environment variable or flag name.
        name: String,
    },
    /// An override value is set but empty.
    #[error("{name} must not be empty")]
    EmptyOverride {
        /// Environment variable or flag name.
        name: String,
    },
    /// A timeout override is not a positive integer number of seconds.
    #[error("{name} must be a positive integer number of seconds")]
    InvalidTimeout {
        /// Environment variable or flag name.
        name: String,
    },
    /// A timeout override is zero.
    #[error("{name} must be greater than zero")]
    ZeroTimeout {
        /// Environment variable or flag name.
        name: String,
    },
}
