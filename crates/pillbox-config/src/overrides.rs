// crates/pillbox-config/src/overrides.rs
// ============================================================================
// Module: Config Overrides
// Description: Environment-backed overrides for the verifier configuration.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Override values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 and set-but-empty values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for verifier overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierEnv {
    /// Backend base URL override (skips the env file lookup).
    BackendUrl,
    /// Env file path override.
    EnvFile,
    /// Timeout floor in seconds (positive integer).
    TimeoutSeconds,
}

impl VerifierEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BackendUrl => "PILLBOX_VERIFIER_BACKEND_URL",
            Self::EnvFile => "PILLBOX_VERIFIER_ENV_FILE",
            Self::TimeoutSeconds => "PILLBOX_VERIFIER_TIMEOUT_SEC",
        }
    }
}

// ============================================================================
// SECTION: Override Types
// ============================================================================

/// One layer of explicit configuration overrides.
///
/// Used for both CLI flags and process environment values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigOverrides {
    /// Backend base URL override.
    pub backend_url: Option<String>,
    /// Env file path override.
    pub env_file: Option<PathBuf>,
    /// Minimum per-request timeout.
    pub timeout_floor: Option<Duration>,
}

impl ConfigOverrides {
    /// Loads overrides from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or is an invalid timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url = read_env_nonempty(VerifierEnv::BackendUrl.as_str())?;
        let env_file = read_env_nonempty(VerifierEnv::EnvFile.as_str())?.map(PathBuf::from);
        let timeout_floor = read_env_nonempty(VerifierEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(VerifierEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        Ok(Self {
            backend_url,
            env_file,
            timeout_floor,
        })
    }

    /// Validates a CLI backend URL flag value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyOverride`] when the value is blank.
    pub fn validate_backend_url(name: &str, raw: &str) -> Result<String, ConfigError> {
        if raw.trim().is_empty() {
            return Err(ConfigError::EmptyOverride {
                name: name.to_string(),
            });
        }
        Ok(raw.to_string())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::OverrideNotUtf8 {
            name: name.to_string(),
        })
    })
}

/// Reads an environment variable and rejects empty values.
fn read_env_nonempty(name: &str) -> Result<Option<String>, ConfigError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyOverride {
            name: name.to_string(),
        }),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value in whole seconds.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
pub fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    let trimmed = raw.trim();
    let secs: u64 = trimmed.parse().map_err(|_| ConfigError::InvalidTimeout {
        name: name.to_string(),
    })?;
    if secs == 0 {
        return Err(ConfigError::ZeroTimeout {
            name: name.to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
