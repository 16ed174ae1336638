// crates/pillbox-config/src/resolve.rs
// ============================================================================
// Module: Config Resolution
// Description: Layered resolution of the verifier configuration.
// Purpose: Produce one immutable configuration value at process start.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`VerifierConfig`] is resolved once and passed by reference into every
//! probe. Precedence: CLI flags, then environment overrides, then the env
//! file, then [`crate::DEFAULT_BACKEND_URL`]. Without overrides the chain is
//! exactly "env file key, else default".

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::env_file::EnvFile;
use crate::env_file::resolve_base_url;
use crate::error::ConfigError;
use crate::overrides::ConfigOverrides;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Env file read when no override names one.
pub const DEFAULT_ENV_FILE: &str = "/app/frontend/.env";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Where the resolved base URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUrlSource {
    /// Command-line flag.
    Flag,
    /// Process environment override.
    Environment,
    /// Env file entry.
    EnvFile,
    /// Literal default.
    Default,
}

impl BaseUrlSource {
    /// Returns a stable label for the source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Environment => "environment",
            Self::EnvFile => "env_file",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for BaseUrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved verifier configuration.
///
/// # Invariants
/// - `base_url` is resolved exactly once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Backend base URL as configured.
    pub base_url: String,
    /// Layer the base URL was taken from.
    pub base_url_source: BaseUrlSource,
    /// Env file path consulted during resolution.
    pub env_file: PathBuf,
    /// Minimum per-request timeout, if overridden.
    pub timeout_floor: Option<Duration>,
}

impl VerifierConfig {
    /// Resolves configuration from CLI flags plus process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an environment override is invalid or an
    /// existing env file cannot be read.
    pub fn load(flags: &ConfigOverrides) -> Result<Self, ConfigError> {
        let env = ConfigOverrides::from_env()?;
        Self::resolve_layers(flags, &env)
    }

    /// Resolves configuration from explicit override layers.
    ///
    /// The env file is only read when neither layer names a backend URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the env file exists but cannot be read.
    pub fn resolve_layers(
        flags: &ConfigOverrides,
        env: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let env_file = flags
            .env_file
            .clone()
            .or_else(|| env.env_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE));
        let timeout_floor = flags.timeout_floor.or(env.timeout_floor);
        let (base_url, base_url_source) = if let Some(url) = &flags.backend_url {
            (url.clone(), BaseUrlSource::Flag)
        } else if let Some(url) = &env.backend_url {
            (url.clone(), BaseUrlSource::Environment)
        } else {
            let parsed = EnvFile::load(&env_file)?;
            let source = if parsed.backend_url().is_some() {
                BaseUrlSource::EnvFile
            } else {
                BaseUrlSource::Default
            };
            (resolve_base_url(&parsed), source)
        };
        Ok(Self {
            base_url,
            base_url_source,
            env_file,
            timeout_floor,
        })
    }

    /// Returns the API root (`{base}/api`), dropping one trailing `/` from the base.
    #[must_use]
    pub fn api_base_url(&self) -> String {
        let base = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        format!("{base}/api")
    }

    /// Applies the timeout floor to a probe's default timeout.
    #[must_use]
    pub fn effective_timeout(&self, requested: Duration) -> Duration {
        self.timeout_floor.map_or(requested, |floor| requested.max(floor))
    }
}
