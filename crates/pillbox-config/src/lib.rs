// crates/pillbox-config/src/lib.rs
// ============================================================================
// Module: Pillbox Config Library
// Description: Configuration loading for the Pillbox contract verifier.
// Purpose: Resolve the target backend URL from flags, environment, and env files.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The verifier targets a single backend whose base URL is resolved once at
//! startup and then passed by value into every probe. Resolution layers, in
//! precedence order:
//! - explicit overrides (CLI flags),
//! - process environment overrides (`PILLBOX_VERIFIER_*`),
//! - the developer env file (`KEY=VALUE` lines, key `EXPO_PUBLIC_BACKEND_URL`),
//! - the literal default [`DEFAULT_BACKEND_URL`].
//!
//! Invariants:
//! - A missing env file is never an error; it resolves as an empty mapping.
//! - Malformed env-file lines are skipped, never rejected.
//! - Explicit overrides fail closed when set but empty or invalid.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod env_file;
pub mod error;
pub mod overrides;
pub mod resolve;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env_file::BACKEND_URL_KEY;
pub use env_file::DEFAULT_BACKEND_URL;
pub use env_file::EnvFile;
pub use env_file::resolve_base_url;
pub use error::ConfigError;
pub use overrides::ConfigOverrides;
pub use overrides::VerifierEnv;
pub use overrides::read_env_strict;
pub use resolve::BaseUrlSource;
pub use resolve::DEFAULT_ENV_FILE;
pub use resolve::VerifierConfig;
