// crates/pillbox-config/src/env_file.rs
// ============================================================================
// Module: Env File Loader
// Description: Permissive `KEY=VALUE` parser for developer env files.
// Purpose: Read the frontend env file that names the backend URL.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Env files are optional developer configuration, so the parser is
//! permissive: blank lines, `#` comments, and lines without `=` are skipped
//! rather than rejected. Only I/O failures on an existing file and invalid
//! UTF-8 are reported.
//!
//! Line rules:
//! - Surrounding whitespace is trimmed from the whole line.
//! - The line splits on the first `=`; the key is kept as written.
//! - Leading and trailing `"` / `'` characters are stripped from the value.
//! - A later duplicate key overwrites an earlier one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::ConfigError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Env file key naming the backend base URL.
pub const BACKEND_URL_KEY: &str = "EXPO_PUBLIC_BACKEND_URL";

/// Base URL used when no configuration names one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

// ============================================================================
// SECTION: Env File
// ============================================================================

/// Parsed env file mapping.
///
/// # Invariants
/// - Immutable once loaded.
/// - Values never carry surrounding quote characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvFile {
    /// Parsed key/value pairs.
    entries: BTreeMap<String, String>,
}

impl EnvFile {
    /// Loads an env file from disk.
    ///
    /// A missing file yields an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when an existing file cannot be read and
    /// [`ConfigError::InvalidUtf8`] when its contents are not UTF-8.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        let text = String::from_utf8(bytes).map_err(|_| ConfigError::InvalidUtf8 {
            path: path.display().to_string(),
        })?;
        Ok(Self::parse(&text))
    }

    /// Parses env file text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let entries = text.lines().filter_map(parse_line).collect();
        Self {
            entries,
        }
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the backend URL value, if the key is present.
    ///
    /// An empty value is returned as-is and is not replaced by the default.
    #[must_use]
    pub fn backend_url(&self) -> Option<&str> {
        self.get(BACKEND_URL_KEY)
    }

    /// Returns the number of parsed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no entries were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves the backend base URL from an env file, falling back to
/// [`DEFAULT_BACKEND_URL`].
#[must_use]
pub fn resolve_base_url(env_file: &EnvFile) -> String {
    env_file.backend_url().unwrap_or(DEFAULT_BACKEND_URL).to_string()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a single env file line into a key/value pair.
fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    Some((key.to_string(), strip_quotes(value).to_string()))
}

/// Strips any leading and trailing quote characters.
fn strip_quotes(value: &str) -> &str {
    value.trim_matches(|c| c == '"' || c == '\'')
}
