// crates/pillbox-verifier/src/client.rs
// ============================================================================
// Module: Probe HTTP Client
// Description: Blocking HTTP client used by every probe.
// Purpose: Issue one request per probe and capture a response snapshot.
// Dependencies: reqwest, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`ProbeClient`] sends a single [`ProbeRequest`] and returns a
//! [`ProbeResponse`] snapshot (status, headers, body text). Any HTTP status is
//! a successful send; probes decide what a status means.
//! Invariants:
//! - Each request carries its own timeout.
//! - No retries are performed.
//! - Header names in snapshots are lowercase.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Transport-level failures raised by [`ProbeClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Build(String),
    /// The request did not complete before its timeout.
    #[error("request timed out after {secs}s: {message}")]
    Timeout {
        /// Timeout applied to the request, in whole seconds.
        secs: u64,
        /// Transport error text.
        message: String,
    },
    /// The connection could not be established.
    #[error("connection error: {0}")]
    Connect(String),
    /// Any other request failure.
    #[error("request failed: {0}")]
    Request(String),
    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

impl ClientError {
    /// Classifies a reqwest error.
    fn from_reqwest(err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                secs: timeout.as_secs(),
                message: err.to_string(),
            }
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

// ============================================================================
// SECTION: Request / Response
// ============================================================================

/// One outbound probe request.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL.
    pub url: String,
    /// Extra request headers.
    pub headers: Vec<(&'static str, String)>,
    /// Optional JSON body (sets `Content-Type: application/json`).
    pub json: Option<Value>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ProbeRequest {
    /// Builds a request with no headers or body.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            json: None,
            timeout,
        }
    }

    /// Adds a request header.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }
}

/// Snapshot of a received response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProbeResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers keyed by lowercase name; repeated headers are joined with `, `.
    pub headers: BTreeMap<String, String>,
    /// Raw response body.
    pub body: String,
}

impl ProbeResponse {
    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decode error when the body is not valid JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Returns the body rendered for diagnostics: compact JSON when it parses,
    /// raw text otherwise.
    #[must_use]
    pub fn display_body(&self) -> String {
        self.json().map_or_else(|_| self.body.clone(), |value| value.to_string())
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking HTTP client shared by all probes.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    /// Underlying reqwest client.
    client: Client,
}

impl ProbeClient {
    /// Builds a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] when the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, ClientError> {
        let client = Client::builder().build().map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self {
            client,
        })
    }

    /// Sends a request and captures the response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on connection failure, timeout, or body read failure.
    pub fn send(&self, request: &ProbeRequest) -> Result<ProbeResponse, ClientError> {
        let mut builder =
            self.client.request(request.method.clone(), &request.url).timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        if let Some(body) = &request.json {
            builder = builder.json(body);
        }
        let response =
            builder.send().map_err(|err| ClientError::from_reqwest(&err, request.timeout))?;
        let status = response.status().as_u16();
        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in response.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            match headers.entry(name.as_str().to_string()) {
                Entry::Occupied(mut entry) => {
                    let existing = entry.get_mut();
                    existing.push_str(", ");
                    existing.push_str(&value);
                }
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
            }
        }
        let body = response.text().map_err(|err| ClientError::Body(err.to_string()))?;
        Ok(ProbeResponse {
            status,
            headers,
            body,
        })
    }
}
