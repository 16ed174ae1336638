// crates/pillbox-verifier/src/probes/tests.rs
// ============================================================================
// Module: Probe Evaluation Unit Tests
// Description: Unit coverage for response evaluation in each probe.
// Purpose: Pin contract checks without a live backend.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Runs each `evaluate` function against hand-built responses. No network is
//! involved.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::collections::BTreeMap;

use super::ProbeFailure;
use super::ProbeOutcome;
use super::connectivity;
use super::cors;
use super::default_probes;
use super::status;
use crate::client::ClientError;
use crate::client::ProbeResponse;

fn json_response(status: u16, body: &str) -> ProbeResponse {
    ProbeResponse {
        status,
        headers: BTreeMap::new(),
        body: body.to_string(),
    }
}

fn header_response(headers: &[(&str, &str)]) -> ProbeResponse {
    ProbeResponse {
        status: 200,
        headers: headers
            .iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), (*value).to_string()))
            .collect(),
        body: String::new(),
    }
}

// ============================================================================
// SECTION: Connectivity
// ============================================================================

#[test]
fn connectivity_accepts_hello_world() {
    let response = json_response(200, r#"{"message": "Hello World"}"#);
    assert_eq!(connectivity::evaluate(&response), Ok(()));
}

#[test]
fn connectivity_rejects_other_message() {
    let response = json_response(200, r#"{"message": "Goodbye"}"#);
    assert_eq!(
        connectivity::evaluate(&response),
        Err(ProbeFailure::UnexpectedMessage {
            actual: "\"Goodbye\"".to_string()
        })
    );
}

#[test]
fn connectivity_rejects_missing_message() {
    let response = json_response(200, r#"{"greeting": "Hello World"}"#);
    assert_eq!(
        connectivity::evaluate(&response),
        Err(ProbeFailure::UnexpectedMessage {
            actual: "null".to_string()
        })
    );
}

#[test]
fn connectivity_rejects_non_json_body() {
    let response = json_response(200, "<html>Hello World</html>");
    assert!(matches!(connectivity::evaluate(&response), Err(ProbeFailure::InvalidJson(_))));
}

#[test]
fn connectivity_checks_status_before_body() {
    let response = json_response(503, r#"{"message": "Hello World"}"#);
    assert_eq!(connectivity::evaluate(&response), Err(ProbeFailure::Status(503)));
    let response = json_response(201, r#"{"message": "Hello World"}"#);
    assert_eq!(connectivity::evaluate(&response), Err(ProbeFailure::Status(201)));
}

// ============================================================================
// SECTION: CORS
// ============================================================================

#[test]
fn cors_accepts_both_headers() {
    let response = header_response(&[
        (cors::ALLOW_ORIGIN, "*"),
        (cors::ALLOW_METHODS, "GET, POST, OPTIONS"),
    ]);
    assert_eq!(cors::evaluate(&response), Ok(()));
}

#[test]
fn cors_reports_every_missing_header() {
    let response = header_response(&[(cors::ALLOW_CREDENTIALS, "true")]);
    assert_eq!(
        cors::evaluate(&response),
        Err(ProbeFailure::MissingHeaders(vec![
            cors::ALLOW_ORIGIN.to_string(),
            cors::ALLOW_METHODS.to_string(),
        ]))
    );
}

#[test]
fn cors_treats_empty_header_as_missing() {
    let response = header_response(&[(cors::ALLOW_ORIGIN, "*"), (cors::ALLOW_METHODS, "")]);
    assert_eq!(
        cors::evaluate(&response),
        Err(ProbeFailure::MissingHeaders(vec![cors::ALLOW_METHODS.to_string()]))
    );
}

#[test]
fn cors_header_lookup_is_case_insensitive() {
    let response = header_response(&[
        ("ACCESS-CONTROL-ALLOW-ORIGIN", "http://localhost:8001"),
        ("access-control-allow-methods", "GET"),
    ]);
    assert_eq!(cors::evaluate(&response), Ok(()));
}

// ============================================================================
// SECTION: Status GET
// ============================================================================

#[test]
fn status_get_accepts_json_list() {
    let response = json_response(200, r#"[{"id": "x", "client_name": "c", "timestamp": "t"}]"#);
    assert_eq!(status::evaluate_listed(&response), Ok(()));
    assert_eq!(status::evaluate_listed(&json_response(200, "[]")), Ok(()));
}

#[test]
fn status_get_rejects_non_json_body() {
    let response = json_response(200, "<html>not json</html>");
    assert!(matches!(status::evaluate_listed(&response), Err(ProbeFailure::InvalidJson(_))));
}

#[test]
fn status_get_rejects_non_200() {
    let response = json_response(404, "[]");
    assert_eq!(status::evaluate_listed(&response), Err(ProbeFailure::Status(404)));
}

// ============================================================================
// SECTION: Status POST
// ============================================================================

#[test]
fn status_post_accepts_echoed_record() {
    let response = json_response(
        200,
        r#"{"id": "x", "client_name": "Virtual Pillbox Test Client", "timestamp": "2026-01-01T00:00:00Z"}"#,
    );
    assert_eq!(status::evaluate_created(&response, status::TEST_CLIENT_NAME), Ok(()));
}

#[test]
fn status_post_rejects_missing_timestamp() {
    let response = json_response(200, r#"{"id": "x", "client_name": "Virtual Pillbox Test Client"}"#);
    assert_eq!(
        status::evaluate_created(&response, status::TEST_CLIENT_NAME),
        Err(ProbeFailure::MissingFields(vec!["timestamp".to_string()]))
    );
}

#[test]
fn status_post_accepts_null_field_values() {
    let response = json_response(
        200,
        r#"{"id": null, "client_name": "Virtual Pillbox Test Client", "timestamp": null}"#,
    );
    assert_eq!(status::evaluate_created(&response, status::TEST_CLIENT_NAME), Ok(()));
}

#[test]
fn status_post_rejects_non_object_body() {
    let response = json_response(200, r#"["id", "client_name", "timestamp"]"#);
    assert_eq!(
        status::evaluate_created(&response, status::TEST_CLIENT_NAME),
        Err(ProbeFailure::MissingFields(
            status::REQUIRED_FIELDS.iter().map(|field| (*field).to_string()).collect()
        ))
    );
}

#[test]
fn status_post_rejects_name_mismatch() {
    let response =
        json_response(200, r#"{"id": "x", "client_name": "Someone Else", "timestamp": "t"}"#);
    assert_eq!(
        status::evaluate_created(&response, status::TEST_CLIENT_NAME),
        Err(ProbeFailure::Mismatch {
            field: "client_name".to_string(),
            expected: status::TEST_CLIENT_NAME.to_string(),
            actual: "\"Someone Else\"".to_string(),
        })
    );
}

#[test]
fn status_post_rejects_non_200() {
    let response = json_response(422, r#"{"detail": "invalid"}"#);
    assert_eq!(
        status::evaluate_created(&response, status::TEST_CLIENT_NAME),
        Err(ProbeFailure::Status(422))
    );
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

#[test]
fn outcome_from_result_tags_failure() {
    let outcome: ProbeOutcome = Err(ProbeFailure::Status(500)).into();
    assert!(!outcome.is_passed());
    assert_eq!(outcome.failure(), Some(&ProbeFailure::Status(500)));
    let outcome: ProbeOutcome = Ok(()).into();
    assert!(outcome.is_passed());
    assert_eq!(outcome.failure(), None);
}

#[test]
fn transport_failure_displays_client_error() {
    let failure = ProbeFailure::from(ClientError::Connect("refused".to_string()));
    assert_eq!(failure.to_string(), "connection error: refused");
}

#[test]
fn default_probes_run_in_fixed_order() {
    let ids: Vec<&str> = default_probes().iter().map(|probe| probe.id()).collect();
    assert_eq!(
        ids,
        vec!["backend_health", "basic_connectivity", "cors_headers", "status_get", "status_post"]
    );
}
