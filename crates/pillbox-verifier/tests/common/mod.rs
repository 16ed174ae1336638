// crates/pillbox-verifier/tests/common/mod.rs
// ============================================================================
// Module: Backend Stub
// Description: Loopback Virtual Pillbox backend for verifier tests.
// Purpose: Serve configurable contract responses and record probe requests.
// Dependencies: tiny_http, serde_json
// ============================================================================

//! ## Overview
//! [`BackendStub`] serves the contract routes on an ephemeral loopback port
//! according to a [`BackendBehavior`] and records every request it sees.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

use std::net::TcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use serde_json::Value;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Behavior
// ============================================================================

/// Responses served by the stub, one knob per contract route.
#[derive(Clone, Debug)]
pub struct BackendBehavior {
    /// Status for `GET /`.
    pub root_status: u16,
    /// Status for `GET /api/`.
    pub hello_status: u16,
    /// Raw body for `GET /api/`.
    pub hello_body: String,
    /// Headers attached to `OPTIONS /api/`.
    pub cors_headers: Vec<(String, String)>,
    /// Status for `GET /api/status`.
    pub list_status: u16,
    /// Raw body for `GET /api/status`.
    pub list_body: String,
    /// Status for `POST /api/status`.
    pub create_status: u16,
    /// Client name echoed by `POST /api/status`; `None` echoes the request.
    pub echo_override: Option<String>,
    /// Omits `timestamp` from the created record.
    pub omit_timestamp: bool,
}

impl BackendBehavior {
    /// Returns a backend that satisfies every probe.
    pub fn healthy() -> Self {
        Self {
            root_status: 404,
            hello_status: 200,
            hello_body: json!({"message": "Hello World"}).to_string(),
            cors_headers: vec![
                ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
                ("Access-Control-Allow-Methods".to_string(), "GET, POST, OPTIONS".to_string()),
                ("Access-Control-Allow-Credentials".to_string(), "true".to_string()),
            ],
            list_status: 200,
            list_body: "[]".to_string(),
            create_status: 200,
            echo_override: None,
            omit_timestamp: false,
        }
    }

    /// Replaces the `GET /api/` message.
    pub fn with_message(mut self, message: &str) -> Self {
        self.hello_body = json!({"message": message}).to_string();
        self
    }

    /// Drops one CORS header by name.
    pub fn without_cors_header(mut self, name: &str) -> Self {
        self.cors_headers.retain(|(header, _)| !header.eq_ignore_ascii_case(name));
        self
    }
}

// ============================================================================
// SECTION: Recorded Requests
// ============================================================================

/// Request metadata captured by the stub.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Request headers as received.
    pub headers: Vec<(String, String)>,
    /// Raw request body.
    pub body: String,
}

impl RecordedRequest {
    /// Returns a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Running stub backend; shuts down on drop.
pub struct BackendStub {
    base_url: String,
    server: Arc<Server>,
    join: Option<thread::JoinHandle<()>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl BackendStub {
    /// Starts a stub serving `behavior` on an ephemeral loopback port.
    pub fn spawn(behavior: BackendBehavior) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind stub backend"));
        let addr = server.server_addr().to_ip().expect("stub backend ip addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let join = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    handle(request, &behavior, &requests);
                }
            })
        };
        Self {
            base_url: format!("http://{addr}"),
            server,
            join: Some(join),
            requests,
        }
    }

    /// Returns the backend base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Returns the first request matching `method` and `path`.
    pub fn request(&self, method: &str, path: &str) -> Option<RecordedRequest> {
        self.requests().into_iter().find(|entry| entry.method == method && entry.path == path)
    }
}

impl Drop for BackendStub {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Returns a base URL on a loopback port with no listener.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("ephemeral addr");
    drop(listener);
    format!("http://{addr}")
}

// ============================================================================
// SECTION: Routing
// ============================================================================

fn handle(mut request: Request, behavior: &BackendBehavior, requests: &Mutex<Vec<RecordedRequest>>) {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let recorded = RecordedRequest {
        method: request.method().as_str().to_string(),
        path: request.url().to_string(),
        headers: request
            .headers()
            .iter()
            .map(|header| (header.field.to_string(), header.value.to_string()))
            .collect(),
        body,
    };
    let response = route(&recorded, behavior);
    if let Ok(mut entries) = requests.lock() {
        entries.push(recorded);
    }
    let _ = request.respond(response);
}

fn route(request: &RecordedRequest, behavior: &BackendBehavior) -> Response<std::io::Cursor<Vec<u8>>> {
    match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/") => json_response(behavior.root_status, &json!({"detail": "Not Found"}).to_string()),
        ("GET", "/api/") => json_response(behavior.hello_status, &behavior.hello_body),
        ("OPTIONS", "/api/") => {
            let mut response = Response::from_string("OK");
            for (name, value) in &behavior.cors_headers {
                let header = Header::from_bytes(name.as_bytes(), value.as_bytes())
                    .expect("stub cors header");
                response.add_header(header);
            }
            response
        }
        ("GET", "/api/status") => json_response(behavior.list_status, &behavior.list_body),
        ("POST", "/api/status") => {
            let posted: Value = serde_json::from_str(&request.body).unwrap_or(Value::Null);
            let client_name = behavior
                .echo_override
                .clone()
                .map_or_else(|| posted["client_name"].clone(), Value::String);
            let mut record = json!({
                "id": "5b0c7a8e-0000-4000-8000-000000000001",
                "client_name": client_name,
            });
            if !behavior.omit_timestamp {
                record["timestamp"] = json!("2026-01-01T00:00:00Z");
            }
            json_response(behavior.create_status, &record.to_string())
        }
        _ => json_response(404, &json!({"detail": "Not Found"}).to_string()),
    }
}

fn json_response(status: u16, body: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .expect("content type header");
    Response::from_string(body).with_status_code(status).with_header(header)
}
