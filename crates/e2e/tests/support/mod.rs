//! Stub of the Pulse admin API for integration tests
//!
//! Every request is captured; behavior knobs cover the failure modes the
//! suite has to survive.

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

/// Knobs for the stub
#[derive(Debug, Clone)]
pub struct StubBehavior {
    /// Only this email gets a token from `/auth/login`
    pub accept_email: Option<String>,
    pub token: String,
    /// Status for `GET /api/v1/content`
    pub content_status: u16,
    /// `data.id` returned by `POST /sources`; `None` omits it
    pub source_id: Option<Value>,
    /// Reject data routes without the issued bearer token
    pub require_auth: bool,
    /// Status for `POST /auth/register`
    pub register_status: u16,
}

impl Default for StubBehavior {
    fn default() -> Self {
        Self {
            accept_email: Some("testadmin@nilpulse.com".to_string()),
            token: "stub-token".to_string(),
            content_status: 200,
            source_id: Some(json!("src-123")),
            require_auth: true,
            register_status: 201,
        }
    }
}

#[derive(Clone)]
struct StubState {
    behavior: Arc<StubBehavior>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Request as seen by the stub
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub body: Value,
}

pub struct StubApiHandle {
    base_url: String,
    join: JoinHandle<()>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubApiHandle {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Emails posted to the login endpoint, in order
    pub fn login_attempts(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "POST" && r.path == "/api/v1/auth/login")
            .filter_map(|r| r.body.get("email").and_then(Value::as_str).map(str::to_string))
            .collect()
    }

    pub fn count(&self, method: &str, path_prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path.starts_with(path_prefix))
            .count()
    }
}

impl Drop for StubApiHandle {
    fn drop(&mut self) {
        self.join.abort();
    }
}

pub async fn spawn_stub_api(behavior: StubBehavior) -> StubApiHandle {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        behavior: Arc::new(behavior),
        requests: Arc::clone(&requests),
    };
    let app = Router::new().fallback(handle).with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub bind");
    let base_url = format!("http://{}", listener.local_addr().expect("stub addr"));
    let join = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    StubApiHandle {
        base_url,
        join,
        requests,
    }
}

fn ok(data: Value) -> Response {
    (StatusCode::OK, Json(json!({ "success": true, "data": data }))).into_response()
}

fn status(code: u16, body: Value) -> Response {
    let code = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (code, Json(body)).into_response()
}

async fn handle(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    if let Ok(mut guard) = state.requests.lock() {
        guard.push(CapturedRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            body: body.clone(),
        });
    }
    let behavior = &state.behavior;

    if uri.path() == "/health" {
        return status(200, json!({ "status": "healthy", "uptime": 12.3 }));
    }
    let Some(route) = uri.path().strip_prefix("/api/v1") else {
        return status(404, json!({ "success": false }));
    };

    match (method.as_str(), route) {
        ("GET", "/docs") => return status(200, json!({ "version": "1.0.0" })),
        ("POST", "/auth/register") => {
            return if behavior.register_status < 300 {
                status(
                    behavior.register_status,
                    json!({ "success": true, "data": { "id": "user-1" } }),
                )
            } else {
                status(
                    behavior.register_status,
                    json!({ "success": false, "error": "User already exists" }),
                )
            };
        }
        ("POST", "/auth/login") => {
            let email = body.get("email").and_then(Value::as_str);
            return match (&behavior.accept_email, email) {
                (Some(accepted), Some(email)) if accepted == email => ok(json!({
                    "token": behavior.token,
                    "user": { "email": email, "user_type": "admin" },
                })),
                _ => status(401, json!({ "success": false, "error": "Invalid credentials" })),
            };
        }
        _ => {}
    }

    if behavior.require_auth {
        let expected = format!("Bearer {}", behavior.token);
        let authorized = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v == expected)
            .unwrap_or(false);
        if !authorized {
            return status(401, json!({ "success": false, "error": "Access token required" }));
        }
    }

    match (method.as_str(), route) {
        ("GET", "/content") => {
            if behavior.content_status == 200 {
                ok(json!({ "data": [{ "id": 1 }, { "id": 2 }] }))
            } else {
                status(behavior.content_status, json!({ "success": false, "error": "boom" }))
            }
        }
        ("GET", "/content/meta/categories") => ok(json!(["news", "legal", "deals"])),
        ("GET", "/deals") | ("GET", "/sources") => ok(json!({ "data": [{ "id": 1 }] })),
        ("GET", "/states") => ok(json!([{ "state": "CA" }, { "state": "TX" }])),
        ("POST", "/sources") => match &behavior.source_id {
            Some(id) => status(201, json!({ "success": true, "data": { "id": id } })),
            None => status(201, json!({ "success": true, "data": {} })),
        },
        ("DELETE", path) if path.starts_with("/sources/") => ok(json!({})),
        (
            "GET",
            "/dashboard/overview"
            | "/dashboard/pulse"
            | "/deals/leaderboard"
            | "/deals/meta/stats"
            | "/content/meta/stats"
            | "/states/map/activity"
            | "/states/meta/summary"
            | "/search"
            | "/search/autocomplete"
            | "/analytics/overview",
        ) => ok(json!({})),
        _ => status(404, json!({ "success": false })),
    }
}

/// Accepts connections and never answers. Held sockets are dropped with the handle.
pub struct SilentServerHandle {
    base_url: String,
    join: JoinHandle<()>,
}

impl SilentServerHandle {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Drop for SilentServerHandle {
    fn drop(&mut self) {
        self.join.abort();
    }
}

pub async fn spawn_silent_server() -> SilentServerHandle {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("silent bind");
    let base_url = format!("http://{}", listener.local_addr().expect("silent addr"));
    let join = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    SilentServerHandle { base_url, join }
}
