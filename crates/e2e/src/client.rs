//! HTTP adapter for the target API
//!
//! A thin layer over `reqwest`: one call per request, an explicit timeout on
//! every call, no retries and no logging. Transport failures come back as
//! [`CaseError::Transport`] instead of a synthetic status code.

use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::error::{CaseError, CaseResult, E2eResult};

/// HTTP methods the suite issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Body as received: parsed JSON when possible, otherwise the raw text
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Raw(String),
}

/// Status code plus body of a completed call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn status_in(&self, expected: &[u16]) -> bool {
        expected.contains(&self.status)
    }

    /// Parsed JSON body, or a protocol error if the server sent something else
    pub fn json(&self) -> CaseResult<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Raw(text) => Err(CaseError::protocol(format!(
                "expected JSON body, got: {}",
                truncate(text, 120)
            ))),
        }
    }

    /// Body decoded as the standard `{success, data}` envelope
    pub fn envelope(&self) -> CaseResult<Envelope> {
        Ok(Envelope::deserialize(self.json()?)?)
    }

    /// Body rendered back to text, for failure messages
    pub fn text(&self) -> String {
        match &self.body {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Raw(text) => text.clone(),
        }
    }
}

/// Response envelope used by every `/api/v1` route
///
/// `data` stays an opaque value until a case narrows it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// `data` as a flat list: `{data: [...]}`
    pub fn list(&self) -> CaseResult<&Vec<Value>> {
        self.data
            .as_array()
            .ok_or_else(|| CaseError::protocol("expected `data` to be a list"))
    }

    /// `data.data` as a list: paginated payloads nest the items one level down
    pub fn nested_list(&self) -> CaseResult<&Vec<Value>> {
        self.data
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| CaseError::protocol("expected `data.data` to be a list"))
    }

    /// A string field of `data`; missing or blank values are protocol errors
    pub fn data_str(&self, field: &str) -> CaseResult<&str> {
        self.data
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CaseError::protocol(format!("missing `data.{}`", field)))
    }
}

/// Client bound to one server root
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> E2eResult<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request. `path` is relative to the base URL and may carry a
    /// query string.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        json_body: Option<&Value>,
        headers: HeaderMap,
        timeout: Duration,
    ) -> CaseResult<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .http
            .request(method.as_reqwest(), &url)
            .headers(headers)
            .timeout(timeout);
        if let Some(body) = json_body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;

        let body = match serde_json::from_str::<Value>(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Raw(text),
        };

        Ok(ApiResponse { status, body })
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
