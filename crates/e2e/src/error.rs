//! Error types for the API test suite
//!
//! Two layers: [`CaseError`] is raised while a single case talks to the
//! target API and is always recovered at the case boundary, while
//! [`E2eError`] covers configuration and report I/O and may abort the run.

use thiserror::Error;

/// Failure inside one case evaluation. Never escapes the orchestrator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaseError {
    /// The target could not be reached (refused, DNS, timeout, broken body).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The target answered, but not with what the case expected.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl CaseError {
    pub fn protocol(msg: impl Into<String>) -> Self {
        CaseError::Protocol(msg.into())
    }
}

impl From<reqwest::Error> for CaseError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CaseError::Transport(format!("request timed out: {}", e))
        } else {
            CaseError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for CaseError {
    fn from(e: serde_json::Error) -> Self {
        CaseError::Protocol(format!("malformed response body: {}", e))
    }
}

/// Suite-level errors
#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type CaseResult<T> = Result<T, CaseError>;
pub type E2eResult<T> = Result<T, E2eError>;
