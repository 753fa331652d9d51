//! Suite configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{E2eError, E2eResult};

/// Configuration for one suite run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Server root, e.g. `http://localhost:3001`
    pub base_url: String,

    /// Versioned API prefix appended to `base_url` for data calls
    pub api_prefix: String,

    /// Where the JSON report is written (overwritten each run)
    pub report_path: PathBuf,

    /// Pause between cases
    pub pacing_ms: u64,

    /// Timeout for health/docs probes
    pub health_timeout_secs: u64,

    /// Timeout for data-bearing calls
    pub data_timeout_secs: u64,

    /// Login candidates, tried in order
    pub credentials: Vec<Credentials>,

    /// Disposable admin account created by the registration case
    pub registration: Registration,

    /// Disposable source created and removed by the sources case
    pub test_source: SourceFixture,

    pub search_query: String,
    pub autocomplete_query: String,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        let registration = Registration::default();
        Self {
            base_url: "http://localhost:3001".to_string(),
            api_prefix: "/api/v1".to_string(),
            report_path: PathBuf::from("test_report.json"),
            pacing_ms: 500,
            health_timeout_secs: 5,
            data_timeout_secs: 10,
            credentials: vec![
                Credentials::new(&registration.email, &registration.password),
                Credentials::new("admin@nilpulse.com", "admin123"),
                Credentials::new("admin@example.com", "admin123"),
            ],
            registration,
            test_source: SourceFixture::default(),
            search_query: "NIL".to_string(),
            autocomplete_query: "sports".to_string(),
        }
    }
}

/// Email/password pair posted to the login endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: String,
}

impl Default for Registration {
    fn default() -> Self {
        Self {
            name: "Test Admin User".to_string(),
            email: "testadmin@nilpulse.com".to_string(),
            password: "testpass123".to_string(),
            user_type: "admin".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFixture {
    pub name: String,
    pub url: String,
    pub source_type: String,
    pub category: String,
    pub is_active: bool,
}

impl Default for SourceFixture {
    fn default() -> Self {
        Self {
            name: "Test RSS Source".to_string(),
            url: "https://example.com/rss".to_string(),
            source_type: "rss".to_string(),
            category: "news".to_string(),
            is_active: true,
        }
    }
}

impl SuiteConfig {
    /// Load configuration from a TOML file, falling back to defaults when absent
    pub fn load(path: &Path) -> E2eResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject settings that would make every case meaningless
    pub fn validate(&self) -> E2eResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(E2eError::Configuration("base_url is empty".to_string()));
        }
        reqwest::Url::parse(&self.base_url).map_err(|e| {
            E2eError::Configuration(format!("invalid base_url '{}': {}", self.base_url, e))
        })?;
        if self.health_timeout_secs == 0 || self.data_timeout_secs == 0 {
            return Err(E2eError::Configuration(
                "timeouts must be at least one second".to_string(),
            ));
        }
        if self.credentials.is_empty() {
            return Err(E2eError::Configuration(
                "at least one login credential is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    pub fn data_timeout(&self) -> Duration {
        Duration::from_secs(self.data_timeout_secs)
    }

    /// Path of an endpoint under the API prefix
    pub fn api_path(&self, path: &str) -> String {
        format!("{}{}", self.api_prefix.trim_end_matches('/'), path)
    }
}
