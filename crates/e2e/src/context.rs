//! Mutable state threaded through one run

use serde_json::Value;
use tracing::{info, warn};

use crate::client::{ApiClient, ApiResponse, Method};
use crate::config::SuiteConfig;
use crate::error::CaseResult;
use crate::result::{Outcome, ResultLog};
use crate::session::Session;

/// Timeout class of a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallClass {
    /// Liveness probes: short bound
    Health,
    /// Calls that carry or return records: long bound
    Data,
}

/// Everything a case may read or write. Owned by the orchestrator and lent
/// to one case at a time.
pub struct RunContext {
    pub client: ApiClient,
    pub config: SuiteConfig,
    pub session: Session,
    pub log: ResultLog,
}

impl RunContext {
    pub fn new(client: ApiClient, config: SuiteConfig) -> Self {
        Self {
            client,
            config,
            session: Session::new(),
            log: ResultLog::new(),
        }
    }

    /// Start a fresh run: empty log, no token
    pub fn reset(&mut self) {
        self.session = Session::new();
        self.log = ResultLog::new();
    }

    /// Append a check result and echo it
    pub fn record(&mut self, test_name: &str, result: CaseResult<Outcome>) {
        let entry = self.log.record(test_name, result);
        if entry.success {
            info!("{} PASS {}: {}", entry.marker(), entry.test_name, entry.message);
        } else {
            warn!("{} FAIL {}: {}", entry.marker(), entry.test_name, entry.message);
        }
    }

    /// Request against a root path (outside the API prefix), no credentials
    pub async fn root_get(&self, path: &str, class: CallClass) -> CaseResult<ApiResponse> {
        self.client
            .request(Method::Get, path, None, Default::default(), self.timeout(class))
            .await
    }

    /// Request under the API prefix with the current bearer token, if any
    pub async fn api(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        class: CallClass,
    ) -> CaseResult<ApiResponse> {
        self.client
            .request(
                method,
                &self.config.api_path(path),
                body,
                self.session.auth_header(),
                self.timeout(class),
            )
            .await
    }

    pub async fn api_get(&self, path: &str) -> CaseResult<ApiResponse> {
        self.api(Method::Get, path, None, CallClass::Data).await
    }

    fn timeout(&self, class: CallClass) -> std::time::Duration {
        match class {
            CallClass::Health => self.config.health_timeout(),
            CallClass::Data => self.config.data_timeout(),
        }
    }
}
