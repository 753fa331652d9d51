//! Liveness probes that need no credentials

use async_trait::async_trait;
use serde_json::Value;

use crate::catalog::TestCase;
use crate::client::Method;
use crate::context::{CallClass, RunContext};
use crate::error::{CaseError, CaseResult};
use crate::result::Outcome;

/// `GET /health` on the server root
pub struct BasicConnectivity;

impl BasicConnectivity {
    async fn check(ctx: &RunContext) -> CaseResult<Outcome> {
        let resp = match ctx.root_get("/health", CallClass::Health).await {
            Ok(resp) => resp,
            Err(CaseError::Transport(e)) => {
                return Ok(Outcome::fail(format!("Connection failed: {}", e)));
            }
            Err(e) => return Err(e),
        };
        if resp.status != 200 {
            return Ok(Outcome::fail(format!("Health check failed: {}", resp.status)));
        }

        let body = resp.json()?.clone();
        let uptime = body.get("uptime").and_then(Value::as_f64).unwrap_or(0.0);
        Ok(Outcome::pass(format!("Server healthy, uptime: {:.1}s", uptime)).with_data(body))
    }
}

#[async_trait]
impl TestCase for BasicConnectivity {
    fn name(&self) -> &str {
        "Basic Connectivity"
    }

    async fn run(&self, ctx: &mut RunContext) -> CaseResult<()> {
        let result = Self::check(ctx).await;
        ctx.record(self.name(), result);
        Ok(())
    }
}

/// `GET <prefix>/docs`
pub struct ApiDocumentation;

#[async_trait]
impl TestCase for ApiDocumentation {
    fn name(&self) -> &str {
        "API Documentation"
    }

    async fn run(&self, ctx: &mut RunContext) -> CaseResult<()> {
        let result = ctx
            .api(Method::Get, "/docs", None, CallClass::Health)
            .await
            .map(|resp| Outcome::new(resp.status == 200, format!("Status: {}", resp.status)));
        ctx.record(self.name(), result);
        Ok(())
    }
}
