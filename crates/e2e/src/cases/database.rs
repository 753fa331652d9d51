//! Database-backed summary endpoints

use async_trait::async_trait;

use crate::catalog::TestCase;
use crate::context::RunContext;
use crate::error::CaseResult;
use crate::result::Outcome;

/// Endpoints that only answer when the backing store is reachable
const DB_ENDPOINTS: &[(&str, &str)] = &[
    ("/content/meta/stats", "Content Stats"),
    ("/deals/meta/stats", "Deals Stats"),
    ("/states/meta/summary", "States Summary"),
    ("/dashboard/pulse", "Dashboard Pulse"),
];

/// One entry per endpoint, then an aggregate entry under the case name
pub struct DatabaseConnectivity;

#[async_trait]
impl TestCase for DatabaseConnectivity {
    fn name(&self) -> &str {
        "Database Connectivity"
    }

    async fn run(&self, ctx: &mut RunContext) -> CaseResult<()> {
        let mut all_ok = true;
        for (path, label) in DB_ENDPOINTS {
            let result = ctx
                .api_get(path)
                .await
                .map(|resp| Outcome::new(resp.status == 200, format!("Status: {}", resp.status)));
            if !matches!(&result, Ok(outcome) if outcome.success) {
                all_ok = false;
            }
            ctx.record(&format!("Database - {}", label), result);
        }

        let summary = if all_ok {
            Outcome::pass("Database accessible through API")
        } else {
            Outcome::fail("Database issues detected")
        };
        ctx.record(self.name(), Ok(summary));
        Ok(())
    }
}
