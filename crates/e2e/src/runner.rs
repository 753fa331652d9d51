//! Orchestrator that runs the catalog in order and owns the result log

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::catalog::{Catalog, TestCase};
use crate::client::ApiClient;
use crate::config::SuiteConfig;
use crate::context::RunContext;
use crate::error::E2eResult;
use crate::report::Report;
use crate::result::{ResultLog, TestResult};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
}

/// Sequential suite runner.
///
/// Cases execute one at a time in catalog order with a fixed pause in
/// between. A failing, erroring or panicking case becomes a failed
/// [`TestResult`]; the run always reaches [`RunState::Completed`].
pub struct Orchestrator {
    catalog: Catalog,
    ctx: RunContext,
    pacing: Duration,
    state: RunState,
}

impl Orchestrator {
    /// Validate the configuration and build the standard suite
    pub fn from_config(config: SuiteConfig) -> E2eResult<Self> {
        config.validate()?;
        let catalog = Catalog::standard(&config)?;
        let client = ApiClient::new(&config.base_url)?;
        Ok(Self::new(catalog, RunContext::new(client, config)))
    }

    pub fn new(catalog: Catalog, ctx: RunContext) -> Self {
        let pacing = ctx.config.pacing();
        Self {
            catalog,
            ctx,
            pacing,
            state: RunState::Idle,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn context(&self) -> &RunContext {
        &self.ctx
    }

    pub fn log(&self) -> &ResultLog {
        &self.ctx.log
    }

    /// Run every case and summarize. Earlier results and tokens are discarded.
    pub async fn run(&mut self) -> Report {
        self.ctx.reset();
        self.state = RunState::Running;
        let start = Instant::now();

        info!(
            "Running {} test case(s) against {}",
            self.catalog.len(),
            self.ctx.client.base_url()
        );

        for (idx, case) in self.catalog.iter().enumerate() {
            if idx > 0 && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }
            run_case(case, &mut self.ctx).await;
        }

        self.state = RunState::Completed;
        let report = Report::summarize(self.ctx.log.entries());
        info!(
            "Test Results: {} passed, {} failed ({} ms)",
            report.passed,
            report.failed,
            start.elapsed().as_millis()
        );
        report
    }
}

/// Execute one case, converting a returned error or a panic into a result
async fn run_case(case: &dyn TestCase, ctx: &mut RunContext) {
    debug!("Running case: {}", case.name());
    let before = ctx.log.len();

    match AssertUnwindSafe(case.run(ctx)).catch_unwind().await {
        Ok(Ok(())) => {
            if ctx.log.len() == before {
                error!("✗ {} recorded no result", case.name());
                ctx.log
                    .push(TestResult::from_error(case.name(), "case recorded no result"));
            }
        }
        Ok(Err(e)) => {
            error!("✗ {} - {}", case.name(), e);
            ctx.log.push(TestResult::from_error(case.name(), e));
        }
        Err(payload) => {
            let cause = panic_message(payload.as_ref());
            error!("✗ {} crashed: {}", case.name(), cause);
            ctx.log
                .push(TestResult::from_error(case.name(), format!("case crashed: {}", cause)));
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
