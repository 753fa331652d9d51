//! Pulse API test runner entry point
//!
//! Exit code is 0 when every check passed and 1 otherwise, including when the
//! suite could not start or the report could not be written.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

use pulse_e2e::{Orchestrator, SuiteConfig};

#[derive(Parser, Debug)]
#[command(name = "pulse-e2e")]
#[command(about = "Integration test runner for the Pulse admin API", version)]
struct Args {
    /// TOML configuration file (defaults are used when it does not exist)
    #[arg(short, long, env = "PULSE_E2E_CONFIG", default_value = "pulse-e2e.toml")]
    config: PathBuf,

    /// Server root, e.g. http://localhost:3001
    #[arg(long, env = "PULSE_E2E_BASE_URL")]
    base_url: Option<String>,

    /// Versioned API prefix
    #[arg(long, env = "PULSE_E2E_API_PREFIX")]
    api_prefix: Option<String>,

    /// Path of the JSON report
    #[arg(short, long, env = "PULSE_E2E_REPORT")]
    report: Option<PathBuf>,

    /// Pause between cases in milliseconds
    #[arg(long, env = "PULSE_E2E_PACING_MS")]
    pacing_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(self, mut config: SuiteConfig) -> SuiteConfig {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(prefix) = self.api_prefix {
            config.api_prefix = prefix;
        }
        if let Some(report) = self.report {
            config.report_path = report;
        }
        if let Some(pacing) = self.pacing_ms {
            config.pacing_ms = pacing;
        }
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = async_main(args).await;
    if let Err(e) = &result {
        error!("Error: {}", e);
    }
    ExitCode::from(exit_status(&result))
}

/// 0 only for a completed run where every check passed
fn exit_status(result: &anyhow::Result<bool>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) | Err(_) => 1,
    }
}

async fn async_main(args: Args) -> anyhow::Result<bool> {
    let config = SuiteConfig::load(&args.config)?;
    let config = args.apply(config);
    let report_path = config.report_path.clone();

    let mut runner = Orchestrator::from_config(config)?;
    let report = runner.run().await;

    print!("{}", report.render_console());
    report.persist(&report_path)?;

    Ok(report.all_passed())
}
