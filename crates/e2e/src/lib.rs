//! Pulse API integration-test runner
//!
//! Runs a fixed, ordered suite of checks against a live Pulse admin API,
//! carrying the login token from one case to the next, and produces a
//! pass/fail report on the console and as JSON.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Orchestrator (Idle -> Running -> Completed)                │
//! │    ├── Catalog: [TestCase] in fixed order                   │
//! │    │     └── run(&mut RunContext) -> records TestResult(s)  │
//! │    └── RunContext                                           │
//! │          ├── ApiClient   (GET/POST/DELETE, per-call timeout)│
//! │          ├── Session     (bearer token)                     │
//! │          └── ResultLog   (append-only)                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Report                                                     │
//! │    ├── summarize(log) -> totals + success rate              │
//! │    ├── render_console()                                     │
//! │    └── persist(path)  (JSON array, overwritten each run)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod cases;
pub mod catalog;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod report;
pub mod result;
pub mod runner;
pub mod session;

pub use catalog::{Catalog, TestCase};
pub use config::SuiteConfig;
pub use error::{CaseError, CaseResult, E2eError, E2eResult};
pub use report::Report;
pub use result::{Outcome, TestResult};
pub use runner::{Orchestrator, RunState};
