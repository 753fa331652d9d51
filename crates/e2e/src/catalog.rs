//! Ordered catalog of test cases

use async_trait::async_trait;
use std::collections::HashSet;

use crate::cases;
use crate::config::SuiteConfig;
use crate::context::RunContext;
use crate::error::{CaseResult, E2eError, E2eResult};

/// A named unit of work in the suite.
///
/// A case records at least one result through [`RunContext::record`]. Any
/// error it returns is recorded by the orchestrator under [`TestCase::name`].
/// Cases later in the catalog may read state written by earlier ones (the
/// session token) but must still produce a result when it is missing.
#[async_trait]
pub trait TestCase: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, ctx: &mut RunContext) -> CaseResult<()>;
}

/// Fixed, ordered sequence of cases
pub struct Catalog {
    cases: Vec<Box<dyn TestCase>>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl Catalog {
    /// Build a catalog; an empty list or duplicate case names are rejected
    pub fn new(cases: Vec<Box<dyn TestCase>>) -> E2eResult<Self> {
        if cases.is_empty() {
            return Err(E2eError::Configuration("test catalog is empty".to_string()));
        }
        let mut seen = HashSet::new();
        for case in &cases {
            if !seen.insert(case.name().to_string()) {
                return Err(E2eError::Configuration(format!(
                    "duplicate test case name: {}",
                    case.name()
                )));
            }
        }
        Ok(Self { cases })
    }

    /// The admin API suite, in dependency order (login before authorized calls)
    pub fn standard(config: &SuiteConfig) -> E2eResult<Self> {
        Self::new(cases::standard(config))
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.cases.iter().map(|c| c.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn TestCase> {
        self.cases.iter().map(|c| c.as_ref())
    }
}
