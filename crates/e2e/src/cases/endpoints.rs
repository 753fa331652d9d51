//! Read-only endpoint checks, declared as data

use async_trait::async_trait;

use crate::catalog::TestCase;
use crate::context::RunContext;
use crate::error::CaseResult;
use crate::result::Outcome;

use super::flag_outcome;

/// Where the item list sits in the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    /// `{data: [...]}`
    Flat,
    /// `{data: {data: [...]}}`
    Nested,
}

#[derive(Debug, Clone, PartialEq)]
enum Expect {
    /// 200 and the envelope's success flag
    Flag { message: String },
    /// Same, and the item list must be present; the count goes in the message
    List { noun: String, shape: ListShape },
}

/// One authorized GET recorded as its own result
#[derive(Debug, Clone)]
pub struct Probe {
    test_name: String,
    path: String,
    expect: Expect,
    attach_data: bool,
    verbose_status: bool,
}

impl Probe {
    pub fn flag(test_name: &str, path: &str, message: &str) -> Self {
        Self::build(
            test_name,
            path,
            Expect::Flag {
                message: message.to_string(),
            },
        )
    }

    pub fn list(test_name: &str, path: &str, noun: &str, shape: ListShape) -> Self {
        Self::build(
            test_name,
            path,
            Expect::List {
                noun: noun.to_string(),
                shape,
            },
        )
    }

    fn build(test_name: &str, path: &str, expect: Expect) -> Self {
        Self {
            test_name: test_name.to_string(),
            path: path.to_string(),
            expect,
            attach_data: false,
            verbose_status: false,
        }
    }

    /// Keep the envelope's `data` on the recorded result
    pub fn attach_data(mut self) -> Self {
        self.attach_data = true;
        self
    }

    /// Include the response body in unexpected-status messages
    pub fn verbose_status(mut self) -> Self {
        self.verbose_status = true;
        self
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    pub async fn check(&self, ctx: &RunContext) -> CaseResult<Outcome> {
        let resp = ctx.api_get(&self.path).await?;
        if resp.status != 200 {
            return Ok(if self.verbose_status {
                Outcome::fail(format!("Status: {}, Response: {}", resp.status, resp.text()))
            } else {
                Outcome::unexpected_status(resp.status)
            });
        }

        let outcome = match &self.expect {
            Expect::Flag { message } => flag_outcome(&resp, message)?,
            Expect::List { noun, shape } => {
                let envelope = resp.envelope()?;
                if !envelope.success {
                    Outcome::fail("Server reported failure")
                } else {
                    let items = match shape {
                        ListShape::Flat => envelope.list()?,
                        ListShape::Nested => envelope.nested_list()?,
                    };
                    Outcome::pass(format!("Retrieved {} {}", items.len(), noun))
                }
            }
        };

        if self.attach_data {
            let envelope = resp.envelope()?;
            Ok(outcome.with_data(envelope.data))
        } else {
            Ok(outcome)
        }
    }
}

/// A case made of independent probes
pub struct EndpointCase {
    name: String,
    probes: Vec<Probe>,
}

impl EndpointCase {
    pub fn new(name: &str, probes: Vec<Probe>) -> Self {
        Self {
            name: name.to_string(),
            probes,
        }
    }
}

#[async_trait]
impl TestCase for EndpointCase {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: &mut RunContext) -> CaseResult<()> {
        for probe in &self.probes {
            let result = probe.check(ctx).await;
            ctx.record(probe.test_name(), result);
        }
        Ok(())
    }
}
