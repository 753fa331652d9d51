//! Source management: list, then create-and-delete a disposable source

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::catalog::TestCase;
use crate::client::Method;
use crate::context::{CallClass, RunContext};
use crate::error::CaseResult;
use crate::result::Outcome;

use super::{ListShape, Probe};

pub struct SourcesManagement;

impl SourcesManagement {
    /// Creation verdict plus the id to clean up, when the server reported one
    async fn create(ctx: &RunContext) -> CaseResult<(Outcome, Option<String>)> {
        let fixture = &ctx.config.test_source;
        let body = json!({
            "name": fixture.name,
            "url": fixture.url,
            "source_type": fixture.source_type,
            "category": fixture.category,
            "is_active": fixture.is_active,
        });
        let resp = ctx.api(Method::Post, "/sources", Some(&body), CallClass::Data).await?;
        if !resp.status_in(&[200, 201]) {
            return Ok((Outcome::unexpected_status(resp.status), None));
        }

        let envelope = resp.envelope()?;
        let id = if envelope.success {
            resource_id(&envelope.data)
        } else {
            None
        };
        Ok((Outcome::new(envelope.success, "Created test source"), id))
    }

    async fn delete(ctx: &RunContext, id: &str) -> CaseResult<Outcome> {
        let resp = ctx
            .api(Method::Delete, &format!("/sources/{}", id), None, CallClass::Data)
            .await?;
        Ok(if resp.status == 200 {
            Outcome::pass("Cleaned up test source")
        } else {
            Outcome::fail(format!("Cleanup failed, status: {}", resp.status))
        })
    }
}

#[async_trait]
impl TestCase for SourcesManagement {
    fn name(&self) -> &str {
        "Sources Management"
    }

    async fn run(&self, ctx: &mut RunContext) -> CaseResult<()> {
        let list = Probe::list("Sources List", "/sources", "sources", ListShape::Nested);
        let result = list.check(ctx).await;
        ctx.record(list.test_name(), result);

        match Self::create(ctx).await {
            Ok((outcome, id)) => {
                ctx.record("Source Creation", Ok(outcome));
                if let Some(id) = id {
                    let result = Self::delete(ctx, &id).await;
                    ctx.record("Source Deletion", result);
                }
            }
            Err(e) => ctx.record("Source Creation", Err(e)),
        }
        Ok(())
    }
}

/// `data.id` as a path segment; ids may be strings or numbers
fn resource_id(data: &Value) -> Option<String> {
    match data.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
