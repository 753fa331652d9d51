//! Test cases against the admin API
//!
//! Each case runs one or more checks and records every check on its own, so
//! a broken endpoint only fails its own entry.

mod auth;
mod connectivity;
mod database;
mod endpoints;
mod sources;

pub use auth::{AdminLogin, UserRegistration};
pub use connectivity::{ApiDocumentation, BasicConnectivity};
pub use database::DatabaseConnectivity;
pub use endpoints::{EndpointCase, ListShape, Probe};
pub use sources::SourcesManagement;

use crate::catalog::TestCase;
use crate::client::ApiResponse;
use crate::config::SuiteConfig;
use crate::error::CaseResult;
use crate::result::Outcome;

/// Cases of the standard suite, in run order
pub fn standard(config: &SuiteConfig) -> Vec<Box<dyn TestCase>> {
    vec![
        Box::new(BasicConnectivity),
        Box::new(ApiDocumentation),
        Box::new(UserRegistration),
        Box::new(AdminLogin),
        Box::new(EndpointCase::new(
            "Dashboard Overview",
            vec![Probe::flag("Dashboard Overview", "/dashboard/overview", "Retrieved overview data")
                .attach_data()
                .verbose_status()],
        )),
        Box::new(EndpointCase::new(
            "Content Endpoints",
            vec![
                Probe::list("Content List", "/content", "content items", ListShape::Nested),
                Probe::list(
                    "Content Categories",
                    "/content/meta/categories",
                    "categories",
                    ListShape::Flat,
                )
                .attach_data(),
            ],
        )),
        Box::new(EndpointCase::new(
            "Deals Endpoints",
            vec![
                Probe::list("Deals List", "/deals", "deals", ListShape::Nested),
                Probe::flag("Deals Leaderboard", "/deals/leaderboard", "Retrieved leaderboard data"),
            ],
        )),
        Box::new(EndpointCase::new(
            "States Endpoints",
            vec![
                Probe::list("States List", "/states", "state laws", ListShape::Flat),
                Probe::flag(
                    "States Map Activity",
                    "/states/map/activity",
                    "Retrieved map activity data",
                ),
            ],
        )),
        Box::new(EndpointCase::new(
            "Search Endpoints",
            vec![
                Probe::flag(
                    "Search Functionality",
                    &query_path("/search", &config.search_query),
                    "Search returned results",
                ),
                Probe::flag(
                    "Search Autocomplete",
                    &query_path("/search/autocomplete", &config.autocomplete_query),
                    "Autocomplete working",
                ),
            ],
        )),
        Box::new(EndpointCase::new(
            "Analytics Endpoints",
            vec![Probe::flag(
                "Analytics Overview",
                "/analytics/overview",
                "Analytics data retrieved",
            )],
        )),
        Box::new(SourcesManagement),
        Box::new(DatabaseConnectivity),
    ]
}

/// `path?q=<query>` with the query percent-encoded
fn query_path(path: &str, query: &str) -> String {
    let encoded = reqwest::Url::parse_with_params("http://query.invalid/", &[("q", query)])
        .ok()
        .and_then(|url| url.query().map(str::to_string))
        .unwrap_or_else(|| format!("q={}", query));
    format!("{}?{}", path, encoded)
}

/// Outcome of a 200-or-bust call whose verdict is the envelope flag
pub(crate) fn flag_outcome(resp: &ApiResponse, message: &str) -> CaseResult<Outcome> {
    if resp.status != 200 {
        return Ok(Outcome::unexpected_status(resp.status));
    }
    let envelope = resp.envelope()?;
    Ok(Outcome::new(envelope.success, message))
}
