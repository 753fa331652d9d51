//! Per-check results and the append-only log they land in

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CaseResult;

/// Timestamp layout used in the console and the JSON report
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One recorded check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    #[serde(rename = "test")]
    pub test_name: String,
    pub success: bool,
    pub message: String,
    pub data: Option<Value>,
    pub timestamp: String,
}

impl TestResult {
    pub fn new(test_name: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            test_name: test_name.into(),
            success: outcome.success,
            message: outcome.message,
            data: outcome.data,
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Failed result carrying the error's cause as its message
    pub fn from_error(test_name: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::new(test_name, Outcome::fail(cause.to_string()))
    }

    pub fn marker(&self) -> &'static str {
        if self.success {
            "✅"
        } else {
            "❌"
        }
    }
}

/// Verdict of a single check before it is stamped and logged
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
    pub data: Option<Value>,
}

impl Outcome {
    pub fn new(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            data: None,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(true, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(false, message)
    }

    /// Failure for a response outside the expected status set
    pub fn unexpected_status(status: u16) -> Self {
        Self::fail(format!("Status: {}", status))
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Ordered, append-only record of a run
#[derive(Debug, Clone, Default)]
pub struct ResultLog {
    entries: Vec<TestResult>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: TestResult) {
        self.entries.push(result);
    }

    /// Record a check, turning an error into a failed entry
    pub fn record(&mut self, test_name: &str, result: CaseResult<Outcome>) -> &TestResult {
        let entry = match result {
            Ok(outcome) => TestResult::new(test_name, outcome),
            Err(e) => TestResult::from_error(test_name, e),
        };
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[TestResult] {
        &self.entries
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CaseError;

    #[test]
    fn test_record_keeps_insertion_order() {
        let mut log = ResultLog::new();
        log.record("first", Ok(Outcome::pass("ok")));
        log.record("second", Err(CaseError::Transport("refused".into())));
        log.record("third", Ok(Outcome::fail("Status: 500")));

        let names: Vec<_> = log.entries().iter().map(|r| r.test_name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
        assert!(!log.entries()[1].success);
        assert_eq!(log.entries()[1].message, "Transport error: refused");
    }

    #[test]
    fn test_timestamp_is_second_precision() {
        let result = TestResult::new("x", Outcome::pass(""));
        assert!(chrono::NaiveDateTime::parse_from_str(&result.timestamp, TIMESTAMP_FORMAT).is_ok());
        assert_eq!(result.timestamp.len(), 19);
    }

    #[test]
    fn test_serializes_with_report_keys() {
        let result = TestResult::new(
            "Basic Connectivity",
            Outcome::pass("up").with_data(serde_json::json!({"uptime": 1.0})),
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["test"], "Basic Connectivity");
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["uptime"], 1.0);
        assert!(value.get("timestamp").is_some());
    }
}
