//! Run summary: console rendering and the JSON report file

use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::error::E2eResult;
use crate::result::TestResult;

const RULE_WIDTH: usize = 60;

/// Aggregate view of one run's result log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage of passed entries, 0.0 - 100.0
    pub success_rate: f64,
    pub entries: Vec<TestResult>,
}

impl Report {
    pub fn summarize(log: &[TestResult]) -> Self {
        let total = log.len();
        let passed = log.iter().filter(|r| r.success).count();
        let success_rate = if total == 0 {
            0.0
        } else {
            passed as f64 / total as f64 * 100.0
        };
        Self {
            total,
            passed,
            failed: total - passed,
            success_rate,
            entries: log.to_vec(),
        }
    }

    /// Overall verdict: every recorded check passed
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.entries.iter().filter(|r| !r.success)
    }

    /// Human-readable summary: totals, failures (if any), then every entry
    pub fn render_console(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "{}", "PULSE API TEST REPORT".bold());
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "Total Tests: {}", self.total);
        let _ = writeln!(out, "Passed: {} ✅", self.passed);
        let _ = writeln!(out, "Failed: {} ❌", self.failed);
        let _ = writeln!(out, "Success Rate: {:.1}%", self.success_rate);
        let _ = writeln!(out, "{}", rule);

        if self.failed > 0 {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", "FAILED TESTS:".red().bold());
            let _ = writeln!(out, "{}", rule);
            for result in self.failures() {
                let _ = writeln!(out, "{} {}: {}", result.marker(), result.test_name, result.message);
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "DETAILED RESULTS:".bold());
        let _ = writeln!(out, "{}", rule);
        for result in &self.entries {
            let _ = writeln!(out, "{} {}: {}", result.marker(), result.test_name, result.message);
        }

        let _ = writeln!(out);
        if self.all_passed() {
            let _ = writeln!(out, "{}", "🎉 ALL TESTS PASSED! The admin API is fully functional.".green());
        } else {
            let _ = writeln!(out, "{}", "⚠️  Some tests failed. Please review the issues above.".yellow());
        }
        out
    }

    /// Write the ordered entries as a JSON array, replacing any earlier report
    pub fn persist(&self, path: &Path) -> E2eResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)?;

        info!("Detailed report saved to: {}", path.display());
        Ok(())
    }
}
