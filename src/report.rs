// Run report: per-check outcomes collected during a suite run,
// summarized after teardown.

use crate::theme;
use chrono::{DateTime, Local};
use colored::Colorize;

#[derive(Debug, Clone)]
pub struct CheckRecord {
    pub label: String,
    pub passed: bool,
    pub detail: Option<String>,
}

pub struct RunReport {
    suite: String,
    started: DateTime<Local>,
    checks: Vec<CheckRecord>,
}

impl RunReport {
    pub fn new(suite: &str) -> Self {
        Self {
            suite: suite.to_string(),
            started: Local::now(),
            checks: Vec::new(),
        }
    }

    /// Record a check outcome and print its themed line.
    pub fn record(&mut self, label: &str, passed: bool, detail: Option<String>) {
        if passed {
            theme::success(label);
        } else {
            match &detail {
                Some(d) => theme::failure(&format!("{}: {}", label, d)),
                None => theme::failure(label),
            }
        }

        self.checks.push(CheckRecord {
            label: label.to_string(),
            passed,
            detail,
        });
    }

    pub fn pass_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn fail_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.fail_count() == 0
    }

    pub fn checks(&self) -> &[CheckRecord] {
        &self.checks
    }

    /// Print the final pass/fail summary.
    pub fn print_summary(&self) {
        let elapsed = Local::now().signed_duration_since(self.started);

        theme::section(&format!("Summary: {}", self.suite));
        println!(
            "Started {}  ({}.{:01}s elapsed)",
            self.started.format("%Y-%m-%d %H:%M:%S"),
            elapsed.num_seconds(),
            elapsed.num_milliseconds().rem_euclid(1000) / 100,
        );
        println!(
            "Checks: {} passed, {}",
            self.pass_count().to_string().bright_green(),
            if self.fail_count() > 0 {
                format!("{} failed", self.fail_count()).bright_red().to_string()
            } else {
                "0 failed".to_string()
            }
        );

        for check in self.checks.iter().filter(|c| !c.passed) {
            match &check.detail {
                Some(detail) => theme::failure(&format!("{}: {}", check.label, detail)),
                None => theme::failure(&check.label),
            }
        }

        if self.all_passed() {
            theme::success("all checks passed");
        }
    }
}
