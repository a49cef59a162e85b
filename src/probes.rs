// Exec-based probes: commands run inside the container, each checked
// by exit code or by a substring of its stdout.

use crate::docker::runtime::ExecOutput;
use serde::{Deserialize, Serialize};

/// What a probe's output must satisfy to pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// The command exits 0.
    Success,
    /// The command exits 0 and its stdout contains the given text.
    StdoutContains(String),
}

/// A single check run inside the container via exec.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Probe {
    pub label: String,
    pub argv: Vec<String>,
    /// Substring the stdout must contain; exit code alone when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
    /// Fatal probes abort the run on failure; the rest are only reported.
    #[serde(default)]
    pub fatal: bool,
}

impl Probe {
    pub fn new(label: &str, argv: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            argv: argv.iter().map(|s| s.to_string()).collect(),
            contains: None,
            fatal: false,
        }
    }

    pub fn expect_stdout(mut self, text: &str) -> Self {
        self.contains = Some(text.to_string());
        self
    }

    pub fn expectation(&self) -> Expectation {
        match &self.contains {
            Some(text) => Expectation::StdoutContains(text.clone()),
            None => Expectation::Success,
        }
    }

    /// Evaluate an exec result against this probe's expectation.
    pub fn evaluate(&self, output: &ExecOutput) -> bool {
        match self.expectation() {
            Expectation::Success => output.success,
            Expectation::StdoutContains(text) => output.success && output.stdout.contains(&text),
        }
    }

    /// Short failure detail for the report: the probed command plus
    /// whatever the container printed on stderr.
    pub fn failure_detail(&self, output: &ExecOutput) -> String {
        let stderr = output.stderr.trim();
        if stderr.is_empty() {
            format!("`{}` did not satisfy the check", self.argv.join(" "))
        } else {
            format!("`{}`: {}", self.argv.join(" "), stderr)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exec(success: bool, stdout: &str, stderr: &str) -> ExecOutput {
        ExecOutput {
            success,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn test_success_expectation() {
        let probe = Probe::new("install curl", &["apk", "add", "curl"]);
        assert!(probe.evaluate(&exec(true, "", "")));
        assert!(!probe.evaluate(&exec(false, "", "error")));
    }

    #[test]
    fn test_stdout_contains_expectation() {
        let probe =
            Probe::new("fetch page", &["curl", "-fsS", "http://localhost/"]).expect_stdout("nginx");
        assert!(probe.evaluate(&exec(true, "Welcome to nginx!", "")));
        assert!(!probe.evaluate(&exec(true, "something else", "")));
        // matching stdout does not rescue a failing exit code
        assert!(!probe.evaluate(&exec(false, "Welcome to nginx!", "")));
    }

    #[test]
    fn test_failure_detail_includes_stderr() {
        let probe = Probe::new("ping", &["ping", "-c", "1", "8.8.8.8"]);
        let detail = probe.failure_detail(&exec(false, "", "network unreachable"));
        assert!(detail.contains("network unreachable"));
        assert!(detail.contains("ping -c 1 8.8.8.8"));
    }

    #[test]
    fn test_probe_deserializes_from_yaml() {
        let yaml = r#"
label: install curl
argv: [apk, add, --no-cache, curl]
contains: "OK"
fatal: true
"#;
        let probe: Probe = serde_yml::from_str(yaml).unwrap();
        assert_eq!(probe.label, "install curl");
        assert_eq!(probe.expectation(), Expectation::StdoutContains("OK".to_string()));
        assert!(probe.fatal);
    }

    #[test]
    fn test_probe_defaults_to_exit_code_check() {
        let yaml = r#"
label: reload nginx
argv: [nginx, -s, reload]
"#;
        let probe: Probe = serde_yml::from_str(yaml).unwrap();
        assert_eq!(probe.expectation(), Expectation::Success);
        assert!(!probe.fatal);
    }
}
