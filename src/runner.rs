// Suite runner: the top-to-bottom smoke-test procedure.
// Pull, clean up stale container, start fresh, probe, fetch, tear down.
// Entirely sequential; every external call blocks to completion.

use crate::config::SuiteSpec;
use crate::docker::ports;
use crate::docker::runtime::DockerCli;
use crate::errors::{Result, SmokeError};
use crate::report::RunReport;
use crate::theme;
use dialoguer::Confirm;
use regex::Regex;
use std::thread;
use std::time::Duration;

/// Settle delay before the host-side fetch, so a service started by a
/// probe has a moment to begin listening.
const FETCH_SETTLE: Duration = Duration::from_secs(1);

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Default)]
pub struct RunOptions {
    /// Echo runtime commands and dump container logs after failed checks.
    pub inspect: bool,
    /// Pause for manual browser verification after the automated checks.
    pub prompt: bool,
    /// Pin the published host port instead of picking a free one.
    pub port: Option<u16>,
    /// Leave the container running after the run.
    pub keep: bool,
}

pub struct SuiteRunner<'a> {
    docker: &'a DockerCli,
    options: &'a RunOptions,
}

impl<'a> SuiteRunner<'a> {
    pub fn new(docker: &'a DockerCli, options: &'a RunOptions) -> Self {
        Self { docker, options }
    }

    /// Run one suite to completion. Image-pull and container-start
    /// failures are fatal; probe and fetch failures are recorded in the
    /// report and the run continues.
    pub fn execute(&self, name: &str, spec: &SuiteSpec) -> Result<RunReport> {
        let marker = Regex::new(&spec.marker)
            .map_err(|e| SmokeError::InvalidMarker(spec.marker.clone(), e.to_string()))?;

        let mut report = RunReport::new(name);

        theme::section(&format!("Smoke test: {} ({})", name, spec.image));

        theme::info(&format!("Pulling image '{}'", spec.image));
        self.docker.pull(&spec.image)?;
        theme::success(&format!("image '{}' pulled", spec.image));

        if self.docker.container_exists(&spec.container) {
            theme::info(&format!("Removing stale container '{}'", spec.container));
        }
        self.docker.remove_if_exists(&spec.container)?;

        let host_port = self.select_host_port()?;
        theme::info(&format!(
            "Publishing container port {} on host port {}",
            spec.container_port, host_port
        ));

        self.docker.run_detached(
            &spec.image,
            &spec.container,
            host_port,
            spec.container_port,
            &spec.command,
        )?;

        thread::sleep(Duration::from_secs(spec.warmup_secs));

        let state = self.docker.inspect_state(&spec.container)?;
        if !state.running {
            self.dump_logs_on_failure(&spec.container);
            return Err(SmokeError::ContainerStart(
                spec.container.clone(),
                format!("container is not running (status: {})", state.status),
            ));
        }
        theme::success(&format!("container '{}' is running", spec.container));

        for probe in &spec.probes {
            let output = self.docker.exec(&spec.container, &probe.argv)?;
            let passed = probe.evaluate(&output);
            let detail = if passed {
                None
            } else {
                Some(probe.failure_detail(&output))
            };
            report.record(&probe.label, passed, detail);

            if !passed {
                self.dump_logs_on_failure(&spec.container);
                if probe.fatal {
                    return Err(SmokeError::Docker(format!(
                        "fatal probe '{}' failed",
                        probe.label
                    )));
                }
            }
        }

        thread::sleep(FETCH_SETTLE);
        let url = service_url(host_port, &spec.path);
        let fetch_label = format!("host fetch matches /{}/", spec.marker);
        match self.fetch(&url) {
            Ok(body) if marker.is_match(&body) => report.record(&fetch_label, true, None),
            Ok(_) => {
                report.record(
                    &fetch_label,
                    false,
                    Some(format!("marker not found in response from {}", url)),
                );
                self.dump_logs_on_failure(&spec.container);
            }
            Err(e) => {
                report.record(&fetch_label, false, Some(e.to_string()));
                self.dump_logs_on_failure(&spec.container);
            }
        }

        if self.options.prompt {
            let confirmed = self.prompt_manual_verification(&url);
            let detail = if confirmed {
                None
            } else {
                Some("not confirmed".to_string())
            };
            report.record("manual browser verification", confirmed, detail);
        }

        if self.options.keep {
            theme::info(&format!(
                "Keeping container '{}' running at {}",
                spec.container, url
            ));
        } else {
            self.teardown(&spec.container);
        }

        Ok(report)
    }

    fn select_host_port(&self) -> Result<u16> {
        match self.options.port {
            Some(port) => {
                if !ports::is_free(port) {
                    return Err(SmokeError::PortInUse(port));
                }
                Ok(port)
            }
            None => ports::pick_free_port(),
        }
    }

    fn fetch(&self, url: &str) -> Result<String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()?;
        let response = client.get(url).send()?.error_for_status()?;
        Ok(response.text()?)
    }

    fn prompt_manual_verification(&self, url: &str) -> bool {
        theme::info(&format!("Open {} in a browser to verify the page.", url));
        Confirm::new()
            .with_prompt("Does the page load correctly?")
            .default(true)
            .interact()
            .unwrap_or(false)
    }

    /// Stop and remove the container. Teardown failures are printed,
    /// not propagated.
    fn teardown(&self, container: &str) {
        theme::info(&format!("Stopping container '{}'", container));
        if let Err(e) = self.docker.stop(container) {
            theme::failure(&format!("cleanup: {}", e));
            return;
        }
        if let Err(e) = self.docker.remove(container) {
            theme::failure(&format!("cleanup: {}", e));
            return;
        }
        theme::success(&format!("container '{}' removed", container));
    }

    fn dump_logs_on_failure(&self, container: &str) {
        if !self.options.inspect {
            return;
        }

        match self.docker.logs(container) {
            Ok(logs) if !logs.trim().is_empty() => {
                theme::info("container logs:");
                println!("{}", logs.trim_end());
            }
            Ok(_) => {}
            Err(e) => theme::failure(&format!("could not fetch logs: {}", e)),
        }
    }
}

/// URL of the published service on the loopback interface.
pub fn service_url(host_port: u16, path: &str) -> String {
    format!("http://127.0.0.1:{}{}", host_port, path)
}
