// Docker CLI adapter.
// Every operation is a synchronous shell-out to the docker binary,
// interpreted only through its exit status and stdout text.

use crate::errors::{Result, SmokeError};
use crate::theme;
use serde::Deserialize;
use std::process::Command;

/// Output of a command run inside a container via exec.
#[derive(Debug)]
pub struct ExecOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Subset of `docker inspect .State` we care about.
#[derive(Debug, Deserialize)]
pub struct ContainerState {
    #[serde(rename = "Running")]
    pub running: bool,
    #[serde(rename = "Status")]
    pub status: String,
}

/// Thin wrapper over the docker CLI.
pub struct DockerCli {
    /// Echo each command line before running it (the inspect flag).
    verbose: bool,
}

impl DockerCli {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Check if Docker is available on the system.
    pub fn is_available(&self) -> bool {
        Command::new("docker")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Pull an image. Fatal on failure.
    pub fn pull(&self, image: &str) -> Result<()> {
        let args = build_pull_args(image);
        let output = self.run_docker(&args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SmokeError::ImagePull(
                image.to_string(),
                stderr.trim().to_string(),
            ));
        }

        Ok(())
    }

    /// Check whether a container with this exact name exists, running or not.
    pub fn container_exists(&self, name: &str) -> bool {
        let args = build_exists_args(name);
        self.run_docker(&args)
            .map(|output| {
                output.status.success()
                    && output_lists_name(&String::from_utf8_lossy(&output.stdout), name)
            })
            .unwrap_or(false)
    }

    /// Remove a container if it exists. Calling this twice in a row is not
    /// an error: the second call sees no container and does nothing.
    pub fn remove_if_exists(&self, name: &str) -> Result<()> {
        if !self.container_exists(name) {
            return Ok(());
        }

        let args = build_force_remove_args(name);
        let output = self.run_docker(&args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SmokeError::Docker(format!(
                "failed to remove container '{}': {}",
                name,
                stderr.trim()
            )));
        }

        Ok(())
    }

    /// Start a detached container with a published port. Fatal on failure.
    pub fn run_detached(
        &self,
        image: &str,
        name: &str,
        host_port: u16,
        container_port: u16,
        command: &[String],
    ) -> Result<()> {
        let args = build_run_args(image, name, host_port, container_port, command);
        let output = self.run_docker(&args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SmokeError::ContainerStart(
                name.to_string(),
                stderr.trim().to_string(),
            ));
        }

        Ok(())
    }

    /// Run a command inside a container. A non-zero exit from the probed
    /// command is a normal outcome here, not an error.
    pub fn exec(&self, name: &str, argv: &[String]) -> Result<ExecOutput> {
        let args = build_exec_args(name, argv);
        let output = self.run_docker(&args)?;

        Ok(ExecOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Fetch a container's logs.
    pub fn logs(&self, name: &str) -> Result<String> {
        let args = build_logs_args(name);
        let output = self.run_docker(&args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SmokeError::Docker(format!(
                "failed to fetch logs for '{}': {}",
                name,
                stderr.trim()
            )));
        }

        // docker logs writes the container's stderr stream to our stderr
        let mut text = String::from_utf8_lossy(&output.stdout).to_string();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }

    /// Stop a running container.
    pub fn stop(&self, name: &str) -> Result<()> {
        let args = build_stop_args(name);
        let output = self.run_docker(&args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SmokeError::Docker(format!(
                "failed to stop container '{}': {}",
                name,
                stderr.trim()
            )));
        }

        Ok(())
    }

    /// Remove a stopped container.
    pub fn remove(&self, name: &str) -> Result<()> {
        let args = build_remove_args(name);
        let output = self.run_docker(&args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SmokeError::Docker(format!(
                "failed to remove container '{}': {}",
                name,
                stderr.trim()
            )));
        }

        Ok(())
    }

    /// Inspect a container's runtime state.
    pub fn inspect_state(&self, name: &str) -> Result<ContainerState> {
        let args = build_inspect_state_args(name);
        let output = self.run_docker(&args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SmokeError::Docker(format!(
                "failed to inspect container '{}': {}",
                name,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_container_state(stdout.trim())
    }

    fn run_docker(&self, args: &[String]) -> Result<std::process::Output> {
        if self.verbose {
            theme::command(&format!("docker {}", args.join(" ")));
        }

        Ok(Command::new("docker").args(args).output()?)
    }
}

/// Parse the JSON emitted by `docker inspect --format '{{json .State}}'`.
pub fn parse_container_state(json: &str) -> Result<ContainerState> {
    serde_json::from_str(json)
        .map_err(|e| SmokeError::Docker(format!("unexpected inspect output: {}", e)))
}

/// True if the name-listing output contains this exact container name.
pub fn output_lists_name(stdout: &str, name: &str) -> bool {
    stdout.lines().any(|line| line.trim() == name)
}

pub fn build_pull_args(image: &str) -> Vec<String> {
    vec!["pull".to_string(), image.to_string()]
}

pub fn build_exists_args(name: &str) -> Vec<String> {
    vec![
        "ps".to_string(),
        "-a".to_string(),
        "--filter".to_string(),
        format!("name=^{}$", name),
        "--format".to_string(),
        "{{.Names}}".to_string(),
    ]
}

pub fn build_force_remove_args(name: &str) -> Vec<String> {
    vec!["rm".to_string(), "-f".to_string(), name.to_string()]
}

pub fn build_run_args(
    image: &str,
    name: &str,
    host_port: u16,
    container_port: u16,
    command: &[String],
) -> Vec<String> {
    let mut args = vec![
        "run".to_string(),
        "-d".to_string(),
        "--name".to_string(),
        name.to_string(),
        "-p".to_string(),
        format!("{}:{}", host_port, container_port),
        image.to_string(),
    ];
    args.extend(command.iter().cloned());
    args
}

pub fn build_exec_args(name: &str, argv: &[String]) -> Vec<String> {
    let mut args = vec!["exec".to_string(), name.to_string()];
    args.extend(argv.iter().cloned());
    args
}

pub fn build_logs_args(name: &str) -> Vec<String> {
    vec!["logs".to_string(), name.to_string()]
}

pub fn build_stop_args(name: &str) -> Vec<String> {
    vec!["stop".to_string(), name.to_string()]
}

pub fn build_remove_args(name: &str) -> Vec<String> {
    vec!["rm".to_string(), name.to_string()]
}

pub fn build_inspect_state_args(name: &str) -> Vec<String> {
    vec![
        "inspect".to_string(),
        "--format".to_string(),
        "{{json .State}}".to_string(),
        name.to_string(),
    ]
}
