/// Common test utilities for imgsmoke integration tests
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A scratch working directory for driving the binary.
#[allow(dead_code)]
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub work_path: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let work_path = temp_dir.path().to_path_buf();

        TestWorkspace {
            temp_dir,
            work_path,
        }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.work_path
    }

    /// Write a config file into the workspace and return its path.
    #[allow(dead_code)]
    pub fn create_config(&self, content: &str) -> PathBuf {
        let path = self.work_path.join("imgsmoke.yml");
        std::fs::write(&path, content).expect("Failed to write config file");
        path
    }

    /// Run the imgsmoke binary in this workspace.
    pub fn imgsmoke(&self, args: &[&str]) -> CommandResult {
        let output = Command::new(env!("CARGO_BIN_EXE_imgsmoke"))
            .args(args)
            .current_dir(&self.work_path)
            .output()
            .expect("Failed to execute imgsmoke");

        CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            exit_code: output.status.code(),
        }
    }
}

/// Result of running a command
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub exit_code: Option<i32>,
}

impl CommandResult {
    /// Assert the command succeeded
    pub fn assert_success(&self) {
        if !self.success {
            panic!(
                "Command failed:\nstdout: {}\nstderr: {}\nexit code: {:?}",
                self.stdout, self.stderr, self.exit_code
            );
        }
    }

    /// Assert the command failed
    #[allow(dead_code)]
    pub fn assert_failure(&self) {
        if self.success {
            panic!(
                "Command succeeded when it should have failed:\nstdout: {}\nstderr: {}",
                self.stdout, self.stderr
            );
        }
    }

    /// Assert stdout contains text
    #[allow(dead_code)]
    pub fn assert_stdout_contains(&self, text: &str) {
        assert!(
            self.stdout.contains(text),
            "stdout does not contain '{}'\nstdout: {}",
            text,
            self.stdout
        );
    }

    /// Assert stderr contains text
    #[allow(dead_code)]
    pub fn assert_stderr_contains(&self, text: &str) {
        assert!(
            self.stderr.contains(text),
            "stderr does not contain '{}'\nstderr: {}",
            text,
            self.stderr
        );
    }
}
