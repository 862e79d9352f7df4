//! TestWorld pattern for CLI integration tests.
//!
//! Provides an isolated temp directory to hold input files and config, and
//! runs the `finsight` binary with a controlled environment.

use anyhow::Result;
use assert_cmd::Command;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::SampleFiles;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use finsight_testing::TestWorld;
/// use finsight_testing::fixtures::OPENAI_TOOL_CALLS;
///
/// let world = TestWorld::new().with_sample(OPENAI_TOOL_CALLS);
/// let result = world.run(&["process", OPENAI_TOOL_CALLS, "--provider", "openai"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    env_vars: HashMap<String, String>,
    samples: SampleFiles,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut env_vars = HashMap::new();
        // Keep the developer's own config file out of tests
        env_vars.insert(
            "FINSIGHT_CONFIG".to_string(),
            temp_dir
                .path()
                .join("missing-config.toml")
                .display()
                .to_string(),
        );

        Self {
            temp_dir,
            env_vars,
            samples: SampleFiles::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Copy a recorded sample into the world under its own file name.
    pub fn with_sample(self, sample_name: &str) -> Self {
        self.samples
            .copy_to(sample_name, &self.path(sample_name))
            .expect("Failed to copy sample");
        self
    }

    /// Write an arbitrary file into the world.
    pub fn with_file(self, name: &str, contents: &str) -> Self {
        std::fs::write(self.path(name), contents).expect("Failed to write file");
        self
    }

    /// Write a config file and point `FINSIGHT_CONFIG` at it.
    pub fn with_config(mut self, contents: &str) -> Self {
        let path = self.path("config.toml");
        std::fs::write(&path, contents).expect("Failed to write config");
        self.env_vars
            .insert("FINSIGHT_CONFIG".to_string(), path.display().to_string());
        self
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Build a command for the `finsight` binary, run from the world directory.
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("finsight").expect("Failed to find finsight binary");
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("FINSIGHT_LOG");
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run the CLI with arguments and capture its output.
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let output = self.command().args(args).output()?;
        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Captured CLI invocation.
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }
}
