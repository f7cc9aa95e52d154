//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Building a scratch share with project markers and fixed timestamps
//! - Locating the output directory, manifest and run log
//! - Executing CLI commands against the scratch environment

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures;

/// Declarative test environment builder.
///
/// Layout inside the temp dir: `share/` (the crawl root), `Out/` (migration
/// target, not created), `consolidate.log` and `config.toml`.
///
/// # Example
/// ```no_run
/// use consolidate_testing::TestWorld;
///
/// let world = TestWorld::new()
///     .with_package("A/old", "foo")
///     .with_package("A/new", "foo");
///
/// let result = world.run(&["scan", "share"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    root: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment with an empty share.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().join("share");
        std::fs::create_dir_all(&root).expect("Failed to create share dir");

        Self {
            temp_dir,
            root,
            env_vars: HashMap::new(),
        }
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Crawl root (`share/`)
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Migration target (`Out/`)
    pub fn out(&self) -> PathBuf {
        self.temp_dir.path().join("Out")
    }

    pub fn log_path(&self) -> PathBuf {
        self.temp_dir.path().join("consolidate.log")
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.toml")
    }

    /// Path relative to the share
    pub fn share_path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write `content` to `rel` below the share, creating parents.
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        self
    }

    /// Project directory whose `package.json` declares `name`.
    pub fn with_package(self, dir: &str, name: &str) -> Self {
        self.with_file(&format!("{}/package.json", dir), &fixtures::package_json(name))
    }

    /// Project directory identified by its `requirements.txt` content.
    pub fn with_requirements(self, dir: &str, packages: &[&str]) -> Self {
        self.with_file(
            &format!("{}/requirements.txt", dir),
            &fixtures::requirements_txt(packages),
        )
    }

    /// Set every file below `rel` to the given modification time.
    pub fn with_mtime(self, rel: &str, unix_secs: i64) -> Self {
        fixtures::set_tree_mtime(&self.root.join(rel), unix_secs)
            .expect("Failed to set modification times");
        self
    }

    /// Write a config file and point the CLI at it.
    pub fn with_config(self, toml: &str) -> Self {
        std::fs::write(self.config_path(), toml).expect("Failed to write config");
        self
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// Runs from the temp dir so `share` and `Out` resolve as relative paths,
    /// and keeps the config and run log inside the sandbox.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--config")
            .arg(self.config_path())
            .arg("--log-file")
            .arg(self.log_path());

        cmd.current_dir(self.temp_dir.path());

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the CLI with the given arguments.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("consolidate")
            .map_err(|e| anyhow::anyhow!("Failed to find consolidate binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Like [`TestWorld::run`], feeding `input` to stdin.
    #[allow(deprecated)]
    pub fn run_with_input(&self, args: &[&str], input: &str) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("consolidate")
            .map_err(|e| anyhow::anyhow!("Failed to find consolidate binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args).write_stdin(input.to_string());

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Parse a manifest file written by a run.
    pub fn read_manifest(&self, path: impl AsRef<Path>) -> Result<serde_json::Value> {
        let content = std::fs::read_to_string(self.temp_dir.path().join(path))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn read_log(&self) -> Result<String> {
        Ok(std::fs::read_to_string(self.log_path())?)
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
