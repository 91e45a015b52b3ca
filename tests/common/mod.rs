//! Common test utilities for pomgrade integration tests
//!
//! Helpers to lay out Maven project trees in a temporary directory, run the
//! `pomgrade` binary against them, and assert on the generated files.

// Not every helper is used by every test file
#![allow(dead_code)]

mod pom_builder;

pub use pom_builder::{DependencySpec, PomBuilder};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A Maven project tree in a temporary directory
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
    home_dir: PathBuf,
}

impl TestProject {
    /// Create an empty project directory with an isolated home directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        let home_dir = temp_dir.path().join("home");

        fs::create_dir_all(&project_dir)?;
        fs::create_dir_all(home_dir.join(".m2").join("repository"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
            home_dir,
        })
    }

    /// Get the project root directory
    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// Local Maven repository inside the isolated home directory
    pub fn local_repository(&self) -> PathBuf {
        self.home_dir.join(".m2").join("repository")
    }

    /// Write a `pom.xml` into `dir`, relative to the project root (`""` for the root)
    pub fn write_pom(&self, dir: &str, content: &str) -> Result<PathBuf> {
        let dir = self.project_dir.join(dir);
        fs::create_dir_all(&dir)?;
        let path = dir.join("pom.xml");
        fs::write(&path, content)
            .with_context(|| format!("Failed to write descriptor to {}", path.display()))?;
        Ok(path)
    }

    /// Write an arbitrary file relative to the project root
    pub fn write_file(&self, path: &str, content: &str) -> Result<PathBuf> {
        let path = self.project_dir.join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Install a descriptor into the local repository as `g/a/v/a-v.pom`
    pub fn install_in_repository(&self, group: &str, artifact: &str, version: &str, content: &str) -> Result<PathBuf> {
        let dir = self
            .local_repository()
            .join(group.replace('.', "/"))
            .join(artifact)
            .join(version);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{artifact}-{version}.pom"));
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Read a file relative to the project root
    pub fn read_file(&self, path: &str) -> Result<String> {
        let path = self.project_dir.join(path);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Run pomgrade in the project directory
    pub fn run_pomgrade(&self, args: &[&str]) -> Result<CommandOutput> {
        self.run_pomgrade_with_env(args, &[])
    }

    /// Run pomgrade with extra environment variables on top of the isolated defaults.
    pub fn run_pomgrade_with_env(
        &self,
        args: &[&str],
        envs: &[(&str, &std::ffi::OsStr)],
    ) -> Result<CommandOutput> {
        let binary = env!("CARGO_BIN_EXE_pomgrade");
        let output = Command::new(binary)
            .args(args)
            .current_dir(&self.project_dir)
            .env("HOME", &self.home_dir)
            .env("USERPROFILE", &self.home_dir)
            .env("POMGRADE_CONFIG", self.home_dir.join("config.toml"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .envs(envs.iter().copied())
            .output()
            .context("Failed to run pomgrade command")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStderr: {}",
            self.code, self.stderr
        );
        self
    }

    /// Assert the command failed
    pub fn assert_failure(&self) -> &Self {
        assert!(!self.success, "Command unexpectedly succeeded\nStdout: {}", self.stdout);
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}

/// File assertion helpers
pub struct FileAssert;

impl FileAssert {
    /// Assert that a file exists
    pub fn exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// Assert that a file does not exist
    pub fn not_exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(!path.exists(), "Expected file to not exist: {}", path.display());
    }

    /// Assert that a file contains specific content
    pub fn contains(path: impl AsRef<Path>, expected: &str) {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
        assert!(
            content.contains(expected),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path.display(),
            expected,
            content
        );
    }
}
