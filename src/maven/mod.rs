//! Effective descriptors computed by Maven itself.
//!
//! Maven applies inheritance, profiles, and property substitution when it
//! writes `help:effective-pom`. The [`EffectivePomService`] runs that goal once
//! for the whole tree and parses the result; the engine then prefers these
//! fully expanded values over its own resolution of the raw descriptors.

pub mod command;

use std::path::{Path, PathBuf};

pub use command::{MavenCommand, MavenOutput, maven_executable};

use crate::config::ConversionOptions;
use crate::constants::{EFFECTIVE_POM_PATH, MAVEN_DIAGNOSTIC_LINES};
use crate::core::PomError;
use crate::descriptor::{Descriptor, parse_effective_projects};

/// Runs `mvn help:effective-pom` and loads the produced descriptors.
#[derive(Debug, Clone)]
pub struct EffectivePomService {
    enabled: bool,
    force_generate: bool,
    program: Option<PathBuf>,
}

impl EffectivePomService {
    #[must_use]
    pub fn new(options: &ConversionOptions) -> Self {
        Self {
            enabled: options.use_effective_pom,
            force_generate: options.force_generate_effective_pom,
            program: None,
        }
    }

    /// Use a specific Maven executable instead of the one on the PATH.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Location of the effective descriptor file for a project directory.
    #[must_use]
    pub fn output_path(directory: &Path) -> PathBuf {
        directory.join(EFFECTIVE_POM_PATH)
    }

    /// Effective descriptors of the project in `directory`.
    ///
    /// Returns `None` when the service is disabled. The file is regenerated
    /// unless it already exists and regeneration is not forced.
    pub async fn load(&self, directory: &Path) -> Result<Option<Vec<Descriptor>>, PomError> {
        if !self.enabled {
            tracing::debug!("Effective descriptors disabled, using raw descriptors only");
            return Ok(None);
        }

        let output = Self::output_path(directory);
        if self.force_generate || !output.exists() {
            self.generate(directory, &output).await?;
        } else {
            tracing::info!("Reusing existing effective descriptor {}", output.display());
        }

        let projects = parse_effective_projects(&output)?;
        tracing::info!("Loaded {} effective descriptor(s) from {}", projects.len(), output.display());
        Ok(Some(projects))
    }

    async fn generate(&self, directory: &Path, output: &Path) -> Result<(), PomError> {
        tracing::info!("Generating effective descriptor in {}", directory.display());
        let mut command = MavenCommand::new()
            .args(["help:effective-pom".to_string(), format!("-Doutput={}", output.display())])
            .current_dir(directory)
            .capture_output();
        if let Some(program) = &self.program {
            command = command.program(program);
        }

        let result = command.execute().await?;
        let failed = |reason: String| PomError::EffectiveDescriptorFailed {
            directory: directory.display().to_string(),
            reason,
        };
        if !result.success {
            let tail = result.tail(MAVEN_DIAGNOSTIC_LINES);
            let reason = if tail.is_empty() {
                "mvn help:effective-pom exited with a non-zero status".to_string()
            } else {
                format!("mvn help:effective-pom exited with a non-zero status:\n{tail}")
            };
            return Err(failed(reason));
        }
        for line in result.stdout.lines().chain(result.stderr.lines()) {
            tracing::debug!(target: "maven", "{line}");
        }
        if !output.exists() {
            return Err(failed(format!("expected output {} was not written", output.display())));
        }
        Ok(())
    }
}
