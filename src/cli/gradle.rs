//! Convert a Maven build to Gradle Kotlin DSL files.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::{ConversionArgs, load_build};
use crate::config::GlobalConfig;
use crate::emit::{GradleEmitter, default_settings_path, read_mirrors, write_tree};
use crate::plugins::ConversionRegistry;

/// Write `settings.gradle.kts` and one `build.gradle.kts` per descriptor.
///
/// # Examples
///
/// ```bash
/// pomgrade gradle .
/// pomgrade gradle ../service --no-use-effective-pom --inline-versions
/// pomgrade gradle . --use-implementation-dependencies --ignore-unknown-versions
/// ```
#[derive(Args, Debug)]
pub struct GradleCommand {
    /// Directory holding the root pom.xml
    #[arg(value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    #[command(flatten)]
    pub conversion: ConversionArgs,

    /// Maven settings file to read repository mirrors from
    /// (defaults to ~/.m2/settings.xml)
    #[arg(long, value_name = "FILE")]
    pub maven_settings: Option<PathBuf>,
}

impl GradleCommand {
    pub async fn execute(self, global: &GlobalConfig) -> Result<()> {
        let options = self.conversion.to_options(global)?;
        let build = load_build(&self.directory, options).await?;

        let mirrors = self
            .maven_settings
            .or_else(default_settings_path)
            .map(|path| read_mirrors(&path))
            .unwrap_or_default();
        tracing::debug!("Using {} repository mirror(s)", mirrors.len());

        let emitter = GradleEmitter::new(ConversionRegistry::with_builtin())?.with_mirrors(mirrors);
        let summary = write_tree(&emitter, &build.workspace, build.root, &build.modules)
            .with_context(|| format!("Failed to write Gradle files under {}", self.directory.display()))?;

        println!(
            "{} Generated {} Gradle file(s) for {} module(s)",
            "✓".green(),
            summary.written.len(),
            build.modules.len()
        );
        for (from, to) in &summary.backups {
            println!("  {} moved {} to {}", "⚠".yellow(), from.display(), to.display());
        }
        Ok(())
    }
}
