//! Command-line interface for pomgrade.
//!
//! The CLI is built with [`clap`] derive. Every subcommand lives in its own
//! module and exposes an async `execute` method that receives the loaded
//! [`GlobalConfig`].
//!
//! # Commands
//!
//! - `gradle` - convert a Maven build to Gradle Kotlin DSL files
//! - `validate` - resolve everything a conversion needs without writing files
//! - `graph` - export the dependencies between modules as JSON
//!
//! # Global Options
//!
//! - `-v, --verbose` - more logging (`-v` debug, `-vv` trace)
//! - `-q, --quiet` - errors only
//! - `--config <FILE>` - global configuration file
//! - `--no-color` - plain output
//!
//! `RUST_LOG` takes precedence over the verbosity flags.
//!
//! # Examples
//!
//! ```bash
//! pomgrade gradle .
//! pomgrade -v gradle ../service --no-use-effective-pom
//! pomgrade validate . --json
//! pomgrade graph . --output modules.json
//! ```

pub mod common;
mod gradle;
mod graph;
mod validate;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::GlobalConfig;

pub use common::{ConversionArgs, LoadedBuild, load_build};
pub use validate::{ValidationReport, validate_build};

/// Convert Maven builds to Gradle Kotlin DSL.
#[derive(Parser, Debug)]
#[command(
    name = "pomgrade",
    about = "Convert Maven pom.xml builds to Gradle Kotlin DSL",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase logging (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the global configuration file (default ~/.pomgrade/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write settings.gradle.kts and build.gradle.kts files next to the descriptors
    Gradle(gradle::GradleCommand),

    /// Resolve the whole build without writing files
    Validate(validate::ValidateCommand),

    /// Print the module dependency graph as JSON
    Graph(graph::GraphCommand),
}

/// Process-level settings derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub no_color: bool,
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Install the tracing subscriber and the color override.
    ///
    /// Logs go to stderr so command output on stdout stays machine readable.
    pub fn apply(&self) {
        if self.no_color {
            colored::control::set_override(false);
        }
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(!self.no_color)
            .try_init();
    }
}

impl Cli {
    /// Run the parsed command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        };
        CliConfig {
            log_level: log_level.to_string(),
            no_color: self.no_color || no_color_requested(std::env::var_os("NO_COLOR").as_deref()),
            config_path: self.config.clone(),
        }
    }

    /// Run with an explicit [`CliConfig`] instead of one built from the flags.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.apply();
        let global = GlobalConfig::load_with_optional(config.config_path.clone()).await?;

        match self.command {
            Commands::Gradle(cmd) => cmd.execute(&global).await,
            Commands::Validate(cmd) => cmd.execute(&global).await,
            Commands::Graph(cmd) => cmd.execute(&global).await,
        }
    }
}

/// `NO_COLOR` disables color when set to a non-empty value.
fn no_color_requested(value: Option<&std::ffi::OsStr>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}
