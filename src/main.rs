//! pomgrade CLI entry point
//!
//! Parses the command line, runs the selected command, and prints failures
//! with suggestions:
//! - `gradle` - convert a Maven build to Gradle Kotlin DSL
//! - `validate` - check that a build converts cleanly
//! - `graph` - export the module dependency graph

use anyhow::Result;
use clap::Parser;
use pomgrade_cli::cli;
use pomgrade_cli::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
