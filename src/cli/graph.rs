//! Export the dependencies between the modules of a build.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::common::{ConversionArgs, load_build};
use crate::config::GlobalConfig;
use crate::resolver::{DependencyProcessor, ModuleDependencyGraph};
use crate::utils::safe_write;

/// Write the module dependency graph as JSON.
///
/// ```bash
/// pomgrade graph . --no-use-effective-pom
/// pomgrade graph . --output modules.json
/// ```
#[derive(Args, Debug)]
pub struct GraphCommand {
    /// Directory holding the root pom.xml
    #[arg(value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    #[command(flatten)]
    pub conversion: ConversionArgs,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GraphCommand {
    pub async fn execute(self, global: &GlobalConfig) -> Result<()> {
        let options = self.conversion.to_options(global)?;
        let build = load_build(&self.directory, options).await?;
        let json = render_graph(&build)?;

        match &self.output {
            Some(path) => {
                safe_write(path, &json)
                    .with_context(|| format!("Failed to write graph to {}", path.display()))?;
                tracing::info!("Wrote module graph to {}", path.display());
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}

fn render_graph(build: &super::common::LoadedBuild) -> Result<String> {
    let processor = DependencyProcessor::new(&build.workspace, &build.modules);
    let graph = ModuleDependencyGraph::build(&processor, &build.modules)?;
    if let Err(error) = graph.detect_cycles() {
        tracing::warn!("{error}");
    }
    Ok(serde_json::to_string_pretty(&graph.export())?)
}
