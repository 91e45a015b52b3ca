//! Check that a Maven build can be converted without writing anything.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::common::{ConversionArgs, LoadedBuild, load_build};
use crate::config::GlobalConfig;
use crate::plugins::{ConversionRegistry, collect_plugins};
use crate::resolver::{DependencyProcessor, ModuleDependencyGraph, java_version};

/// Run loading, module registration, and dependency resolution for every
/// descriptor, failing on the first fatal error.
///
/// # Examples
///
/// ```bash
/// pomgrade validate .
/// pomgrade validate . --no-use-effective-pom --json
/// ```
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Directory holding the root pom.xml
    #[arg(value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    #[command(flatten)]
    pub conversion: ConversionArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Counts gathered while validating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub descriptors: usize,
    pub modules: usize,
    pub declarations: usize,
    pub plugin_fragments: usize,
    pub module_edges: usize,
}

impl ValidateCommand {
    pub async fn execute(self, global: &GlobalConfig) -> Result<()> {
        let options = self.conversion.to_options(global)?;
        let build = load_build(&self.directory, options).await?;
        let report = validate_build(&build)
            .with_context(|| format!("Validation failed for {}", self.directory.display()))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{} {} is convertible", "✓".green(), self.directory.display());
            println!("  descriptors:     {}", report.descriptors);
            println!("  modules:         {}", report.modules);
            println!("  declarations:    {}", report.declarations);
            println!("  plugin fragments: {}", report.plugin_fragments);
            println!("  module edges:    {}", report.module_edges);
        }
        Ok(())
    }
}

/// Resolve everything the Gradle files would need for the root and each module.
pub fn validate_build(build: &LoadedBuild) -> Result<ValidationReport> {
    let LoadedBuild {
        workspace,
        root,
        modules,
    } = build;
    let registry = ConversionRegistry::with_builtin();
    let processor = DependencyProcessor::new(workspace, modules);
    let mut report = ValidationReport {
        descriptors: workspace.len(),
        modules: modules.len(),
        ..ValidationReport::default()
    };

    let targets = std::iter::once(*root).chain(modules.entries().iter().map(|entry| entry.id));
    for id in targets {
        java_version(workspace, id)?;
        report.declarations += processor.declarations(id)?.declarations.len();
        report.plugin_fragments += collect_plugins(workspace, &registry, id)?.fragments.len();
        tracing::debug!("Validated {}", workspace[id].ga());
    }

    let graph = ModuleDependencyGraph::build(&processor, modules)?;
    graph.detect_cycles()?;
    report.module_edges = graph.edge_count();
    Ok(report)
}
