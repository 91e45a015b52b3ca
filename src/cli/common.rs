//! Flags and setup shared by the conversion commands.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::{ConversionOptions, GlobalConfig, parse_coordinate_list};
use crate::core::PomError;
use crate::descriptor::DescriptorId;
use crate::maven::EffectivePomService;
use crate::project::Workspace;
use crate::resolver::ModuleGraph;

/// Options that steer how descriptors are resolved.
///
/// Flags given here override the global configuration file, which overrides
/// the built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct ConversionArgs {
    /// Resolve values through `mvn help:effective-pom` (default)
    #[arg(long, overrides_with = "no_use_effective_pom")]
    pub use_effective_pom: bool,

    /// Resolve raw descriptors only, without running Maven
    #[arg(long, overrides_with = "use_effective_pom")]
    pub no_use_effective_pom: bool,

    /// Regenerate target/effective-pom.xml even if it exists (default)
    #[arg(long, overrides_with = "no_force_generate_effective_pom")]
    pub force_generate_effective_pom: bool,

    /// Reuse an existing target/effective-pom.xml
    #[arg(long, overrides_with = "force_generate_effective_pom")]
    pub no_force_generate_effective_pom: bool,

    /// Map compile scope to the `api` configuration (default)
    #[arg(long)]
    pub use_api_dependencies: bool,

    /// Map compile scope to the `implementation` configuration
    #[arg(long)]
    pub use_implementation_dependencies: bool,

    /// Write dependency versions inline instead of `val ver_*` variables
    #[arg(long)]
    pub inline_versions: bool,

    /// Skip dependencies without a resolvable version instead of failing
    #[arg(long)]
    pub ignore_unknown_versions: bool,

    /// Fail when a descriptor declares no Java version
    #[arg(long)]
    pub fail_on_unknown_java_version: bool,

    /// Java version used when a descriptor declares none
    #[arg(long, value_name = "VERSION")]
    pub default_java_version: Option<String>,

    /// Coordinates whose provided scope also feeds tests, e.g. `:g1:a1:,:g2:a2:`
    #[arg(long, value_name = "LIST")]
    pub force_provided_for_tests: Option<String>,

    /// Extra annotation processor coordinates, e.g. `g1:a1,g2:a2`
    #[arg(long, value_name = "LIST")]
    pub annotation_processors: Option<String>,

    /// Local Maven repository used for parent lookups
    #[arg(long, value_name = "DIR")]
    pub local_repository: Option<PathBuf>,

    /// Fail on unknown top-level descriptor elements
    #[arg(long)]
    pub fail_on_unknown_elements: bool,
}

impl ConversionArgs {
    /// Merge the flags over `global` and the defaults.
    pub fn to_options(&self, global: &GlobalConfig) -> Result<ConversionOptions, PomError> {
        if self.use_api_dependencies && self.use_implementation_dependencies {
            return Err(PomError::ConflictingDependencyMode);
        }

        let mut options = ConversionOptions::default().with_global(global);
        if self.no_use_effective_pom {
            options.use_effective_pom = false;
        }
        if self.no_force_generate_effective_pom {
            options.force_generate_effective_pom = false;
        }
        if self.use_implementation_dependencies {
            options.api_dependencies = false;
        }
        options.inline_versions |= self.inline_versions;
        options.ignore_unknown_versions |= self.ignore_unknown_versions;
        if self.fail_on_unknown_java_version {
            options.ignore_unknown_java_version = false;
        }
        if self.fail_on_unknown_elements {
            options.ignore_unknown_elements = false;
        }
        if let Some(version) = &self.default_java_version {
            options.default_java_version.clone_from(version);
        }
        if let Some(list) = &self.force_provided_for_tests {
            options.force_provided_for_tests = parse_coordinate_list(list);
        }
        if let Some(list) = &self.annotation_processors {
            options.extra_annotation_processors.extend(parse_coordinate_list(list));
        }
        if let Some(repo) = &self.local_repository {
            options.local_repository.clone_from(repo);
        }
        Ok(options)
    }
}

/// A loaded build: the workspace, its root descriptor, and the module registry.
#[derive(Debug)]
pub struct LoadedBuild {
    pub workspace: Workspace,
    pub root: DescriptorId,
    pub modules: ModuleGraph,
}

/// Compute effective descriptors if enabled, then load the tree under `directory`.
pub async fn load_build(directory: &Path, options: ConversionOptions) -> Result<LoadedBuild> {
    if !directory.is_dir() {
        return Err(PomError::DescriptorNotFound {
            path: directory.display().to_string(),
        }
        .into());
    }

    let effective = EffectivePomService::new(&options).load(directory).await?;
    let mut workspace = Workspace::new(options);
    if let Some(projects) = effective {
        workspace = workspace.with_effective_projects(projects);
    }

    let root = workspace
        .load(directory)
        .with_context(|| format!("Failed to load descriptors in {}", directory.display()))?;
    let modules = ModuleGraph::build(&mut workspace, root)?;
    tracing::debug!(
        "Loaded {} descriptor(s) with {} module(s) from {}",
        workspace.len(),
        modules.len(),
        directory.display()
    );
    Ok(LoadedBuild {
        workspace,
        root,
        modules,
    })
}
