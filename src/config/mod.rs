//! Run configuration for the conversion engine.
//!
//! Configuration comes from three layers, later layers overriding earlier ones:
//! 1. Built-in defaults ([`ConversionOptions::default`])
//! 2. The optional global file `~/.pomgrade/config.toml` ([`GlobalConfig`])
//! 3. Command-line flags
//!
//! The merged [`ConversionOptions`] value is immutable for the rest of the run and
//! is passed explicitly to the [`crate::project::Workspace`]; nothing reads
//! configuration from process-wide state.

mod global;

pub use global::GlobalConfig;

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::constants::DEFAULT_JAVA_VERSION;

/// Options that steer loading, resolution, and emission.
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Compute effective descriptors with `mvn help:effective-pom`.
    pub use_effective_pom: bool,
    /// Regenerate the effective descriptor file even if it exists.
    pub force_generate_effective_pom: bool,
    /// Map compile scope to `api` instead of `implementation`.
    pub api_dependencies: bool,
    /// Write versions inline instead of through `val ver_*` variables.
    pub inline_versions: bool,
    /// Skip dependencies whose version cannot be resolved instead of failing.
    pub ignore_unknown_versions: bool,
    /// Fall back to [`Self::default_java_version`] instead of failing.
    pub ignore_unknown_java_version: bool,
    pub default_java_version: String,
    /// `group:artifact` coordinates whose `provided` scope also feeds tests.
    pub force_provided_for_tests: BTreeSet<String>,
    /// `group:artifact` coordinates treated as annotation processors in
    /// addition to the built-in table.
    pub extra_annotation_processors: BTreeSet<String>,
    /// Root of the local Maven repository used for parent lookups.
    pub local_repository: PathBuf,
    /// Ignore unknown elements in descriptors instead of failing.
    pub ignore_unknown_elements: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            use_effective_pom: true,
            force_generate_effective_pom: true,
            api_dependencies: true,
            inline_versions: false,
            ignore_unknown_versions: false,
            ignore_unknown_java_version: true,
            default_java_version: DEFAULT_JAVA_VERSION.to_string(),
            force_provided_for_tests: BTreeSet::from(["org.apache.maven:maven-compat".to_string()]),
            extra_annotation_processors: BTreeSet::new(),
            local_repository: default_local_repository(),
            ignore_unknown_elements: true,
        }
    }
}

impl ConversionOptions {
    /// Options for resolving raw descriptors only, without the Maven subprocess.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            use_effective_pom: false,
            ..Self::default()
        }
    }

    /// Apply values from the global configuration file.
    #[must_use]
    pub fn with_global(mut self, global: &GlobalConfig) -> Self {
        if let Some(repo) = &global.local_repository {
            self.local_repository.clone_from(repo);
        }
        if let Some(java) = &global.default_java_version {
            self.default_java_version.clone_from(java);
        }
        if let Some(forced) = &global.force_provided_for_tests {
            self.force_provided_for_tests = forced.iter().map(|c| normalize_coordinate(c)).collect();
        }
        self.extra_annotation_processors
            .extend(global.annotation_processors.iter().map(|c| normalize_coordinate(c)));
        self
    }

    /// Whether `group:artifact` is listed in the provided-for-tests override set.
    #[must_use]
    pub fn provided_for_tests(&self, group_id: &str, artifact_id: &str) -> bool {
        self.force_provided_for_tests.contains(&format!("{group_id}:{artifact_id}"))
    }
}

/// Parse a list of coordinates such as `:g1:a1:,:g2:a2:` or `g1:a1,g2:a2`.
#[must_use]
pub fn parse_coordinate_list(list: &str) -> BTreeSet<String> {
    list.split([',', ';'])
        .map(normalize_coordinate)
        .filter(|c| !c.is_empty())
        .collect()
}

fn normalize_coordinate(coordinate: &str) -> String {
    coordinate.trim().trim_matches(|c: char| c == ':' || c == '[' || c == ']').to_string()
}

/// `~/.m2/repository`, or a relative fallback when the home directory is unknown.
#[must_use]
pub fn default_local_repository() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".m2").join("repository"))
        .unwrap_or_else(|| PathBuf::from(".m2/repository"))
}
