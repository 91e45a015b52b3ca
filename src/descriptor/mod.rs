//! In-memory model of Maven project descriptors.
//!
//! A [`Descriptor`] is one node of the configuration tree: its identity, the
//! `<parent>` reference, the property bag declared directly on it, dependency
//! lists, modules, and plugins. Values are stored exactly as written in the
//! file; inheritance and interpolation happen later in [`crate::project`] and
//! [`crate::resolver`].
//!
//! Relationship fields (`parent`, `parent_directory`, `effective`) are not part of
//! the parsed value. They are filled by the loader through the write-once
//! setters on [`crate::project::Workspace`].

pub mod parser;
pub mod xml;

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_PLUGIN_GROUP_ID, DEFAULT_VERSION};

pub use parser::{parse_descriptor, parse_descriptor_str, parse_effective_projects};

/// Index of a descriptor inside a [`crate::project::Workspace`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(pub(crate) usize);

impl DescriptorId {
    /// Position of the descriptor in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The `<parent>` block of a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentRef {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub relative_path: Option<String>,
}

impl ParentRef {
    /// `group:artifact` of the declared parent.
    #[must_use]
    pub fn ga(&self) -> String {
        format!(
            "{}:{}",
            self.group_id.as_deref().unwrap_or_default(),
            self.artifact_id.as_deref().unwrap_or_default()
        )
    }

    /// `group:artifact:version` of the declared parent.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}:{}", self.ga(), self.version.as_deref().unwrap_or(DEFAULT_VERSION))
    }
}

/// A `<dependency>` entry, from either `<dependencies>` or `<dependencyManagement>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependency {
    pub group_id: Option<String>,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub dep_type: Option<String>,
    pub classifier: Option<String>,
    pub optional: bool,
    pub exclusions: Vec<Exclusion>,
}

impl Dependency {
    /// Create a dependency with just a coordinate; mostly useful in tests.
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: Some(group_id.into()),
            artifact_id: artifact_id.into(),
            ..Self::default()
        }
    }

    /// Builder-style version setter.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Builder-style scope setter.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// `group:artifact` as written.
    #[must_use]
    pub fn ga(&self) -> String {
        format!("{}:{}", self.group_id.as_deref().unwrap_or_default(), self.artifact_id)
    }

    /// `:group:artifact:`, delimited on both sides so substring checks are exact.
    #[must_use]
    pub fn ga_full(&self) -> String {
        format!(":{}:{}:", self.group_id.as_deref().unwrap_or_default(), self.artifact_id)
    }

    /// Whether the dependency points at another artifact's test classes.
    #[must_use]
    pub fn is_test_jar(&self) -> bool {
        self.dep_type.as_deref() == Some("test-jar") || self.classifier.as_deref() == Some("tests")
    }

    /// Whether this entry names the given coordinate.
    #[must_use]
    pub fn matches(&self, group_id: &str, artifact_id: &str) -> bool {
        self.group_id.as_deref() == Some(group_id) && self.artifact_id == artifact_id
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ga(), self.version.as_deref().unwrap_or("?"))?;
        if let Some(scope) = &self.scope {
            write!(f, " ({scope})")?;
        }
        Ok(())
    }
}

/// An `<exclusion>` inside a dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusion {
    pub group_id: String,
    pub artifact_id: String,
}

/// Flattened `<configuration>` of a plugin or execution.
///
/// Simple children become `key → text`. Children that hold repeated elements
/// (`<excludes><exclude>…</exclude></excludes>`) are kept as lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginConfiguration {
    pub values: BTreeMap<String, String>,
    pub lists: BTreeMap<String, Vec<String>>,
}

impl PluginConfiguration {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str).filter(|v| !v.trim().is_empty())
    }

    #[must_use]
    pub fn list(&self, key: &str) -> &[String] {
        self.lists.get(key).map_or(&[], Vec::as_slice)
    }

    /// `<skip>true</skip>` or `<skip>skip</skip>`.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self.get("skip"), Some("true" | "skip"))
    }
}

/// An `<execution>` of a plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Execution {
    pub id: Option<String>,
    pub phase: Option<String>,
    pub goals: Vec<String>,
    pub configuration: Option<PluginConfiguration>,
    /// `Some(false)` marks the execution as not propagated to child descriptors.
    pub inherited: Option<bool>,
}

/// A `<build><plugins><plugin>` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plugin {
    pub group_id: Option<String>,
    pub artifact_id: String,
    pub version: Option<String>,
    /// `Some(false)` keeps the whole plugin out of child descriptors.
    pub inherited: Option<bool>,
    pub executions: Vec<Execution>,
    pub configuration: PluginConfiguration,
}

impl Plugin {
    /// Group id, defaulting to `org.apache.maven.plugins` like Maven does.
    #[must_use]
    pub fn effective_group_id(&self) -> &str {
        self.group_id.as_deref().unwrap_or(DEFAULT_PLUGIN_GROUP_ID)
    }

    #[must_use]
    pub fn ga(&self) -> String {
        format!("{}:{}", self.effective_group_id(), self.artifact_id)
    }

    #[must_use]
    pub fn same_plugin(&self, other: &Plugin) -> bool {
        self.effective_group_id() == other.effective_group_id()
            && self.artifact_id == other.artifact_id
    }
}

impl fmt::Display for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ga(), self.version.as_deref().unwrap_or_default())
    }
}

/// Directory layout from `<build>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildPaths {
    pub source_directory: Option<String>,
    pub test_source_directory: Option<String>,
    pub output_directory: Option<String>,
    pub test_output_directory: Option<String>,
    pub directory: Option<String>,
    pub final_name: Option<String>,
}

/// One project descriptor.
#[derive(Debug, Clone, Default)]
pub struct Descriptor {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
    pub name: Option<String>,
    pub parent_ref: Option<ParentRef>,
    /// Properties declared directly on this descriptor, not inherited ones.
    pub properties: BTreeMap<String, String>,
    pub dependencies: Vec<Dependency>,
    pub dependency_management: Vec<Dependency>,
    pub modules: Vec<String>,
    pub plugins: Vec<Plugin>,
    pub build: BuildPaths,
    /// Absolute path of the backing file.
    pub source_file: PathBuf,

    pub(crate) parent: Option<DescriptorId>,
    pub(crate) parent_directory: Option<DescriptorId>,
    pub(crate) effective: OnceCell<Option<usize>>,
}

impl Descriptor {
    /// Version, or `SNAPSHOT` when none is declared or inherited.
    #[must_use]
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_VERSION)
    }

    /// `group:artifact`.
    #[must_use]
    pub fn ga(&self) -> String {
        format!(
            "{}:{}",
            self.group_id.as_deref().unwrap_or_default(),
            self.artifact_id.as_deref().unwrap_or_default()
        )
    }

    /// `group:artifact:version`.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}:{}", self.ga(), self.version())
    }

    /// `group:artifact:version@[path]`, used in error and log messages.
    #[must_use]
    pub fn id_and_path(&self) -> String {
        format!("{}@[{}]", self.id(), self.source_file.display())
    }

    /// Whether the descriptor carries the given group and artifact.
    #[must_use]
    pub fn has_ga(&self, group_id: Option<&str>, artifact_id: Option<&str>) -> bool {
        group_id.is_some()
            && artifact_id.is_some()
            && self.group_id.as_deref() == group_id
            && self.artifact_id.as_deref() == artifact_id
    }

    /// Directory containing the backing file.
    #[must_use]
    pub fn directory(&self) -> &Path {
        self.source_file.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Resolved inheritance parent, once the loader has linked it.
    #[must_use]
    pub const fn parent(&self) -> Option<DescriptorId> {
        self.parent
    }

    /// Aggregator that lists this descriptor as a module, set by the module walk.
    #[must_use]
    pub const fn parent_directory(&self) -> Option<DescriptorId> {
        self.parent_directory
    }

    /// The `maven-compiler-plugin` entry, if declared.
    #[must_use]
    pub fn compiler_plugin(&self) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.artifact_id == "maven-compiler-plugin")
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
