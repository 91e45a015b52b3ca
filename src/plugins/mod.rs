//! Maven plugin executions and their Gradle conversions.
//!
//! Each Maven plugin execution is identified by a [`PluginKey`]
//! (`group:artifact:goal`). The [`ConversionRegistry`] maps keys to
//! [`PluginConversion`] handlers; executions without a handler are skipped.
//! Handlers are registered explicitly, usually through
//! [`ConversionRegistry::with_builtin`].
//!
//! # Adding a conversion
//!
//! ```rust,no_run
//! use pomgrade_cli::core::PomError;
//! use pomgrade_cli::descriptor::Descriptor;
//! use pomgrade_cli::plugins::{ConversionRegistry, ExecutionContext, PluginConversion, PluginKey};
//!
//! struct Enforcer;
//!
//! impl PluginConversion for Enforcer {
//!     fn name(&self) -> &str {
//!         "enforcer"
//!     }
//!
//!     fn convert(&self, _ctx: &ExecutionContext<'_>, _owner: &Descriptor) -> Result<Option<String>, PomError> {
//!         Ok(Some("// enforcer rules are not converted".to_string()))
//!     }
//! }
//!
//! let mut registry = ConversionRegistry::with_builtin();
//! registry.register(
//!     PluginKey::new("org.apache.maven.plugins", "maven-enforcer-plugin", "enforce"),
//!     Box::new(Enforcer),
//! );
//! ```

pub mod builtin;
pub mod executions;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::core::PomError;
use crate::descriptor::{Descriptor, Plugin, PluginConfiguration};

pub use executions::{PluginFragment, PluginOutput, collect_plugins};

/// `group:artifact:goal` of a plugin execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginKey {
    pub group_id: String,
    pub artifact_id: String,
    pub goal: String,
}

impl PluginKey {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        goal: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            goal: goal.into(),
        }
    }
}

impl fmt::Display for PluginKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.goal)
    }
}

/// One merged execution of a plugin goal.
#[derive(Debug, Clone)]
pub struct ExecutionContext<'a> {
    /// Plugin declaration the execution came from.
    pub plugin: &'a Plugin,
    pub goal: String,
    /// Execution configuration, or the plugin's when the execution has none.
    pub configuration: &'a PluginConfiguration,
}

impl ExecutionContext<'_> {
    #[must_use]
    pub fn key(&self) -> PluginKey {
        PluginKey::new(self.plugin.effective_group_id(), &self.plugin.artifact_id, &self.goal)
    }
}

/// A Gradle plugin id with an optional version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradlePlugin {
    pub id: String,
    pub version: Option<String>,
}

impl GradlePlugin {
    pub fn new(id: impl Into<String>, version: Option<&str>) -> Self {
        Self {
            id: id.into(),
            version: version.map(str::to_string),
        }
    }
}

/// Converts one Maven plugin goal into a Gradle build script fragment.
pub trait PluginConversion: Send + Sync {
    /// Short name used in fragment comments.
    fn name(&self) -> &str;

    /// Gradle plugin to apply when this conversion runs.
    fn gradle_plugin(&self) -> Option<GradlePlugin> {
        None
    }

    /// Whether the execution should be converted at all.
    fn is_enabled(&self, _ctx: &ExecutionContext<'_>, _owner: &Descriptor) -> bool {
        true
    }

    /// Build script fragment for the execution; `None` or blank adds nothing.
    fn convert(
        &self,
        ctx: &ExecutionContext<'_>,
        owner: &Descriptor,
    ) -> Result<Option<String>, PomError>;
}

/// Registry of plugin conversions keyed by [`PluginKey`].
#[derive(Default)]
pub struct ConversionRegistry {
    conversions: HashMap<PluginKey, Box<dyn PluginConversion>>,
}

impl ConversionRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in conversion registered.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        builtin::register_all(&mut registry);
        registry
    }

    /// Register a conversion, replacing any previous one for the same key.
    pub fn register(&mut self, key: PluginKey, conversion: Box<dyn PluginConversion>) {
        tracing::trace!("Registering plugin conversion {} for {key}", conversion.name());
        self.conversions.insert(key, conversion);
    }

    #[must_use]
    pub fn get(&self, key: &PluginKey) -> Option<&dyn PluginConversion> {
        self.conversions.get(key).map(|c| &**c)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }
}

impl fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.conversions.keys().map(ToString::to_string).collect();
        keys.sort();
        f.debug_struct("ConversionRegistry").field("keys", &keys).finish()
    }
}
