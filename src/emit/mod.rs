//! Gradle Kotlin DSL emission.
//!
//! The [`GradleEmitter`] turns resolved descriptors into `settings.gradle.kts`
//! and `build.gradle.kts` text with [`tera`] templates compiled once per
//! emitter. [`write_tree`] writes the files of a whole build next to the
//! descriptors they were generated from.

pub mod mirrors;
mod templates;
mod writer;

use serde::Serialize;
use tera::{Context, Tera};

pub use mirrors::{Mirror, default_settings_path, read_mirrors};
pub use writer::{WriteSummary, write_tree};

use crate::constants::LOMBOK_GRADLE_PLUGIN;
use crate::core::PomError;
use crate::descriptor::DescriptorId;
use crate::plugins::{ConversionRegistry, GradlePlugin, PluginFragment, collect_plugins};
use crate::project::Workspace;
use crate::resolver::{
    DependencyPlan, DependencyProcessor, ModuleGraph, VersionVariable, descriptor_group_id,
    interpolate, java_version,
};
use templates::{BUILD_TEMPLATE, BUILD_TEMPLATE_NAME, SETTINGS_TEMPLATE, SETTINGS_TEMPLATE_NAME};

/// Values rendered into `settings.gradle.kts`.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsContext {
    pub root_name: String,
    pub mirrors: Vec<Mirror>,
    /// Module paths in walk order, without the leading `:`.
    pub includes: Vec<String>,
}

/// Values rendered into one `build.gradle.kts`.
#[derive(Debug, Clone, Serialize)]
pub struct BuildContext {
    pub group: String,
    pub version: String,
    pub java_version: String,
    pub plugins: Vec<GradlePlugin>,
    pub variables: Vec<VersionVariable>,
    /// Rendered dependency declarations.
    pub dependencies: Vec<String>,
    pub fragments: Vec<PluginFragment>,
    /// Compiler plugin `<excludes>`.
    pub excludes: Vec<String>,
}

/// Renders Gradle files for the descriptors of a workspace.
#[derive(Debug)]
pub struct GradleEmitter {
    tera: Tera,
    registry: ConversionRegistry,
    mirrors: Vec<Mirror>,
}

impl GradleEmitter {
    /// Compile the templates and use `registry` for plugin conversions.
    pub fn new(registry: ConversionRegistry) -> Result<Self, PomError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(vec![
            (SETTINGS_TEMPLATE_NAME, SETTINGS_TEMPLATE),
            (BUILD_TEMPLATE_NAME, BUILD_TEMPLATE),
        ])
        .map_err(|e| template_error(&e))?;
        Ok(Self {
            tera,
            registry,
            mirrors: Vec::new(),
        })
    }

    /// Repository mirrors to declare in the settings file.
    #[must_use]
    pub fn with_mirrors(mut self, mirrors: Vec<Mirror>) -> Self {
        self.mirrors = mirrors;
        self
    }

    pub fn settings_context(&self, workspace: &Workspace, root: DescriptorId, modules: &ModuleGraph) -> SettingsContext {
        SettingsContext {
            root_name: workspace[root]
                .artifact_id
                .clone()
                .unwrap_or_else(|| "rootProject".to_string()),
            mirrors: self.mirrors.clone(),
            includes: modules.entries().iter().map(|e| e.path.clone()).collect(),
        }
    }

    pub fn render_settings(
        &self,
        workspace: &Workspace,
        root: DescriptorId,
        modules: &ModuleGraph,
    ) -> Result<String, PomError> {
        let ctx = self.settings_context(workspace, root, modules);
        self.render(SETTINGS_TEMPLATE_NAME, &ctx)
    }

    /// Resolve everything the build file of descriptor `id` needs.
    pub fn build_context(
        &self,
        workspace: &Workspace,
        modules: &ModuleGraph,
        id: DescriptorId,
    ) -> Result<BuildContext, PomError> {
        let mut plugin_output = collect_plugins(workspace, &self.registry, id)?;
        let DependencyPlan {
            declarations,
            variables,
            uses_lombok,
        } = DependencyProcessor::new(workspace, modules).declarations(id)?;
        if uses_lombok {
            let (plugin, version) = LOMBOK_GRADLE_PLUGIN;
            plugin_output.add_gradle_plugin(GradlePlugin::new(plugin, Some(version)));
        }

        let excludes = workspace
            .effective_or_raw(id)
            .compiler_plugin()
            .map(|plugin| plugin.configuration.list("excludes").to_vec())
            .unwrap_or_default();

        Ok(BuildContext {
            group: descriptor_group_id(workspace, id)?.unwrap_or_default(),
            version: interpolate(workspace, workspace[id].version(), id)?,
            java_version: java_version(workspace, id)?,
            plugins: plugin_output.gradle_plugins,
            variables,
            dependencies: declarations.iter().map(|d| d.render()).collect(),
            fragments: plugin_output.fragments,
            excludes,
        })
    }

    pub fn render_build(
        &self,
        workspace: &Workspace,
        modules: &ModuleGraph,
        id: DescriptorId,
    ) -> Result<String, PomError> {
        let ctx = self.build_context(workspace, modules, id)?;
        tracing::debug!(
            "Rendering build file for {} with {} dependencies and {} plugin fragment(s)",
            workspace[id].ga(),
            ctx.dependencies.len(),
            ctx.fragments.len()
        );
        self.render(BUILD_TEMPLATE_NAME, &ctx)
    }

    fn render<T: Serialize>(&self, template: &str, value: &T) -> Result<String, PomError> {
        let context = Context::from_serialize(value).map_err(|e| template_error(&e))?;
        self.tera.render(template, &context).map_err(|e| template_error(&e))
    }
}

fn template_error(error: &tera::Error) -> PomError {
    let mut reason = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    PomError::TemplateError { reason }
}
