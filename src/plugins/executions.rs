//! Merging plugin executions across the inheritance chain.
//!
//! With an effective descriptor the executions are read from it directly,
//! since Maven already merged them. Without one, plugins are discovered on
//! the descriptor and its ancestors, and the executions of each plugin are
//! merged from the same chain: duplicates (same execution id and goal) keep
//! the closest declaration, and plugins or executions marked
//! `<inherited>false` are only honored on the descriptor that declares them.

use std::collections::HashSet;

use serde::Serialize;

use super::{ConversionRegistry, ExecutionContext, GradlePlugin};
use crate::constants::DEFAULT_EXECUTION_GOAL;
use crate::core::PomError;
use crate::descriptor::{DescriptorId, Plugin};
use crate::project::Workspace;

/// A converted plugin execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginFragment {
    /// Conversion name.
    pub name: String,
    /// `group:artifact:goal` that triggered the conversion.
    pub maven_key: String,
    pub gradle_plugin: Option<String>,
    pub body: String,
}

/// Everything the plugin conversions contribute to one build file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginOutput {
    /// Gradle plugins in registration order, one entry per id.
    pub gradle_plugins: Vec<GradlePlugin>,
    pub fragments: Vec<PluginFragment>,
}

impl PluginOutput {
    /// Add a Gradle plugin. An existing entry is only replaced by one that
    /// carries a version.
    pub fn add_gradle_plugin(&mut self, plugin: GradlePlugin) {
        match self.gradle_plugins.iter_mut().find(|p| p.id == plugin.id) {
            Some(existing) if plugin.version.is_some() => *existing = plugin,
            Some(_) => {}
            None => self.gradle_plugins.push(plugin),
        }
    }
}

/// Run every registered conversion for the plugins of descriptor `id`.
pub fn collect_plugins(
    workspace: &Workspace,
    registry: &ConversionRegistry,
    id: DescriptorId,
) -> Result<PluginOutput, PomError> {
    let owner = &workspace[id];
    let mut output = PluginOutput::default();
    let mut visited = HashSet::new();

    let sources: Vec<&Plugin> = match workspace.effective_of(id) {
        Some(effective) => effective.plugins.iter().collect(),
        None => workspace
            .ancestors(id)
            .flat_map(|ancestor| workspace[ancestor].plugins.iter())
            .collect(),
    };

    for plugin in sources {
        if !visited.insert(plugin.ga()) {
            continue;
        }
        let contexts = match workspace.effective_of(id) {
            Some(effective) => effective_executions(plugin, &effective.plugins),
            None => inherited_executions(workspace, plugin, id),
        };

        for ctx in contexts {
            let key = ctx.key();
            let Some(conversion) = registry.get(&key) else {
                tracing::trace!("No conversion for {key}");
                continue;
            };
            if !conversion.is_enabled(&ctx, owner) {
                tracing::debug!("Conversion {} disabled for {key} in {}", conversion.name(), owner.ga());
                continue;
            }
            tracing::debug!("Processing plugin execution {key} in {}", owner.ga());

            let gradle_plugin = conversion.gradle_plugin();
            if let Some(gradle) = &gradle_plugin {
                output.add_gradle_plugin(gradle.clone());
            }
            if let Some(body) = conversion.convert(&ctx, owner)?
                && !body.trim().is_empty()
            {
                output.fragments.push(PluginFragment {
                    name: conversion.name().to_string(),
                    maven_key: key.to_string(),
                    gradle_plugin: gradle_plugin.map(|p| p.id),
                    body: body.trim().to_string(),
                });
            }
        }
    }
    Ok(output)
}

/// Executions of `plugin` as listed in an effective descriptor.
fn effective_executions<'a>(plugin: &Plugin, plugins: &'a [Plugin]) -> Vec<ExecutionContext<'a>> {
    let mut result = Vec::new();
    for declared in plugins.iter().filter(|p| p.same_plugin(plugin)) {
        for execution in &declared.executions {
            for goal in &execution.goals {
                result.push(ExecutionContext {
                    plugin: declared,
                    goal: goal.clone(),
                    configuration: execution.configuration.as_ref().unwrap_or(&declared.configuration),
                });
            }
        }
        if declared.executions.is_empty() {
            result.push(default_execution(declared));
        }
    }
    result
}

/// Executions of `plugin` merged from descriptor `id` and its ancestors.
fn inherited_executions<'a>(
    workspace: &'a Workspace,
    plugin: &Plugin,
    id: DescriptorId,
) -> Vec<ExecutionContext<'a>> {
    let mut result = Vec::new();
    let mut seen = HashSet::new();

    for ancestor in workspace.ancestors(id) {
        for declared in workspace[ancestor].plugins.iter().filter(|p| p.same_plugin(plugin)) {
            if ancestor != id && declared.inherited == Some(false) {
                continue;
            }
            for execution in &declared.executions {
                if ancestor != id && execution.inherited == Some(false) {
                    continue;
                }
                for goal in &execution.goals {
                    let exec_key = format!("{}:{goal}", execution.id.as_deref().unwrap_or_default());
                    if !seen.insert(exec_key) {
                        continue;
                    }
                    result.push(ExecutionContext {
                        plugin: declared,
                        goal: goal.clone(),
                        configuration: execution
                            .configuration
                            .as_ref()
                            .unwrap_or(&declared.configuration),
                    });
                }
            }
            if declared.executions.is_empty() && seen.is_empty() {
                seen.insert(format!(":{DEFAULT_EXECUTION_GOAL}"));
                result.push(default_execution(declared));
            }
        }
    }
    result
}

fn default_execution(plugin: &Plugin) -> ExecutionContext<'_> {
    ExecutionContext {
        plugin,
        goal: DEFAULT_EXECUTION_GOAL.to_string(),
        configuration: &plugin.configuration,
    }
}
