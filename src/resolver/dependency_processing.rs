//! Turning Maven dependencies into Gradle dependency declarations.
//!
//! [`DependencyProcessor::declarations`] walks the effective-or-raw
//! dependency list of one descriptor and produces a [`DependencyPlan`]:
//!
//! - dependencies on registered modules become `project(":path")` references,
//!   test jars of modules point at the module's `testArtifacts` output;
//! - annotation processors (lombok and the table below, plus any configured
//!   extra coordinates) are declared under all four processor configurations;
//! - everything else becomes an external `group:artifact:version` coordinate,
//!   with the version inlined or pulled into a `val ver_*` variable.
//!
//! Declarations come out ordered by configuration name, then `:group:artifact:`.

use std::collections::HashSet;
use std::fmt::Write as _;

use serde::Serialize;

use super::interpolation::interpolate;
use super::module_graph::ModuleGraph;
use super::scope::{Configuration, map_scope};
use super::version_resolution::{resolve_group_id, resolve_version};
use crate::constants::TEST_ARTIFACTS_CONFIGURATION;
use crate::core::PomError;
use crate::descriptor::{Dependency, DescriptorId};
use crate::project::Workspace;

/// Known annotation processor coordinates.
pub const ANNOTATION_PROCESSORS: &[&str] = &[
    "org.projectlombok:lombok",
    "org.mapstruct:mapstruct",
    "org.immutables:value",
    "com.google.auto.service:auto-service",
    "com.google.auto.value:auto-value",
    "com.google.auto.value:auto-value-annotations",
    "com.google.dagger:dagger-compiler",
    "com.google.dagger:dagger-producers",
    "com.google.dagger:dagger-android-processor",
    "com.google.dagger:dagger-android-support",
];

const LOMBOK_GROUP: &str = "org.projectlombok";
const LOMBOK_PLUGIN_VERSION: &str = "1.18.22";

/// What a declaration points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DependencyTarget {
    /// Another module of the same build.
    Module {
        /// Gradle path without the leading `:`.
        path: String,
        /// Consumed configuration, `testArtifacts` for test jars.
        configuration: Option<String>,
    },
    /// An artifact from a repository.
    External {
        /// `group:artifact:version[:classifier][@type]`
        coordinate: String,
        /// `(group, module)` pairs.
        exclusions: Vec<(String, String)>,
    },
}

/// One line (or block) of the `dependencies { }` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyDeclaration {
    pub configuration: Configuration,
    pub target: DependencyTarget,
    /// `group:artifact` the declaration came from.
    pub source: String,
}

impl DependencyDeclaration {
    /// Kotlin DSL text, without leading indentation.
    #[must_use]
    pub fn render(&self) -> String {
        let conf = self.configuration.as_str();
        match &self.target {
            DependencyTarget::Module { path, configuration: None } => {
                format!("{conf}(project(\":{path}\"))")
            }
            DependencyTarget::Module { path, configuration: Some(target) } => {
                format!("{conf}(project(path = \":{path}\", configuration = \"{target}\"))")
            }
            DependencyTarget::External { coordinate, exclusions } if exclusions.is_empty() => {
                format!("{conf}(\"{coordinate}\")")
            }
            DependencyTarget::External { coordinate, exclusions } => {
                let mut out = format!("{conf}(\"{coordinate}\") {{\n");
                for (group, module) in exclusions {
                    let _ = writeln!(out, "        exclude(group = \"{group}\", module = \"{module}\")");
                }
                out.push_str("    }");
                out
            }
        }
    }

    /// Module path when the declaration references another module.
    #[must_use]
    pub fn module_path(&self) -> Option<&str> {
        match &self.target {
            DependencyTarget::Module { path, .. } => Some(path),
            DependencyTarget::External { .. } => None,
        }
    }
}

/// A `val ver_* = "..."` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionVariable {
    pub name: String,
    pub value: String,
}

/// Dependency section of one build file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyPlan {
    pub declarations: Vec<DependencyDeclaration>,
    pub variables: Vec<VersionVariable>,
    /// A lombok dependency was seen; the lombok Gradle plugin is needed.
    pub uses_lombok: bool,
}

impl DependencyPlan {
    fn add_variable(&mut self, name: String, value: &str) -> Option<String> {
        match self.variables.iter().find(|v| v.name == name) {
            Some(existing) if existing.value == value => Some(format!("${name}")),
            Some(existing) => {
                tracing::warn!(
                    "Version variable {name} already holds {}, inlining {value}",
                    existing.value
                );
                None
            }
            None => {
                self.variables.push(VersionVariable { name: name.clone(), value: value.to_string() });
                Some(format!("${name}"))
            }
        }
    }
}

/// Builds dependency declarations for descriptors of one workspace.
#[derive(Debug, Clone, Copy)]
pub struct DependencyProcessor<'w> {
    workspace: &'w Workspace,
    modules: &'w ModuleGraph,
}

struct Resolved<'d> {
    dependency: &'d Dependency,
    group_id: String,
    artifact_id: String,
    configuration: Configuration,
}

impl<'w> DependencyProcessor<'w> {
    #[must_use]
    pub const fn new(workspace: &'w Workspace, modules: &'w ModuleGraph) -> Self {
        Self { workspace, modules }
    }

    /// Dependency plan for descriptor `id`.
    pub fn declarations(&self, id: DescriptorId) -> Result<DependencyPlan, PomError> {
        let options = self.workspace.options();
        let descriptor = self.workspace.effective_or_raw(id);

        let mut resolved = Vec::with_capacity(descriptor.dependencies.len());
        for dependency in &descriptor.dependencies {
            let group_id = resolve_group_id(self.workspace, dependency, id)?.unwrap_or_default();
            let artifact_id = interpolate(self.workspace, &dependency.artifact_id, id)?;
            let configuration = map_scope(options, dependency, &group_id, dependency.scope.as_deref());
            resolved.push(Resolved { dependency, group_id, artifact_id, configuration });
        }
        resolved.sort_by(|a, b| {
            a.configuration
                .as_str()
                .cmp(b.configuration.as_str())
                .then_with(|| ga_full(a).cmp(&ga_full(b)))
        });

        let mut plan = DependencyPlan::default();
        for dep in &resolved {
            self.declare(&mut plan, dep, id)?;
        }
        Ok(plan)
    }

    fn declare(&self, plan: &mut DependencyPlan, dep: &Resolved<'_>, id: DescriptorId) -> Result<(), PomError> {
        let source = format!("{}:{}", dep.group_id, dep.artifact_id);
        let is_test_jar = dep.dependency.is_test_jar();
        if is_test_jar && dep.dependency.scope.as_deref() != Some("test") {
            tracing::warn!(
                "Dependency on {source} with classifier=tests/type=test-jar is missing <scope>test</scope>, \
                 Gradle may not treat it as a test dependency"
            );
        }

        if let Some(module) = self.modules.find(&dep.group_id, &dep.artifact_id) {
            let test_artifacts = is_test_jar
                && dep.configuration.expand().contains(&Configuration::TestImplementation);
            for &configuration in dep.configuration.expand() {
                plan.declarations.push(DependencyDeclaration {
                    configuration,
                    target: DependencyTarget::Module {
                        path: module.path.clone(),
                        configuration: test_artifacts.then(|| TEST_ARTIFACTS_CONFIGURATION.to_string()),
                    },
                    source: source.clone(),
                });
            }
            return Ok(());
        }

        if dep.group_id == LOMBOK_GROUP {
            return self.declare_lombok(plan, dep, id);
        }
        if self.is_annotation_processor(&source) {
            let Some(version) = self.version_or_policy(dep, id)? else { return Ok(()) };
            push_processor(plan, &format!("{source}:{version}"), &source);
            return Ok(());
        }

        let Some(version) = self.version_or_policy(dep, id)? else { return Ok(()) };
        let version_expr = if self.workspace.options().inline_versions {
            version.clone()
        } else {
            plan.add_variable(variable_name(dep), &version).unwrap_or_else(|| version.clone())
        };
        tracing::info!("Adding dependency: {} {source}:{version_expr}", dep.configuration);

        let mut coordinate = format!("{source}:{version_expr}");
        if let Some(classifier) = dep.dependency.classifier.as_deref().filter(|c| !c.trim().is_empty()) {
            coordinate.push(':');
            coordinate.push_str(classifier);
        }
        if let Some(dep_type) = dep.dependency.dep_type.as_deref().filter(|t| !t.trim().is_empty() && *t != "jar") {
            coordinate.push('@');
            coordinate.push_str(dep_type);
        }
        let exclusions: Vec<(String, String)> = dep
            .dependency
            .exclusions
            .iter()
            .map(|e| (e.group_id.clone(), e.artifact_id.clone()))
            .collect();

        for &configuration in dep.configuration.expand() {
            plan.declarations.push(DependencyDeclaration {
                configuration,
                target: DependencyTarget::External {
                    coordinate: coordinate.clone(),
                    exclusions: exclusions.clone(),
                },
                source: source.clone(),
            });
        }
        Ok(())
    }

    fn declare_lombok(&self, plan: &mut DependencyPlan, dep: &Resolved<'_>, id: DescriptorId) -> Result<(), PomError> {
        let version = if dep.artifact_id == "lombok" {
            self.version_or_policy(dep, id)?
        } else {
            tracing::warn!(
                "Unexpected lombok dependency {}:{} in {}, check it manually",
                dep.group_id,
                dep.artifact_id,
                self.workspace[id].id_and_path()
            );
            if dep.artifact_id == "lombok-maven-plugin" {
                Some(LOMBOK_PLUGIN_VERSION.to_string())
            } else {
                self.version_or_policy(dep, id)?
            }
        };
        let Some(version) = version else { return Ok(()) };
        plan.uses_lombok = true;
        push_processor(plan, &format!("{LOMBOK_GROUP}:lombok:{version}"), &format!("{LOMBOK_GROUP}:lombok"));
        Ok(())
    }

    fn is_annotation_processor(&self, ga: &str) -> bool {
        ANNOTATION_PROCESSORS.contains(&ga) || self.workspace.options().extra_annotation_processors.contains(ga)
    }

    /// Resolved version, `None` to skip the dependency, or the configured failure.
    fn version_or_policy(&self, dep: &Resolved<'_>, id: DescriptorId) -> Result<Option<String>, PomError> {
        if let Some(version) = resolve_version(self.workspace, dep.dependency, id)? {
            return Ok(Some(version));
        }
        let descriptor = &self.workspace[id];
        if self.workspace.options().ignore_unknown_versions {
            tracing::warn!(
                "Dependency {}:{} has unknown version in {}, skipping",
                dep.group_id,
                dep.artifact_id,
                descriptor.id_and_path()
            );
            return Ok(None);
        }
        Err(PomError::UnresolvedVersion {
            dependency: format!("{}:{}", dep.group_id, dep.artifact_id),
            coordinate: descriptor.id(),
            path: descriptor.source_file.display().to_string(),
        })
    }
}

fn ga_full(dep: &Resolved<'_>) -> String {
    format!(":{}:{}:", dep.group_id, dep.artifact_id)
}

fn push_processor(plan: &mut DependencyPlan, coordinate: &str, source: &str) {
    let mut seen: HashSet<(Configuration, String)> = plan
        .declarations
        .iter()
        .filter_map(|d| match &d.target {
            DependencyTarget::External { coordinate: c, .. } => Some((d.configuration, c.clone())),
            DependencyTarget::Module { .. } => None,
        })
        .collect();
    for configuration in Configuration::PROCESSOR {
        if !seen.insert((configuration, coordinate.to_string())) {
            continue;
        }
        plan.declarations.push(DependencyDeclaration {
            configuration,
            target: DependencyTarget::External {
                coordinate: coordinate.to_string(),
                exclusions: Vec::new(),
            },
            source: source.to_string(),
        });
    }
}

/// `ver_<group>_<artifact>[_<scope>][_<type>][_<classifier>]`
fn variable_name(dep: &Resolved<'_>) -> String {
    let mut name = format!("ver_{}_{}", sanitize(&dep.group_id), sanitize(&dep.artifact_id));
    let dependency = dep.dependency;
    for part in [&dependency.scope, &dependency.dep_type, &dependency.classifier] {
        if let Some(part) = part.as_deref().filter(|p| !p.trim().is_empty()) {
            name.push('_');
            name.push_str(&sanitize(part));
        }
    }
    name
}

fn sanitize(text: &str) -> String {
    text.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect()
}
