//! Mapping from XML element trees to [`Descriptor`] values.
//!
//! The parser performs no resolution and no interpolation: values are copied
//! as written. The only defaults applied here are the ones Maven itself applies
//! at parse time (inherited `groupId`/`version` from the `<parent>` block are
//! applied by the loader, not here).

use std::path::Path;

use super::xml::{Element, parse_document};
use super::{
    BuildPaths, Dependency, Descriptor, Exclusion, Execution, ParentRef, Plugin,
    PluginConfiguration,
};
use crate::core::PomError;

/// Top-level elements of the POM 4.0.0 model.
const KNOWN_PROJECT_ELEMENTS: &[&str] = &[
    "modelVersion",
    "parent",
    "groupId",
    "artifactId",
    "version",
    "packaging",
    "name",
    "description",
    "url",
    "inceptionYear",
    "organization",
    "licenses",
    "developers",
    "contributors",
    "mailingLists",
    "prerequisites",
    "modules",
    "scm",
    "issueManagement",
    "ciManagement",
    "distributionManagement",
    "properties",
    "dependencyManagement",
    "dependencies",
    "repositories",
    "pluginRepositories",
    "build",
    "reporting",
    "reports",
    "profiles",
];

/// Read and parse the descriptor file at `path`.
///
/// `path` is stored as the descriptor's `source_file`; callers pass the
/// canonical path so cache keys and error messages agree.
pub fn parse_descriptor(path: &Path, ignore_unknown: bool) -> Result<Descriptor, PomError> {
    let content = std::fs::read_to_string(path).map_err(|e| PomError::io("reading", path, &e))?;
    let mut descriptor = parse_descriptor_str(&content, ignore_unknown).map_err(|reason| {
        PomError::ParseError {
            path: path.display().to_string(),
            reason,
        }
    })?;
    descriptor.source_file = path.to_path_buf();
    Ok(descriptor)
}

/// Parse descriptor text. The returned descriptor has an empty `source_file`.
pub fn parse_descriptor_str(content: &str, ignore_unknown: bool) -> Result<Descriptor, String> {
    let root = parse_document(content)?;
    if root.name != "project" {
        return Err(format!("expected <project> root element, found <{}>", root.name));
    }
    project_from_element(&root, ignore_unknown)
}

/// Parse the output of `mvn help:effective-pom`.
///
/// Multi-module builds produce a `<projects>` wrapper; single-module builds
/// produce a bare `<project>`. Both are accepted.
pub fn parse_effective_projects(path: &Path) -> Result<Vec<Descriptor>, PomError> {
    let content = std::fs::read_to_string(path).map_err(|e| PomError::io("reading", path, &e))?;
    let parse_error = |reason: String| PomError::ParseError {
        path: path.display().to_string(),
        reason,
    };
    let root = parse_document(&content).map_err(parse_error)?;

    let elements: Vec<&Element> = match root.name.as_str() {
        "projects" => root.children_named("project").collect(),
        "project" => vec![&root],
        other => {
            return Err(parse_error(format!(
                "expected <projects> or <project> root element, found <{other}>"
            )));
        }
    };

    elements
        .into_iter()
        .map(|element| {
            project_from_element(element, true).map_err(parse_error).map(|mut d| {
                d.source_file = path.to_path_buf();
                d
            })
        })
        .collect()
}

fn project_from_element(root: &Element, ignore_unknown: bool) -> Result<Descriptor, String> {
    if !ignore_unknown {
        if let Some(unknown) =
            root.children.iter().find(|c| !KNOWN_PROJECT_ELEMENTS.contains(&c.name.as_str()))
        {
            return Err(format!("unknown element <{}> in <project>", unknown.name));
        }
    }

    let parent_ref = root.child("parent").map(|p| ParentRef {
        group_id: p.child_text("groupId"),
        artifact_id: p.child_text("artifactId"),
        version: p.child_text("version"),
        relative_path: p.child_text("relativePath"),
    });

    let properties = root
        .child("properties")
        .map(|props| {
            props.children.iter().map(|p| (p.name.clone(), p.text.trim().to_string())).collect()
        })
        .unwrap_or_default();

    let dependencies = root.child("dependencies").map(dependencies_from).unwrap_or_default();
    let dependency_management = root
        .descend(&["dependencyManagement", "dependencies"])
        .map(dependencies_from)
        .unwrap_or_default();

    let modules = root
        .child("modules")
        .map(|m| {
            m.children_named("module")
                .map(|module| module.text.trim().to_string())
                .filter(|module| !module.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let build = root.child("build");
    let plugins = build
        .and_then(|b| b.child("plugins"))
        .map(|plugins| plugins.children_named("plugin").map(plugin_from).collect())
        .unwrap_or_default();
    let build_paths = build
        .map(|b| BuildPaths {
            source_directory: b.child_text("sourceDirectory"),
            test_source_directory: b.child_text("testSourceDirectory"),
            output_directory: b.child_text("outputDirectory"),
            test_output_directory: b.child_text("testOutputDirectory"),
            directory: b.child_text("directory"),
            final_name: b.child_text("finalName"),
        })
        .unwrap_or_default();

    Ok(Descriptor {
        group_id: root.child_text("groupId"),
        artifact_id: root.child_text("artifactId"),
        version: root.child_text("version"),
        packaging: root.child_text("packaging"),
        name: root.child_text("name"),
        parent_ref,
        properties,
        dependencies,
        dependency_management,
        modules,
        plugins,
        build: build_paths,
        ..Descriptor::default()
    })
}

fn dependencies_from(element: &Element) -> Vec<Dependency> {
    element
        .children_named("dependency")
        .filter_map(|d| {
            let artifact_id = d.child_text("artifactId")?;
            Some(Dependency {
                group_id: d.child_text("groupId"),
                artifact_id,
                version: d.child_text("version"),
                scope: d.child_text("scope"),
                dep_type: d.child_text("type"),
                classifier: d.child_text("classifier"),
                optional: d.child_text("optional").is_some_and(|o| o == "true"),
                exclusions: d
                    .child("exclusions")
                    .map(|ex| {
                        ex.children_named("exclusion")
                            .map(|e| Exclusion {
                                group_id: e.child_text("groupId").unwrap_or_default(),
                                artifact_id: e.child_text("artifactId").unwrap_or_default(),
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
        })
        .collect()
}

fn plugin_from(element: &Element) -> Plugin {
    Plugin {
        group_id: element.child_text("groupId"),
        artifact_id: element.child_text("artifactId").unwrap_or_default(),
        version: element.child_text("version"),
        inherited: element.child_text("inherited").map(|v| v == "true"),
        executions: element
            .child("executions")
            .map(|ex| ex.children_named("execution").map(execution_from).collect())
            .unwrap_or_default(),
        configuration: element.child("configuration").map(configuration_from).unwrap_or_default(),
    }
}

fn execution_from(element: &Element) -> Execution {
    Execution {
        id: element.child_text("id"),
        phase: element.child_text("phase"),
        goals: element
            .child("goals")
            .map(|g| g.children_named("goal").map(|goal| goal.text.trim().to_string()).collect())
            .unwrap_or_default(),
        configuration: element.child("configuration").map(configuration_from),
        inherited: element.child_text("inherited").map(|v| v == "true"),
    }
}

fn configuration_from(element: &Element) -> PluginConfiguration {
    let mut configuration = PluginConfiguration::default();
    for child in &element.children {
        if child.children.is_empty() {
            configuration.values.insert(child.name.clone(), child.text.trim().to_string());
        } else {
            configuration.lists.insert(
                child.name.clone(),
                child.children.iter().map(|c| c.text.trim().to_string()).collect(),
            );
        }
    }
    configuration
}
