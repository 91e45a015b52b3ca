use pomgrade_cli::config::ConversionOptions;
use pomgrade_cli::core::PomError;
use pomgrade_cli::descriptor::{Dependency, DescriptorId};
use pomgrade_cli::project::Workspace;
use pomgrade_cli::resolver::{
    DependencyProcessor, ModuleGraph, interpolate, java_version, resolve_version,
};

use crate::common::{PomBuilder, TestProject};

/// Root declaring properties and managed versions, and one `service` module.
fn project_with(service: PomBuilder) -> TestProject {
    let project = TestProject::new().unwrap();
    project
        .write_pom(
            "",
            &PomBuilder::new("com.acme", "root", "4.2.0")
                .packaging("pom")
                .module_dir("service")
                .property("jackson.version", "2.17.1")
                .property("jackson.line", "${jackson.version}")
                .property("java.version", "21")
                .managed("com.fasterxml.jackson.core", "jackson-databind", "${jackson.line}")
                .managed("org.slf4j", "slf4j-api", "2.0.13")
                .build(),
        )
        .unwrap();
    project.write_pom("service", &service.build()).unwrap();
    project
}

fn service() -> PomBuilder {
    PomBuilder::module("service").parent("com.acme", "root", "4.2.0")
}

fn load(project: &TestProject, options: ConversionOptions) -> (Workspace, DescriptorId, ModuleGraph) {
    let mut workspace = Workspace::new(options);
    let root = workspace.load(project.project_path()).unwrap();
    let modules = ModuleGraph::build(&mut workspace, root).unwrap();
    (workspace, root, modules)
}

#[test]
fn test_properties_and_managed_versions_from_parent() {
    let project = project_with(service());
    let (workspace, _root, modules) = load(&project, ConversionOptions::offline());
    let id = modules.find("com.acme", "service").unwrap().id;

    assert_eq!(interpolate(&workspace, "${jackson.line}", id).unwrap(), "2.17.1");
    assert_eq!(interpolate(&workspace, "v${project.version}", id).unwrap(), "v4.2.0");
    assert_eq!(interpolate(&workspace, "${undefined.key}", id).unwrap(), "${undefined.key}");

    let databind = Dependency::new("com.fasterxml.jackson.core", "jackson-databind");
    assert_eq!(resolve_version(&workspace, &databind, id).unwrap().as_deref(), Some("2.17.1"));
    let pinned = Dependency::new("org.slf4j", "slf4j-api").with_version("1.7.36");
    assert_eq!(resolve_version(&workspace, &pinned, id).unwrap().as_deref(), Some("1.7.36"));
    assert_eq!(java_version(&workspace, id).unwrap(), "21");
}

#[test]
fn test_declarations_in_implementation_mode() {
    let project = project_with(
        service()
            .dependency("org.slf4j", "slf4j-api", |d| d)
            .dependency("com.fasterxml.jackson.core", "jackson-databind", |d| {
                d.exclude("com.fasterxml.jackson.core", "jackson-annotations")
            })
            .dependency("org.mapstruct", "mapstruct", |d| d.version("1.5.5.Final").scope("provided"))
            .dependency("org.apache.maven", "maven-compat", |d| d.version("3.9.6").scope("provided")),
    );
    let options = ConversionOptions {
        api_dependencies: false,
        inline_versions: true,
        ..ConversionOptions::offline()
    };
    let (workspace, _root, modules) = load(&project, options);
    let id = modules.find("com.acme", "service").unwrap().id;

    let plan = DependencyProcessor::new(&workspace, &modules).declarations(id).unwrap();
    let rendered: Vec<String> = plan.declarations.iter().map(|d| d.render()).collect();
    assert!(plan.variables.is_empty());
    assert!(rendered.contains(&"implementation(\"org.slf4j:slf4j-api:2.0.13\")".to_string()));
    assert!(rendered.contains(
        &"implementation(\"com.fasterxml.jackson.core:jackson-databind:2.17.1\") {\n        \
          exclude(group = \"com.fasterxml.jackson.core\", module = \"jackson-annotations\")\n    }"
            .to_string()
    ));
    assert!(rendered.contains(&"annotationProcessor(\"org.mapstruct:mapstruct:1.5.5.Final\")".to_string()));
    assert!(rendered.contains(&"compileOnly(\"org.apache.maven:maven-compat:3.9.6\")".to_string()));
    assert!(rendered.contains(&"testImplementation(\"org.apache.maven:maven-compat:3.9.6\")".to_string()));

    let mut sorted = plan.declarations.clone();
    sorted.sort_by(|a, b| a.configuration.as_str().cmp(b.configuration.as_str()));
    let configurations: Vec<&str> = plan.declarations.iter().map(|d| d.configuration.as_str()).collect();
    let expected: Vec<&str> = sorted.iter().map(|d| d.configuration.as_str()).collect();
    assert_eq!(configurations, expected);
}

#[test]
fn test_unknown_version_policy() {
    let project = project_with(service().dependency("org.example", "nowhere", |d| d));

    let (workspace, _root, modules) = load(&project, ConversionOptions::offline());
    let id = modules.find("com.acme", "service").unwrap().id;
    let error = DependencyProcessor::new(&workspace, &modules).declarations(id).unwrap_err();
    assert!(matches!(error, PomError::UnresolvedVersion { .. }), "{error:?}");

    let lenient = ConversionOptions {
        ignore_unknown_versions: true,
        ..ConversionOptions::offline()
    };
    let (workspace, _root, modules) = load(&project, lenient);
    let id = modules.find("com.acme", "service").unwrap().id;
    let plan = DependencyProcessor::new(&workspace, &modules).declarations(id).unwrap();
    assert!(plan.declarations.is_empty());
}

#[test]
fn test_nested_property_that_cannot_resolve_fails() {
    let project = project_with(service().property("broken", "${nowhere.defined}"));
    let (workspace, _root, modules) = load(&project, ConversionOptions::offline());
    let id = modules.find("com.acme", "service").unwrap().id;

    match interpolate(&workspace, "x-${broken}", id).unwrap_err() {
        PomError::UnresolvedNestedProperty { key, .. } => assert_eq!(key, "broken"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_java_version_default_and_strict() {
    let project = TestProject::new().unwrap();
    project.write_pom("", &PomBuilder::new("g", "plain", "1").build()).unwrap();

    let (workspace, root, _modules) = load(&project, ConversionOptions::offline());
    assert_eq!(java_version(&workspace, root).unwrap(), "1.8");

    let strict = ConversionOptions {
        ignore_unknown_java_version: false,
        ..ConversionOptions::offline()
    };
    let (workspace, root, _modules) = load(&project, strict);
    assert!(matches!(
        java_version(&workspace, root),
        Err(PomError::UnresolvedJavaVersion { .. })
    ));
}
