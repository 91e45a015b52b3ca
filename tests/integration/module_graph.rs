use pomgrade_cli::config::ConversionOptions;
use pomgrade_cli::core::PomError;
use pomgrade_cli::project::Workspace;
use pomgrade_cli::resolver::{DependencyProcessor, ModuleDependencyGraph, ModuleGraph};

use crate::common::{PomBuilder, TestProject};

/// Root with `platform/{model,service}` and `app` modules.
fn nested_project() -> TestProject {
    let project = TestProject::new().unwrap();
    project
        .write_pom(
            "",
            &PomBuilder::new("com.acme", "root", "2.0")
                .packaging("pom")
                .module_dir("platform")
                .module_dir("app")
                .build(),
        )
        .unwrap();
    project
        .write_pom(
            "platform",
            &PomBuilder::module("platform")
                .parent("com.acme", "root", "2.0")
                .packaging("pom")
                .module_dir("model")
                .module_dir("service")
                .build(),
        )
        .unwrap();
    project
        .write_pom(
            "platform/model",
            &PomBuilder::module("model").parent_at("com.acme", "platform", "2.0", "../pom.xml").build(),
        )
        .unwrap();
    project
        .write_pom(
            "platform/service",
            &PomBuilder::module("service")
                .parent_at("com.acme", "platform", "2.0", "../pom.xml")
                .dependency("com.acme", "model", |d| d.version("${project.version}"))
                .build(),
        )
        .unwrap();
    project
        .write_pom(
            "app",
            &PomBuilder::module("app")
                .parent("com.acme", "root", "2.0")
                .dependency("com.acme", "service", |d| d.version("2.0").scope("runtime"))
                .dependency("com.acme", "model", |d| d.version("2.0").dep_type("test-jar").scope("test"))
                .build(),
        )
        .unwrap();
    project
}

#[test]
fn test_nested_modules_get_colon_paths() {
    let project = nested_project();
    let mut workspace = Workspace::new(ConversionOptions::offline());
    let root = workspace.load(project.project_path()).unwrap();
    let modules = ModuleGraph::build(&mut workspace, root).unwrap();

    let paths: Vec<&str> = modules.entries().iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["platform", "platform:model", "platform:service", "app"]);
    assert_eq!(modules.find("com.acme", "service").unwrap().path, "platform:service");
}

#[test]
fn test_module_dependency_graph_and_build_order() {
    let project = nested_project();
    let mut workspace = Workspace::new(ConversionOptions::offline());
    let root = workspace.load(project.project_path()).unwrap();
    let modules = ModuleGraph::build(&mut workspace, root).unwrap();
    let processor = DependencyProcessor::new(&workspace, &modules);

    let app = processor.declarations(modules.find("com.acme", "app").unwrap().id).unwrap();
    let rendered: Vec<String> = app.declarations.iter().map(|d| d.render()).collect();
    assert!(rendered.contains(&"runtimeOnly(project(\":platform:service\"))".to_string()));
    assert!(rendered.contains(
        &"testImplementation(project(path = \":platform:model\", configuration = \"testArtifacts\"))".to_string()
    ));

    let graph = ModuleDependencyGraph::build(&processor, &modules).unwrap();
    graph.detect_cycles().unwrap();
    let order = graph.build_order().unwrap();
    let position = |path: &str| order.iter().position(|p| p == path).unwrap();
    assert!(position("platform:model") < position("platform:service"));
    assert!(position("platform:service") < position("app"));
}

#[test]
fn test_modules_depending_on_each_other_form_a_cycle() {
    let project = TestProject::new().unwrap();
    project
        .write_pom(
            "",
            &PomBuilder::new("g", "root", "1").packaging("pom").module_dir("a").module_dir("b").build(),
        )
        .unwrap();
    project
        .write_pom("a", &PomBuilder::module("a").parent("g", "root", "1").dependency("g", "b", |d| d.version("1")).build())
        .unwrap();
    project
        .write_pom("b", &PomBuilder::module("b").parent("g", "root", "1").dependency("g", "a", |d| d.version("1")).build())
        .unwrap();

    let mut workspace = Workspace::new(ConversionOptions::offline());
    let root = workspace.load(project.project_path()).unwrap();
    let modules = ModuleGraph::build(&mut workspace, root).unwrap();
    let processor = DependencyProcessor::new(&workspace, &modules);
    let graph = ModuleDependencyGraph::build(&processor, &modules).unwrap();

    match graph.detect_cycles().unwrap_err() {
        PomError::ModuleCycle { cycle } => {
            assert!(cycle.contains("a") && cycle.contains("b"));
            assert!(cycle.contains(" → "));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_duplicate_module_coordinate() {
    let project = TestProject::new().unwrap();
    project
        .write_pom(
            "",
            &PomBuilder::new("g", "root", "1").packaging("pom").module_dir("one").module_dir("two").build(),
        )
        .unwrap();
    project.write_pom("one", &PomBuilder::module("same").parent("g", "root", "1").build()).unwrap();
    project.write_pom("two", &PomBuilder::module("same").parent("g", "root", "1").build()).unwrap();

    let mut workspace = Workspace::new(ConversionOptions::offline());
    let root = workspace.load(project.project_path()).unwrap();
    match ModuleGraph::build(&mut workspace, root).unwrap_err() {
        PomError::DuplicateModule { coordinate, first, second } => {
            assert_eq!(coordinate, "g:same");
            assert_eq!(first, "one");
            assert_eq!(second, "two");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
