use pomgrade_cli::config::ConversionOptions;
use pomgrade_cli::core::PomError;
use pomgrade_cli::project::Workspace;
use pomgrade_cli::resolver::interpolate;

use crate::common::{PomBuilder, TestProject};

fn options_for(project: &TestProject) -> ConversionOptions {
    ConversionOptions {
        local_repository: project.local_repository(),
        ..ConversionOptions::offline()
    }
}

#[test]
fn test_three_level_chain_with_repository_grandparent() {
    let project = TestProject::new().unwrap();
    project
        .install_in_repository(
            "org.corp",
            "corp-parent",
            "7",
            &PomBuilder::new("org.corp", "corp-parent", "7")
                .packaging("pom")
                .property("corp.encoding", "UTF-8")
                .build(),
        )
        .unwrap();
    project
        .write_pom(
            "",
            &PomBuilder::new("com.acme", "root", "1.0")
                .parent_at("org.corp", "corp-parent", "7", "../does-not-exist")
                .packaging("pom")
                .build(),
        )
        .unwrap();
    project
        .write_pom("svc", &PomBuilder::module("svc").parent("com.acme", "root", "1.0").build())
        .unwrap();

    let mut workspace = Workspace::new(options_for(&project));
    let svc = workspace.load(&project.project_path().join("svc")).unwrap();

    let chain: Vec<String> = workspace.ancestors(svc).map(|id| workspace[id].ga()).collect();
    assert_eq!(chain, vec!["com.acme:svc", "com.acme:root", "org.corp:corp-parent"]);
    assert_eq!(interpolate(&workspace, "${corp.encoding}", svc).unwrap(), "UTF-8");
}

#[test]
fn test_parent_not_found_names_both_locations() {
    let project = TestProject::new().unwrap();
    project
        .write_pom("", &PomBuilder::new("com.acme", "orphan", "1.0").parent("org.corp", "missing", "2").build())
        .unwrap();

    let mut workspace = Workspace::new(options_for(&project));
    match workspace.load(project.project_path()).unwrap_err() {
        PomError::ParentNotFound {
            coordinate,
            local,
            repository,
            ..
        } => {
            assert_eq!(coordinate, "org.corp:missing:2");
            assert!(local.ends_with("pom.xml"));
            assert!(repository.ends_with("missing-2.pom"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_two_descriptors_naming_each_other_as_parent() {
    let project = TestProject::new().unwrap();
    project
        .write_pom("a", &PomBuilder::new("g", "a", "1").parent_at("g", "b", "1", "../b").build())
        .unwrap();
    project
        .write_pom("b", &PomBuilder::new("g", "b", "1").parent_at("g", "a", "1", "../a").build())
        .unwrap();

    let mut workspace = Workspace::new(options_for(&project));
    let error = workspace.load(&project.project_path().join("a")).unwrap_err();
    assert!(
        matches!(error, PomError::SelfReference { .. } | PomError::ParentMismatch { .. }),
        "unexpected error: {error:?}"
    );
    assert!(error.is_fatal());
}

#[test]
fn test_version_mismatch_is_tolerated() {
    let project = TestProject::new().unwrap();
    project
        .write_pom("", &PomBuilder::new("com.acme", "root", "1.1").packaging("pom").build())
        .unwrap();
    project
        .write_pom("lib", &PomBuilder::module("lib").parent("com.acme", "root", "1.0").build())
        .unwrap();

    let mut workspace = Workspace::new(options_for(&project));
    let lib = workspace.load(&project.project_path().join("lib")).unwrap();
    let parent = workspace.parent_of(lib).unwrap();
    assert_eq!(workspace[parent].version(), "1.1");
    assert_eq!(workspace[lib].version(), "1.0");
}
