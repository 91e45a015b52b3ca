use assert_cmd::Command;
use predicates::prelude::*;

use pomgrade_cli::test_utils::PomFixture;

use crate::common::{FileAssert, PomBuilder, TestProject};

fn two_module_project() -> TestProject {
    let project = TestProject::new().unwrap();
    project
        .write_pom(
            "",
            &PomBuilder::new("org.sample", "sample", "1.2.3")
                .packaging("pom")
                .module_dir("lib")
                .module_dir("cli")
                .property("java.version", "11")
                .build(),
        )
        .unwrap();
    project
        .write_pom(
            "lib",
            &PomBuilder::module("lib")
                .parent("org.sample", "sample", "1.2.3")
                .dependency("com.google.guava", "guava", |d| d.version("33.2.0-jre"))
                .build(),
        )
        .unwrap();
    project
        .write_pom(
            "cli",
            &PomBuilder::module("cli")
                .parent("org.sample", "sample", "1.2.3")
                .dependency("org.sample", "lib", |d| d.version("${project.version}"))
                .build(),
        )
        .unwrap();
    project
}

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("pomgrade").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("gradle"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("graph"));
}

#[test]
fn test_gradle_command_writes_files() {
    let project = two_module_project();
    let output = project.run_pomgrade(&["gradle", ".", "--no-use-effective-pom"]).unwrap();
    output.assert_success().assert_stdout_contains("Generated 4 Gradle file(s) for 2 module(s)");

    let root = project.project_path();
    FileAssert::exists(root.join("settings.gradle.kts"));
    FileAssert::contains(root.join("lib/build.gradle.kts"), "api(\"com.google.guava:guava:$ver_com_google_guava_guava\")");
    FileAssert::contains(root.join("cli/build.gradle.kts"), "api(project(\":lib\"))");
    FileAssert::contains(root.join("cli/build.gradle.kts"), "JavaVersion.toVersion(\"11\")");
}

#[test]
fn test_gradle_command_with_implementation_and_inline_versions() {
    let project = two_module_project();
    project
        .run_pomgrade(&[
            "gradle",
            "--no-use-effective-pom",
            "--use-implementation-dependencies",
            "--inline-versions",
        ])
        .unwrap()
        .assert_success();

    FileAssert::contains(
        project.project_path().join("lib/build.gradle.kts"),
        "implementation(\"com.google.guava:guava:33.2.0-jre\")",
    );
}

#[test]
fn test_conflicting_dependency_modes_fail() {
    let project = two_module_project();
    let output = project
        .run_pomgrade(&[
            "gradle",
            "--no-use-effective-pom",
            "--use-api-dependencies",
            "--use-implementation-dependencies",
        ])
        .unwrap();
    output.assert_failure();
    assert_eq!(output.code, Some(1));
    output.assert_stderr_contains("--use-api-dependencies");
    FileAssert::not_exists(project.project_path().join("settings.gradle.kts"));
}

#[test]
fn test_validate_reports_counts_without_writing() {
    let project = two_module_project();
    let output = project.run_pomgrade(&["validate", "--no-use-effective-pom", "--json"]).unwrap();
    output.assert_success();

    let report: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(report["descriptors"], 3);
    assert_eq!(report["modules"], 2);
    assert_eq!(report["module_edges"], 1);
    FileAssert::not_exists(project.project_path().join("settings.gradle.kts"));
}

#[test]
fn test_validate_fails_on_unknown_version() {
    let project = TestProject::new().unwrap();
    project
        .write_pom(
            "",
            &PomBuilder::new("g", "app", "1").dependency("org.example", "mystery", |d| d).build(),
        )
        .unwrap();

    let output = project.run_pomgrade(&["validate", "--no-use-effective-pom"]).unwrap();
    output.assert_failure().assert_stderr_contains("org.example:mystery");

    project
        .run_pomgrade(&["validate", "--no-use-effective-pom", "--ignore-unknown-versions"])
        .unwrap()
        .assert_success();
}

#[test]
fn test_graph_command_prints_json() {
    let project = two_module_project();
    let output = project.run_pomgrade(&["graph", "--no-use-effective-pom"]).unwrap();
    output.assert_success();

    let graph: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(graph["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(graph["edges"][0]["from"], "cli");
    assert_eq!(graph["edges"][0]["to"], "lib");
}

#[test]
fn test_missing_directory_fails() {
    let project = TestProject::new().unwrap();
    project
        .run_pomgrade(&["validate", "does-not-exist", "--no-use-effective-pom"])
        .unwrap()
        .assert_failure();
}

#[test]
fn test_global_config_default_java_version() {
    let project = TestProject::new().unwrap();
    PomFixture::single("g", "plain", "1").write_to(project.project_path()).unwrap();
    let config = project.write_file("pomgrade.toml", "default_java_version = \"17\"\n").unwrap();

    let mut cmd = Command::cargo_bin("pomgrade").unwrap();
    cmd.current_dir(project.project_path())
        .env("NO_COLOR", "1")
        .args(["--config"])
        .arg(&config)
        .args(["gradle", "--no-use-effective-pom"])
        .assert()
        .success();

    FileAssert::contains(project.project_path().join("build.gradle.kts"), "JavaVersion.toVersion(\"17\")");
}

#[cfg(unix)]
#[test]
fn test_maven_failure_output_reaches_the_user() {
    use std::os::unix::fs::PermissionsExt;

    let project = two_module_project();
    let mvn = project
        .write_file(
            "bin/mvn",
            "#!/bin/sh\necho '[ERROR] Non-resolvable parent POM'\necho 'fatal: boom' >&2\nexit 1\n",
        )
        .unwrap();
    std::fs::set_permissions(&mvn, std::fs::Permissions::from_mode(0o755)).unwrap();

    let mut paths = vec![project.project_path().join("bin")];
    paths.extend(std::env::split_paths(&std::env::var_os("PATH").unwrap_or_default()));
    let path = std::env::join_paths(paths).unwrap();

    let output = project.run_pomgrade_with_env(&["validate", "."], &[("PATH", path.as_os_str())]).unwrap();
    output
        .assert_failure()
        .assert_stderr_contains("[ERROR] Non-resolvable parent POM")
        .assert_stderr_contains("fatal: boom");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_no_color_environment_keeps_logs_plain() {
    let project = two_module_project();
    let output = project.run_pomgrade(&["-v", "validate", "--no-use-effective-pom"]).unwrap();
    output.assert_success();
    assert!(!output.stderr.is_empty());
    assert!(!output.stderr.contains('\u{1b}'), "{}", output.stderr);
}
