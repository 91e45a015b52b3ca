use pomgrade_cli::config::ConversionOptions;
use pomgrade_cli::emit::{GradleEmitter, Mirror, read_mirrors, write_tree};
use pomgrade_cli::plugins::ConversionRegistry;
use pomgrade_cli::project::Workspace;
use pomgrade_cli::resolver::ModuleGraph;

use crate::common::{FileAssert, PomBuilder, TestProject};

const CHECKSTYLE_PLUGIN: &str = r#"      <plugin>
        <artifactId>maven-checkstyle-plugin</artifactId>
        <configuration>
          <configLocation>config/checkstyle.xml</configLocation>
          <failOnViolation>false</failOnViolation>
        </configuration>
      </plugin>"#;

const JAR_PLUGIN: &str = r#"      <plugin>
        <artifactId>maven-jar-plugin</artifactId>
        <executions>
          <execution>
            <goals><goal>test-jar</goal></goals>
          </execution>
        </executions>
      </plugin>"#;

fn convert(project: &TestProject, mirrors: Vec<Mirror>) -> pomgrade_cli::emit::WriteSummary {
    let mut workspace = Workspace::new(ConversionOptions::offline());
    let root = workspace.load(project.project_path()).unwrap();
    let modules = ModuleGraph::build(&mut workspace, root).unwrap();
    let emitter = GradleEmitter::new(ConversionRegistry::with_builtin())
        .unwrap()
        .with_mirrors(mirrors);
    write_tree(&emitter, &workspace, root, &modules).unwrap()
}

fn library_project() -> TestProject {
    let project = TestProject::new().unwrap();
    project
        .write_pom(
            "",
            &PomBuilder::new("com.acme", "shop", "0.9.0")
                .packaging("pom")
                .module_dir("domain")
                .module_dir("web")
                .property("maven.compiler.release", "17")
                .plugin_xml(CHECKSTYLE_PLUGIN)
                .build(),
        )
        .unwrap();
    project
        .write_pom(
            "domain",
            &PomBuilder::module("domain")
                .parent("com.acme", "shop", "0.9.0")
                .plugin_xml(JAR_PLUGIN)
                .dependency("org.projectlombok", "lombok", |d| d.version("1.18.32").scope("provided"))
                .build(),
        )
        .unwrap();
    project
        .write_pom(
            "web",
            &PomBuilder::module("web")
                .parent("com.acme", "shop", "0.9.0")
                .dependency("com.acme", "domain", |d| d.version("${project.version}"))
                .dependency("com.acme", "domain", |d| d.version("${project.version}").classifier("tests").scope("test"))
                .dependency("org.junit.jupiter", "junit-jupiter", |d| d.version("5.10.2").scope("test"))
                .build(),
        )
        .unwrap();
    project.write_file("config/checkstyle.xml", "<module name=\"Checker\"/>").unwrap();
    project
}

#[test]
fn test_full_tree_is_written() {
    let project = library_project();
    let summary = convert(&project, Vec::new());
    assert_eq!(summary.written.len(), 4);

    let root = project.project_path();
    FileAssert::contains(root.join("settings.gradle.kts"), "rootProject.name = \"shop\"");
    FileAssert::contains(root.join("settings.gradle.kts"), "include(\":domain\")\ninclude(\":web\")");

    let domain = project.read_file("domain/build.gradle.kts").unwrap();
    assert!(domain.contains("id(\"io.freefair.lombok\") version \"8.6\""));
    assert!(domain.contains("annotationProcessor(\"org.projectlombok:lombok:1.18.32\")"));
    assert!(domain.contains("// begin testJars"));
    assert!(domain.contains("tasks.register<Jar>(\"testJar\")"));
    assert!(domain.contains("group = \"com.acme\"\nversion = \"0.9.0\""));
    assert!(domain.contains("JavaVersion.toVersion(\"17\")"));

    let web = project.read_file("web/build.gradle.kts").unwrap();
    assert!(web.contains("    api(project(\":domain\"))\n"));
    assert!(web.contains("testImplementation(project(path = \":domain\", configuration = \"testArtifacts\"))"));
    assert!(web.contains("val ver_org_junit_jupiter_junit_jupiter_test = \"5.10.2\""));
    assert!(web.contains("testImplementation(\"org.junit.jupiter:junit-jupiter:$ver_org_junit_jupiter_junit_jupiter_test\")"));
}

#[test]
fn test_inherited_checkstyle_uses_module_relative_config() {
    let project = library_project();
    convert(&project, Vec::new());

    let root = project.read_file("build.gradle.kts").unwrap();
    assert!(root.contains("id(\"checkstyle\")"));
    assert!(root.contains("isIgnoreFailures = true"));
    assert!(root.contains("configFile = file(\"config/checkstyle.xml\")"));

    // The module inherits the plugin but has no config file of its own.
    let web = project.read_file("web/build.gradle.kts").unwrap();
    assert!(web.contains("// checkstyle config file not found: config/checkstyle.xml"));
}

#[test]
fn test_mirrors_from_settings_file() {
    let project = library_project();
    let settings = project
        .write_file(
            "m2/settings.xml",
            r#"<settings>
  <mirrors>
    <mirror>
      <id>internal</id>
      <mirrorOf>central</mirrorOf>
      <url>https://nexus.acme.example/repository/maven-public/</url>
    </mirror>
  </mirrors>
</settings>"#,
        )
        .unwrap();

    convert(&project, read_mirrors(&settings));
    FileAssert::contains(
        project.project_path().join("settings.gradle.kts"),
        "url = uri(\"https://nexus.acme.example/repository/maven-public/\")",
    );
}

#[test]
fn test_rerun_moves_module_settings_aside() {
    let project = library_project();
    project.write_file("web/settings.gradle.kts", "rootProject.name = \"web\"").unwrap();
    project.write_file("web/settings.gradle.kts.bak1", "older").unwrap();

    let summary = convert(&project, Vec::new());
    assert_eq!(summary.backups.len(), 1);
    FileAssert::not_exists(project.project_path().join("web/settings.gradle.kts"));
    FileAssert::contains(project.project_path().join("web/settings.gradle.kts.bak2"), "rootProject.name = \"web\"");
    FileAssert::contains(project.project_path().join("web/settings.gradle.kts.bak1"), "older");
}
