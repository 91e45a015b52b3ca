//! Built-in plugin conversions.
//!
//! | Maven goal | Gradle |
//! |---|---|
//! | `org.codehaus.mojo:javacc-maven-plugin:javacc` | `org.javacc.javacc` plugin |
//! | `org.apache.maven.plugins:maven-checkstyle-plugin:default` | `checkstyle` plugin |
//! | `org.apache.maven.plugins:maven-jar-plugin:test-jar` | `testJar` task and `testArtifacts` configuration |
//! | `org.antlr:antlr4-maven-plugin:antlr4` | grammar generation task |
//! | `org.jvnet.jaxb:jaxb-maven-plugin:generate` | xjc generation task |

use std::path::Path;

use walkdir::WalkDir;

use super::{ConversionRegistry, ExecutionContext, GradlePlugin, PluginConversion, PluginKey};
use crate::constants::{DEFAULT_PLUGIN_GROUP_ID, TEST_ARTIFACTS_CONFIGURATION};
use crate::core::PomError;
use crate::descriptor::Descriptor;

/// Register every built-in conversion.
pub fn register_all(registry: &mut ConversionRegistry) {
    registry.register(
        PluginKey::new("org.codehaus.mojo", "javacc-maven-plugin", "javacc"),
        Box::new(Javacc),
    );
    registry.register(
        PluginKey::new(DEFAULT_PLUGIN_GROUP_ID, "maven-checkstyle-plugin", "default"),
        Box::new(Checkstyle),
    );
    registry.register(
        PluginKey::new(DEFAULT_PLUGIN_GROUP_ID, "maven-jar-plugin", "test-jar"),
        Box::new(TestJar),
    );
    registry.register(PluginKey::new("org.antlr", "antlr4-maven-plugin", "antlr4"), Box::new(Antlr4));
    registry.register(
        PluginKey::new("org.jvnet.jaxb", "jaxb-maven-plugin", "generate"),
        Box::new(Jaxb),
    );
}

pub struct Javacc;

impl PluginConversion for Javacc {
    fn name(&self) -> &str {
        "javacc"
    }

    fn gradle_plugin(&self) -> Option<GradlePlugin> {
        Some(GradlePlugin::new("org.javacc.javacc", Some("4.0.1")))
    }

    fn convert(&self, _ctx: &ExecutionContext<'_>, _owner: &Descriptor) -> Result<Option<String>, PomError> {
        Ok(Some(
            r#"tasks {
    compileJavacc {
        inputDirectory = file("src/main/javacc")
        outputDirectory = file(layout.buildDirectory.dir("generated/javacc"))
        arguments = mapOf("grammar_encoding" to "UTF-8", "static" to "false")
    }
}
sourceSets["main"].java.srcDir(layout.buildDirectory.dir("generated/javacc"))"#
                .to_string(),
        ))
    }
}

pub struct Checkstyle;

impl PluginConversion for Checkstyle {
    fn name(&self) -> &str {
        "checkstyle"
    }

    fn gradle_plugin(&self) -> Option<GradlePlugin> {
        Some(GradlePlugin::new("checkstyle", None))
    }

    fn is_enabled(&self, ctx: &ExecutionContext<'_>, _owner: &Descriptor) -> bool {
        !ctx.configuration.is_skipped()
    }

    fn convert(&self, ctx: &ExecutionContext<'_>, owner: &Descriptor) -> Result<Option<String>, PomError> {
        let Some(location) = ctx.configuration.get("configLocation") else {
            return Ok(Some("// checkstyle: no configLocation configured".to_string()));
        };
        if !owner.directory().join(location).exists() {
            return Ok(Some(format!("// checkstyle config file not found: {location}")));
        }
        let ignore_failures = ctx.configuration.get("failOnViolation") == Some("false");
        Ok(Some(format!(
            "checkstyle {{\n    isIgnoreFailures = {ignore_failures}\n    configFile = file(\"{}\")\n}}",
            linux_path(location)
        )))
    }
}

pub struct TestJar;

impl PluginConversion for TestJar {
    fn name(&self) -> &str {
        "testJars"
    }

    fn convert(&self, _ctx: &ExecutionContext<'_>, _owner: &Descriptor) -> Result<Option<String>, PomError> {
        Ok(Some(format!(
            r#"tasks.register<Jar>("testJar") {{
    archiveClassifier.set("tests")
    from(sourceSets.test.get().output)
}}
configurations {{
    create("{TEST_ARTIFACTS_CONFIGURATION}")
}}
artifacts {{
    add("{TEST_ARTIFACTS_CONFIGURATION}", tasks.named("testJar"))
}}"#
        )))
    }
}

pub struct Antlr4;

const ANTLR_TEMPLATE: &str = r#"val grammarRoot = file("src/main/antlr4")
val antlrOutputDir = file("target/generated-sources/antlr4")

tasks.register("generateGrammarSource") {
    group = "antlr"
    description = "Generate ANTLR sources, one invocation per .g4 file"

    doLast {
        grammarRoot.walkTopDown()
            .filter { it.isFile && it.extension == "g4" }
            .forEach { g4file ->
                val relativeDir = g4file.parentFile.relativeTo(grammarRoot).invariantSeparatorsPath
                val packageName = relativeDir.replace('/', '.')
                javaexec {
                    workingDir = grammarRoot
                    classpath = configurations.annotationProcessor.get()
                    mainClass.set("org.antlr.v4.Tool")
                    val argsList = mutableListOf("-visitor", "-listener", "-o", antlrOutputDir.absolutePath)
                    if (packageName.isNotEmpty()) {
                        argsList.addAll(listOf("-package", packageName))
                    }
                    argsList.add(g4file.relativeTo(grammarRoot).path)
                    args = argsList
                }
            }
    }
}

tasks.named("compileJava") {
    dependsOn("generateGrammarSource")
}

sourceSets["main"].java.srcDir(antlrOutputDir)

dependencies {
    implementation("org.antlr:antlr4-runtime:@VERSION@")
    annotationProcessor("org.antlr:antlr4:@VERSION@")
}"#;

impl PluginConversion for Antlr4 {
    fn name(&self) -> &str {
        "antlr"
    }

    fn convert(&self, ctx: &ExecutionContext<'_>, owner: &Descriptor) -> Result<Option<String>, PomError> {
        let version = ctx.plugin.version.as_deref().unwrap_or_else(|| {
            tracing::warn!("antlr4-maven-plugin in {} has no version", owner.ga());
            "unknown"
        });
        Ok(Some(ANTLR_TEMPLATE.replace("@VERSION@", version)))
    }
}

pub struct Jaxb;

const JAXB_VERSION: &str = "4.0.5";

const JAXB_TEMPLATE: &str = r#"val xjc by configurations.creating
dependencies {
    xjc("org.glassfish.jaxb:jaxb-xjc:@JAXB@")
    xjc("org.glassfish.jaxb:jaxb-runtime:@JAXB@")
    implementation("org.glassfish.jaxb:jaxb-runtime:@JAXB@")
}

val jaxbOutputDir = layout.buildDirectory.dir("generated-sources-jaxb")
val generateJaxb by tasks.registering(JavaExec::class) {
    group = "codegen"
    description = "Generate JAXB classes from @SCHEMA@"
    classpath = xjc
    mainClass.set("com.sun.tools.xjc.XJCFacade")
    inputs.dir("@SCHEMA@")
    outputs.dir(jaxbOutputDir)
    doFirst { jaxbOutputDir.get().asFile.mkdirs() }
    args(listOf("-d", jaxbOutputDir.get().asFile.absolutePath@PACKAGE@, file("@SCHEMA@").absolutePath))
}

sourceSets["main"].java.srcDir(jaxbOutputDir)
tasks.named("compileJava") { dependsOn(generateJaxb) }"#;

impl PluginConversion for Jaxb {
    fn name(&self) -> &str {
        "jaxb"
    }

    fn convert(&self, ctx: &ExecutionContext<'_>, owner: &Descriptor) -> Result<Option<String>, PomError> {
        let Some(schema_directory) = ctx.configuration.get("schemaDirectory") else {
            return Ok(Some("// jaxb plugin disabled - no schemaDirectory configured".to_string()));
        };
        let schema_path = owner.directory().join(schema_directory);
        if !schema_path.is_dir() {
            return Ok(Some(format!(
                "// jaxb plugin disabled - no schema directory {}",
                schema_path.display()
            )));
        }
        if count_schemas(&schema_path) == 0 {
            return Ok(Some(format!(
                "// jaxb plugin disabled - no xsd files found in {}",
                schema_path.display()
            )));
        }

        let package = ctx
            .configuration
            .get("generatePackage")
            .map(|p| format!(", \"-p\", \"{p}\""))
            .unwrap_or_default();
        Ok(Some(
            JAXB_TEMPLATE
                .replace("@JAXB@", JAXB_VERSION)
                .replace("@SCHEMA@", &linux_path(schema_directory))
                .replace("@PACKAGE@", &package),
        ))
    }
}

fn count_schemas(directory: &Path) -> usize {
    WalkDir::new(directory)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext.eq_ignore_ascii_case("xsd"))
        })
        .count()
}

fn linux_path(path: &str) -> String {
    path.replace('\\', "/").trim_end_matches('/').to_string()
}
