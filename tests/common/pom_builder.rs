//! Fluent builder for `pom.xml` descriptors in tests
//!
//! ```rust,ignore
//! use crate::common::PomBuilder;
//!
//! let pom = PomBuilder::new("com.acme", "service", "1.0.0")
//!     .parent("com.acme", "acme-root", "1.0.0")
//!     .property("slf4j.version", "2.0.9")
//!     .dependency("org.slf4j", "slf4j-api", |d| d.version("${slf4j.version}"))
//!     .dependency("junit", "junit", |d| d.version("4.13.2").scope("test"))
//!     .build();
//! ```

use std::fmt::Write;

/// Builder for one descriptor
#[derive(Debug, Default, Clone)]
pub struct PomBuilder {
    group_id: Option<String>,
    artifact_id: String,
    version: Option<String>,
    packaging: Option<String>,
    parent: Option<(String, String, String, Option<String>)>,
    properties: Vec<(String, String)>,
    modules: Vec<String>,
    managed: Vec<DependencySpec>,
    dependencies: Vec<DependencySpec>,
    plugins: Vec<String>,
}

/// One `<dependency>` element
#[derive(Debug, Default, Clone)]
pub struct DependencySpec {
    group_id: String,
    artifact_id: String,
    version: Option<String>,
    scope: Option<String>,
    dep_type: Option<String>,
    classifier: Option<String>,
    exclusions: Vec<(String, String)>,
}

impl DependencySpec {
    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn scope(mut self, scope: &str) -> Self {
        self.scope = Some(scope.to_string());
        self
    }

    pub fn dep_type(mut self, dep_type: &str) -> Self {
        self.dep_type = Some(dep_type.to_string());
        self
    }

    pub fn classifier(mut self, classifier: &str) -> Self {
        self.classifier = Some(classifier.to_string());
        self
    }

    pub fn exclude(mut self, group_id: &str, artifact_id: &str) -> Self {
        self.exclusions.push((group_id.to_string(), artifact_id.to_string()));
        self
    }

    fn write(&self, out: &mut String, indent: &str) {
        let _ = writeln!(out, "{indent}<dependency>");
        let _ = writeln!(out, "{indent}  <groupId>{}</groupId>", self.group_id);
        let _ = writeln!(out, "{indent}  <artifactId>{}</artifactId>", self.artifact_id);
        for (tag, value) in [
            ("version", &self.version),
            ("scope", &self.scope),
            ("type", &self.dep_type),
            ("classifier", &self.classifier),
        ] {
            if let Some(value) = value {
                let _ = writeln!(out, "{indent}  <{tag}>{value}</{tag}>");
            }
        }
        if !self.exclusions.is_empty() {
            let _ = writeln!(out, "{indent}  <exclusions>");
            for (group, artifact) in &self.exclusions {
                let _ = writeln!(
                    out,
                    "{indent}    <exclusion><groupId>{group}</groupId><artifactId>{artifact}</artifactId></exclusion>"
                );
            }
            let _ = writeln!(out, "{indent}  </exclusions>");
        }
        let _ = writeln!(out, "{indent}</dependency>");
    }
}

impl PomBuilder {
    /// Start a descriptor with full coordinates
    pub fn new(group_id: &str, artifact_id: &str, version: &str) -> Self {
        Self {
            group_id: Some(group_id.to_string()),
            artifact_id: artifact_id.to_string(),
            version: Some(version.to_string()),
            ..Self::default()
        }
    }

    /// Start a module descriptor that inherits group and version from its parent
    pub fn module(artifact_id: &str) -> Self {
        Self {
            artifact_id: artifact_id.to_string(),
            ..Self::default()
        }
    }

    pub fn packaging(mut self, packaging: &str) -> Self {
        self.packaging = Some(packaging.to_string());
        self
    }

    pub fn parent(mut self, group_id: &str, artifact_id: &str, version: &str) -> Self {
        self.parent = Some((group_id.to_string(), artifact_id.to_string(), version.to_string(), None));
        self
    }

    pub fn parent_at(mut self, group_id: &str, artifact_id: &str, version: &str, relative_path: &str) -> Self {
        self.parent = Some((
            group_id.to_string(),
            artifact_id.to_string(),
            version.to_string(),
            Some(relative_path.to_string()),
        ));
        self
    }

    pub fn property(mut self, key: &str, value: &str) -> Self {
        self.properties.push((key.to_string(), value.to_string()));
        self
    }

    pub fn module_dir(mut self, module: &str) -> Self {
        self.modules.push(module.to_string());
        self
    }

    pub fn managed(mut self, group_id: &str, artifact_id: &str, version: &str) -> Self {
        self.managed.push(DependencySpec {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: Some(version.to_string()),
            ..DependencySpec::default()
        });
        self
    }

    pub fn dependency(
        mut self,
        group_id: &str,
        artifact_id: &str,
        configure: impl FnOnce(DependencySpec) -> DependencySpec,
    ) -> Self {
        let spec = DependencySpec {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            ..DependencySpec::default()
        };
        self.dependencies.push(configure(spec));
        self
    }

    /// Add a raw `<plugin>` element
    pub fn plugin_xml(mut self, xml: &str) -> Self {
        self.plugins.push(xml.to_string());
        self
    }

    /// Render the descriptor
    pub fn build(&self) -> String {
        let mut out = String::from("<project>\n");
        if let Some((group, artifact, version, relative_path)) = &self.parent {
            out.push_str("  <parent>\n");
            let _ = writeln!(out, "    <groupId>{group}</groupId>");
            let _ = writeln!(out, "    <artifactId>{artifact}</artifactId>");
            let _ = writeln!(out, "    <version>{version}</version>");
            if let Some(path) = relative_path {
                let _ = writeln!(out, "    <relativePath>{path}</relativePath>");
            }
            out.push_str("  </parent>\n");
        }
        if let Some(group) = &self.group_id {
            let _ = writeln!(out, "  <groupId>{group}</groupId>");
        }
        let _ = writeln!(out, "  <artifactId>{}</artifactId>", self.artifact_id);
        if let Some(version) = &self.version {
            let _ = writeln!(out, "  <version>{version}</version>");
        }
        if let Some(packaging) = &self.packaging {
            let _ = writeln!(out, "  <packaging>{packaging}</packaging>");
        }
        if !self.properties.is_empty() {
            out.push_str("  <properties>\n");
            for (key, value) in &self.properties {
                let _ = writeln!(out, "    <{key}>{value}</{key}>");
            }
            out.push_str("  </properties>\n");
        }
        if !self.modules.is_empty() {
            out.push_str("  <modules>\n");
            for module in &self.modules {
                let _ = writeln!(out, "    <module>{module}</module>");
            }
            out.push_str("  </modules>\n");
        }
        if !self.managed.is_empty() {
            out.push_str("  <dependencyManagement>\n    <dependencies>\n");
            for spec in &self.managed {
                spec.write(&mut out, "      ");
            }
            out.push_str("    </dependencies>\n  </dependencyManagement>\n");
        }
        if !self.dependencies.is_empty() {
            out.push_str("  <dependencies>\n");
            for spec in &self.dependencies {
                spec.write(&mut out, "    ");
            }
            out.push_str("  </dependencies>\n");
        }
        if !self.plugins.is_empty() {
            out.push_str("  <build>\n    <plugins>\n");
            for plugin in &self.plugins {
                out.push_str(plugin);
                out.push('\n');
            }
            out.push_str("    </plugins>\n  </build>\n");
        }
        out.push_str("</project>\n");
        out
    }
}
