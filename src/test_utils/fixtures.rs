//! Sample project trees for tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// A set of descriptor files keyed by directory relative to the project root.
#[derive(Clone, Debug)]
pub struct PomFixture {
    pub name: String,
    pub files: Vec<(String, String)>,
}

impl PomFixture {
    /// Root aggregator with `core` and `api` modules; `api` depends on `core`.
    pub fn multi_module() -> Self {
        Self {
            name: "multi_module".to_string(),
            files: vec![
                (
                    String::new(),
                    r#"<project>
  <groupId>com.acme</groupId>
  <artifactId>acme-root</artifactId>
  <version>1.0.0</version>
  <packaging>pom</packaging>
  <properties>
    <guava.version>33.0-jre</guava.version>
    <maven.compiler.release>17</maven.compiler.release>
  </properties>
  <modules>
    <module>core</module>
    <module>api</module>
  </modules>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>com.google.guava</groupId>
        <artifactId>guava</artifactId>
        <version>${guava.version}</version>
      </dependency>
    </dependencies>
  </dependencyManagement>
</project>"#
                        .to_string(),
                ),
                (
                    "core".to_string(),
                    r#"<project>
  <parent>
    <groupId>com.acme</groupId>
    <artifactId>acme-root</artifactId>
    <version>1.0.0</version>
  </parent>
  <artifactId>core</artifactId>
  <dependencies>
    <dependency>
      <groupId>com.google.guava</groupId>
      <artifactId>guava</artifactId>
    </dependency>
  </dependencies>
</project>"#
                        .to_string(),
                ),
                (
                    "api".to_string(),
                    r#"<project>
  <parent>
    <groupId>com.acme</groupId>
    <artifactId>acme-root</artifactId>
    <version>1.0.0</version>
  </parent>
  <artifactId>api</artifactId>
  <dependencies>
    <dependency>
      <groupId>com.acme</groupId>
      <artifactId>core</artifactId>
      <version>${project.version}</version>
    </dependency>
    <dependency>
      <groupId>org.projectlombok</groupId>
      <artifactId>lombok</artifactId>
      <version>1.18.30</version>
      <scope>provided</scope>
    </dependency>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>4.13.2</version>
      <scope>test</scope>
    </dependency>
  </dependencies>
</project>"#
                        .to_string(),
                ),
            ],
        }
    }

    /// A single descriptor without parent or modules.
    pub fn single(group_id: &str, artifact_id: &str, version: &str) -> Self {
        Self {
            name: "single".to_string(),
            files: vec![(
                String::new(),
                format!(
                    "<project><groupId>{group_id}</groupId><artifactId>{artifact_id}</artifactId>\
                     <version>{version}</version></project>"
                ),
            )],
        }
    }

    /// Write every descriptor below `root`.
    pub fn write_to(&self, root: &Path) -> Result<()> {
        for (dir, content) in &self.files {
            let dir = root.join(dir);
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            let path = dir.join(crate::constants::DESCRIPTOR_FILE);
            fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Ok(())
    }
}
