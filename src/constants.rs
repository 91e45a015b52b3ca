//! Global constants used throughout the pomgrade codebase.
//!
//! This module contains file names, default coordinates, and timeout values
//! that are shared between the loader, the resolver, and the emitter.
//! Defining them centrally keeps the Maven conventions discoverable.

use std::time::Duration;

/// File name of a Maven project descriptor inside a project directory.
pub const DESCRIPTOR_FILE: &str = "pom.xml";

/// Parent `relativePath` used when a `<parent>` block does not declare one.
pub const DEFAULT_PARENT_RELATIVE_PATH: &str = "../pom.xml";

/// Version reported for descriptors that declare no version anywhere.
pub const DEFAULT_VERSION: &str = "SNAPSHOT";

/// Group id Maven assumes for plugins declared without one.
pub const DEFAULT_PLUGIN_GROUP_ID: &str = "org.apache.maven.plugins";

/// Goal used for plugins that are declared without any `<executions>`.
pub const DEFAULT_EXECUTION_GOAL: &str = "default";

/// Java version used when none can be found and unknown versions are tolerated.
pub const DEFAULT_JAVA_VERSION: &str = "1.8";

/// Location of the generated effective descriptor, relative to the project directory.
pub const EFFECTIVE_POM_PATH: &str = "target/effective-pom.xml";

/// Timeout for `mvn help:effective-pom` (10 minutes).
///
/// The first invocation on a cold local repository downloads every plugin
/// and parent of the build, which can take a long time on slow networks.
pub const EFFECTIVE_POM_TIMEOUT: Duration = Duration::from_secs(600);

/// Lines of Maven output per stream quoted when `help:effective-pom` fails.
pub const MAVEN_DIAGNOSTIC_LINES: usize = 20;

/// Name of the Gradle configuration that publishes a module's test classes.
pub const TEST_ARTIFACTS_CONFIGURATION: &str = "testArtifacts";

/// Gradle build file written next to every descriptor.
pub const GRADLE_BUILD_FILE: &str = "build.gradle.kts";

/// Gradle settings file written in the root project directory only.
pub const GRADLE_SETTINGS_FILE: &str = "settings.gradle.kts";

/// Gradle plugin registered for projects that use lombok.
pub const LOMBOK_GRADLE_PLUGIN: (&str, &str) = ("io.freefair.lombok", "8.6");
