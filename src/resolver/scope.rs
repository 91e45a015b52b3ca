//! Maven scope to Gradle configuration mapping.

use std::fmt;

use serde::Serialize;

use crate::config::ConversionOptions;
use crate::descriptor::Dependency;

/// Gradle dependency configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Configuration {
    Api,
    Implementation,
    CompileOnly,
    /// `provided` dependencies that tests also need: emitted as both
    /// `compileOnly` and `testImplementation`.
    CompileOnlyPlusTestImplementation,
    RuntimeOnly,
    TestImplementation,
    AnnotationProcessor,
    TestCompileOnly,
    TestAnnotationProcessor,
}

impl Configuration {
    /// Name used in the build script.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Implementation => "implementation",
            Self::CompileOnly => "compileOnly",
            Self::CompileOnlyPlusTestImplementation => "compileOnly+testImplementation",
            Self::RuntimeOnly => "runtimeOnly",
            Self::TestImplementation => "testImplementation",
            Self::AnnotationProcessor => "annotationProcessor",
            Self::TestCompileOnly => "testCompileOnly",
            Self::TestAnnotationProcessor => "testAnnotationProcessor",
        }
    }

    /// Concrete configurations a declaration is written under.
    #[must_use]
    pub const fn expand(self) -> &'static [Configuration] {
        match self {
            Self::CompileOnlyPlusTestImplementation => {
                &[Self::CompileOnly, Self::TestImplementation]
            }
            Self::Api => &[Self::Api],
            Self::Implementation => &[Self::Implementation],
            Self::CompileOnly => &[Self::CompileOnly],
            Self::RuntimeOnly => &[Self::RuntimeOnly],
            Self::TestImplementation => &[Self::TestImplementation],
            Self::AnnotationProcessor => &[Self::AnnotationProcessor],
            Self::TestCompileOnly => &[Self::TestCompileOnly],
            Self::TestAnnotationProcessor => &[Self::TestAnnotationProcessor],
        }
    }

    /// The four configurations of an annotation processor.
    pub const PROCESSOR: [Configuration; 4] = [
        Self::CompileOnly,
        Self::AnnotationProcessor,
        Self::TestCompileOnly,
        Self::TestAnnotationProcessor,
    ];

    #[must_use]
    pub const fn is_test(self) -> bool {
        matches!(
            self,
            Self::TestImplementation | Self::TestCompileOnly | Self::TestAnnotationProcessor
        )
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a Maven scope to a Gradle configuration.
///
/// `group_id` is the resolved group of the dependency, used for the
/// provided-for-tests override.
#[must_use]
pub fn map_scope(
    options: &ConversionOptions,
    dependency: &Dependency,
    group_id: &str,
    scope: Option<&str>,
) -> Configuration {
    match scope.map(str::trim).unwrap_or_default() {
        "" | "compile" | "compile+runtime" => {
            if options.api_dependencies {
                Configuration::Api
            } else {
                Configuration::Implementation
            }
        }
        "provided" | "providedCompile" => {
            if options.provided_for_tests(group_id, &dependency.artifact_id) {
                Configuration::CompileOnlyPlusTestImplementation
            } else {
                Configuration::CompileOnly
            }
        }
        "runtime" => Configuration::RuntimeOnly,
        "test" | "testCompile" | "testRuntime" => Configuration::TestImplementation,
        "system" => Configuration::CompileOnly,
        other => {
            tracing::warn!("Unknown Maven scope '{other}' on {dependency}, using 'implementation'");
            Configuration::Implementation
        }
    }
}
