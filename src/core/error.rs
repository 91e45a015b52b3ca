//! Error handling for pomgrade
//!
//! This module provides the error types and user-friendly error reporting for
//! the Maven-to-Gradle converter. The error system follows two principles:
//! 1. **Strongly-typed errors** so the resolution engine can be matched on precisely
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`PomError`] - Enumerated error types for every failure of the engine
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! - **Loading**: [`PomError::ParseError`], [`PomError::DescriptorNotFound`]
//! - **Inheritance**: [`PomError::ParentNotFound`], [`PomError::ParentMismatch`],
//!   [`PomError::SelfReference`]
//! - **Module graph**: [`PomError::DuplicateModule`], [`PomError::ModuleCycle`]
//! - **Resolution**: [`PomError::UnresolvedVersion`], [`PomError::UnresolvedNestedProperty`],
//!   [`PomError::UnresolvedJavaVersion`]
//! - **External tools**: [`PomError::MavenNotFound`], [`PomError::EffectiveDescriptorFailed`]
//!
//! Every fatal variant carries the offending coordinate and descriptor path so a
//! failure can be acted on without a debugger.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pomgrade_cli::core::{PomError, user_friendly_error};
//!
//! let error = PomError::DuplicateModule {
//!     coordinate: "com.acme:shared".to_string(),
//!     first: "libs:shared".to_string(),
//!     second: "apps:shared".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for pomgrade operations.
///
/// Variants are grouped by the stage of the conversion that raises them. All
/// fields are plain strings so the error stays [`Clone`] and can be moved into an
/// [`ErrorContext`] after being downcast from an [`anyhow::Error`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PomError {
    /// A descriptor file exists but is not well-formed.
    #[error("Failed to parse descriptor {path}: {reason}")]
    ParseError {
        /// Path of the descriptor that failed to parse
        path: String,
        /// Parser message
        reason: String,
    },

    /// No descriptor file exists at the requested location.
    ///
    /// Not fatal on its own: the loader reports it and the caller decides.
    #[error("Descriptor not found: {path}")]
    DescriptorNotFound {
        /// Path that was checked
        path: String,
    },

    /// The declared parent could be located neither locally nor in the repository.
    #[error(
        "Parent {coordinate} of {path} not found: tried local [{local}] and repository [{repository}]"
    )]
    ParentNotFound {
        /// Declared parent coordinate
        coordinate: String,
        /// Descriptor whose parent is missing
        path: String,
        /// Local candidate location
        local: String,
        /// Repository candidate location
        repository: String,
    },

    /// The resolved parent does not carry the declared group/artifact.
    #[error("Parent mismatch in {path}: declared {declared} but found {found}")]
    ParentMismatch {
        /// Descriptor whose parent is inconsistent
        path: String,
        /// Coordinate from the `<parent>` block
        declared: String,
        /// Coordinate of the descriptor found at the parent location
        found: String,
    },

    /// A descriptor is its own parent, directly or through a chain.
    #[error("Descriptor {coordinate} at {path} is its own parent: {chain}")]
    SelfReference {
        /// Coordinate of the descriptor
        coordinate: String,
        /// Path of the descriptor
        path: String,
        /// The parent chain that closes the cycle
        chain: String,
    },

    /// Two module paths register the same group:artifact.
    #[error("Module {coordinate} is declared twice: at '{first}' and at '{second}'")]
    DuplicateModule {
        /// Duplicated group:artifact
        coordinate: String,
        /// Module path registered first
        first: String,
        /// Module path registered second
        second: String,
    },

    /// Modules depend on each other in a cycle.
    #[error("Circular module dependency detected: {cycle}")]
    ModuleCycle {
        /// Module paths forming the cycle, first repeated at the end
        cycle: String,
    },

    /// No version source yielded a version for a dependency.
    #[error("Failed to resolve version for dependency {dependency} in {coordinate} ({path})")]
    UnresolvedVersion {
        /// group:artifact of the dependency
        dependency: String,
        /// Coordinate of the declaring descriptor
        coordinate: String,
        /// Path of the declaring descriptor
        path: String,
    },

    /// A property value references a property that cannot be resolved.
    #[error("Property '{key}' in {coordinate} expands to unresolved value '{value}'")]
    UnresolvedNestedProperty {
        /// Property key whose value could not be fully expanded
        key: String,
        /// Partially expanded value
        value: String,
        /// Coordinate of the descriptor being interpolated
        coordinate: String,
    },

    /// The Java version of a descriptor could not be determined.
    #[error("Failed to determine Java version of {coordinate} ({path}): '{raw}'")]
    UnresolvedJavaVersion {
        /// Coordinate of the descriptor
        coordinate: String,
        /// Path of the descriptor
        path: String,
        /// Raw value found, empty when nothing was declared
        raw: String,
    },

    /// The `mvn` executable is not on the PATH.
    #[error("Maven is not installed or not found in PATH")]
    MavenNotFound,

    /// The effective descriptor service failed.
    #[error("Failed to compute effective descriptors in {directory}: {reason}")]
    EffectiveDescriptorFailed {
        /// Project directory the service ran in
        directory: String,
        /// Failure description
        reason: String,
    },

    /// Both dependency modes were requested at the same time.
    #[error("Cannot use --use-api-dependencies and --use-implementation-dependencies together")]
    ConflictingDependencyMode,

    /// Configuration file or option problem.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// File system failure with the operation and path it happened on.
    #[error("I/O error while {operation} {path}: {reason}")]
    Io {
        /// What was being done (e.g. "reading")
        operation: String,
        /// Path involved
        path: String,
        /// Operating system message
        reason: String,
    },

    /// Gradle template rendering failed.
    #[error("Template error: {reason}")]
    TemplateError {
        /// Renderer message
        reason: String,
    },
}

impl PomError {
    /// Build an [`PomError::Io`] from a [`std::io::Error`].
    pub fn io(operation: &str, path: impl AsRef<std::path::Path>, error: &std::io::Error) -> Self {
        Self::Io {
            operation: operation.to_string(),
            path: path.as_ref().display().to_string(),
            reason: error.to_string(),
        }
    }

    /// Whether the error aborts the whole run.
    ///
    /// Only a missing descriptor is recoverable; callers decide what to do with it.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::DescriptorNotFound { .. })
    }
}

/// Error wrapper that adds a suggestion and details for display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PomError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details.
    #[must_use]
    pub const fn new(error: PomError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for the CLI.
///
/// Known [`PomError`] variants get a tailored suggestion. Anything else is
/// reported with its full `anyhow` context chain as details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(pom_error) = error.downcast_ref::<PomError>() {
        return create_error_context(pom_error.clone());
    }

    for cause in error.chain() {
        if let Some(pom_error) = cause.downcast_ref::<PomError>() {
            return create_error_context(pom_error.clone())
                .with_details(format!("{error:#}"));
        }
    }

    ErrorContext::new(PomError::ConfigError {
        message: error.to_string(),
    })
    .with_details(format!("{error:#}"))
}

fn create_error_context(error: PomError) -> ErrorContext {
    match &error {
        PomError::ParseError { path, .. } => {
            let suggestion = format!("Check that {path} is a well-formed Maven descriptor");
            ErrorContext::new(error).with_suggestion(suggestion).with_details(
                "Malformed descriptors abort the conversion because inherited values cannot be trusted",
            )
        }
        PomError::ParentNotFound { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Set <relativePath> in the <parent> block, or run 'mvn install' on the parent so it is available in the local repository",
            )
            .with_details("Parents are looked up by relative path first, then in the local Maven repository"),
        PomError::ParentMismatch { .. } => ErrorContext::new(error)
            .with_suggestion("Make the <parent> groupId/artifactId match the descriptor found at <relativePath>")
            .with_details(
                "Resolving against the wrong ancestor would silently use the wrong properties and managed versions",
            ),
        PomError::SelfReference { .. } => ErrorContext::new(error)
            .with_suggestion("Fix the <parent> block so the inheritance chain ends at a root descriptor"),
        PomError::DuplicateModule { .. } => ErrorContext::new(error)
            .with_suggestion("Give each module a distinct artifactId, or remove one of the <module> entries"),
        PomError::ModuleCycle { .. } => ErrorContext::new(error)
            .with_suggestion("Remove one of the module dependencies that form the cycle"),
        PomError::UnresolvedVersion { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Declare the version, add it to <dependencyManagement>, or pass --ignore-unknown-versions to skip such dependencies",
            ),
        PomError::UnresolvedNestedProperty { key, .. } => {
            let suggestion = format!("Define every property referenced by '{key}' in the descriptor or one of its parents");
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        PomError::UnresolvedJavaVersion { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Set maven.compiler.source / maven.compiler.release, or pass --ignore-unknown-java-version",
            ),
        PomError::MavenNotFound => ErrorContext::new(error)
            .with_suggestion("Install Maven or pass --no-use-effective-pom to work from the raw descriptors only")
            .with_details("The effective descriptor is computed by running 'mvn help:effective-pom'"),
        PomError::EffectiveDescriptorFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Run 'mvn help:effective-pom' manually to see the Maven error"),
        PomError::ConflictingDependencyMode => ErrorContext::new(error)
            .with_suggestion("Pass only one of --use-api-dependencies or --use-implementation-dependencies"),
        PomError::DescriptorNotFound { .. }
        | PomError::ConfigError { .. }
        | PomError::Io { .. }
        | PomError::TemplateError { .. } => ErrorContext::new(error),
    }
}
