//! pomgrade - Maven to Gradle Kotlin DSL conversion
//!
//! pomgrade reads a tree of Maven `pom.xml` descriptors, reconciles the values
//! each descriptor inherits from its parents, and writes equivalent
//! `settings.gradle.kts` and `build.gradle.kts` files.
//!
//! # Architecture Overview
//!
//! A conversion run flows through four stages:
//! 1. **Effective descriptors** - optionally ask Maven (`mvn help:effective-pom`)
//!    for the fully expanded descriptors of the whole build
//! 2. **Loading** - parse the raw descriptors into a [`project::Workspace`],
//!    linking every descriptor to its parent and registering modules
//! 3. **Resolution** - interpolate `${...}` properties, resolve versions and
//!    groups along the parent chain, map scopes, and collect plugin executions
//! 4. **Emission** - render the Gradle files with templates and write them
//!    next to the descriptors
//!
//! Values from the effective descriptor always win over values reconstructed
//! from the raw inheritance chain.
//!
//! # Core Modules
//!
//! ## Engine
//! - [`descriptor`] - descriptor data model and XML parsing
//! - [`project`] - descriptor arena, parent chain linking, effective counterpart lookup
//! - [`resolver`] - properties, versions, scopes, modules, dependency declarations
//! - [`plugins`] - plugin execution merging and the conversion registry
//!
//! ## Input and Output
//! - [`maven`] - the `mvn help:effective-pom` subprocess
//! - [`emit`] - Gradle Kotlin DSL rendering and file writing
//!
//! ## Supporting Modules
//! - [`cli`] - command-line interface
//! - [`config`] - run options and the global configuration file
//! - [`core`] - error types and user-facing error formatting
//! - [`constants`] - file names, defaults, timeouts
//! - [`utils`] - atomic writes and backups
//!
//! # Example
//!
//! ```rust,no_run
//! use pomgrade_cli::config::ConversionOptions;
//! use pomgrade_cli::emit::{GradleEmitter, write_tree};
//! use pomgrade_cli::plugins::ConversionRegistry;
//! use pomgrade_cli::project::Workspace;
//! use pomgrade_cli::resolver::ModuleGraph;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), pomgrade_cli::core::PomError> {
//! let mut workspace = Workspace::new(ConversionOptions::offline());
//! let root = workspace.load(Path::new("."))?;
//! let modules = ModuleGraph::build(&mut workspace, root)?;
//! let emitter = GradleEmitter::new(ConversionRegistry::with_builtin())?;
//! let summary = write_tree(&emitter, &workspace, root, &modules)?;
//! println!("wrote {} files", summary.written.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Command Line
//!
//! ```bash
//! pomgrade gradle .                          # convert the build in the current directory
//! pomgrade gradle . --no-use-effective-pom   # without running Maven
//! pomgrade validate .                        # resolve everything, write nothing
//! pomgrade graph . --output modules.json     # module dependency graph
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod descriptor;
pub mod emit;
pub mod maven;
pub mod plugins;
pub mod project;
pub mod resolver;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
