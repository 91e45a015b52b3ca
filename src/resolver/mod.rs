//! Resolution of descriptor values against the inheritance tree.
//!
//! Everything here reads a loaded [`crate::project::Workspace`]; only
//! [`ModuleGraph::build`] loads further descriptors (the modules).
//!
//! # Modules
//!
//! - [`interpolation`] - `${key}` placeholder expansion along the parent chain
//! - [`version_resolution`] - dependency version and group lookup
//! - [`scope`] - Maven scope to Gradle configuration mapping
//! - [`module_graph`] - coordinate to Gradle path registry of a multi-module build
//! - [`java_version`] - language level of a descriptor
//! - [`dependency_processing`] - Gradle dependency declarations of a descriptor
//! - [`module_dependencies`] - project dependencies between modules, cycles and build order
//!
//! # Example
//!
//! ```rust,no_run
//! use pomgrade_cli::config::ConversionOptions;
//! use pomgrade_cli::project::Workspace;
//! use pomgrade_cli::resolver::{DependencyProcessor, ModuleGraph};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), pomgrade_cli::core::PomError> {
//! let mut workspace = Workspace::new(ConversionOptions::offline());
//! let root = workspace.load(Path::new("."))?;
//! let modules = ModuleGraph::build(&mut workspace, root)?;
//! let processor = DependencyProcessor::new(&workspace, &modules);
//! for entry in modules.entries() {
//!     let plan = processor.declarations(entry.id)?;
//!     println!(":{} has {} declaration(s)", entry.path, plan.declarations.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod dependency_processing;
pub mod interpolation;
pub mod java_version;
pub mod module_dependencies;
pub mod module_graph;
pub mod scope;
pub mod version_resolution;

pub use dependency_processing::{
    DependencyDeclaration, DependencyPlan, DependencyProcessor, DependencyTarget, VersionVariable,
};
pub use interpolation::{has_placeholder, interpolate, lookup_property};
pub use java_version::java_version;
pub use module_dependencies::{GraphExport, ModuleDependencyGraph, ModuleEdge};
pub use module_graph::{ModuleEntry, ModuleGraph};
pub use scope::{Configuration, map_scope};
pub use version_resolution::{descriptor_group_id, resolve_group_id, resolve_version};
