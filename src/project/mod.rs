//! The descriptor workspace: an arena of loaded descriptors plus the lookups
//! that connect them.
//!
//! A [`Workspace`] is the context object for one conversion run. It owns every
//! [`Descriptor`] that was loaded, indexes them by canonical file path, and
//! holds the optional list of effective descriptors computed by Maven. The
//! relationship fields of a descriptor (`parent`, `parent_directory`,
//! `effective`) are written once by the workspace and only read afterwards.
//!
//! # Loading
//!
//! ```rust,no_run
//! use pomgrade_cli::config::ConversionOptions;
//! use pomgrade_cli::project::Workspace;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), pomgrade_cli::core::PomError> {
//! let mut workspace = Workspace::new(ConversionOptions::offline());
//! let root = workspace.load(Path::new("my-project"))?;
//! for ancestor in workspace.ancestors(root) {
//!     println!("{}", workspace[ancestor].id());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Independent runs use independent workspaces; nothing is cached globally.

mod effective;
mod loader;
mod parent;

use std::collections::HashMap;
use std::ops::Index;
use std::path::{Path, PathBuf};

use crate::config::ConversionOptions;
use crate::descriptor::{Descriptor, DescriptorId};

/// Arena of descriptors for one conversion run.
#[derive(Debug)]
pub struct Workspace {
    descriptors: Vec<Descriptor>,
    by_path: HashMap<PathBuf, DescriptorId>,
    effective_projects: Option<Vec<Descriptor>>,
    options: ConversionOptions,
}

impl Workspace {
    /// Create an empty workspace without effective descriptors.
    #[must_use]
    pub fn new(options: ConversionOptions) -> Self {
        Self {
            descriptors: Vec::new(),
            by_path: HashMap::new(),
            effective_projects: None,
            options,
        }
    }

    /// Attach the flat list returned by the effective descriptor service.
    ///
    /// Must be called before descriptors are loaded, since the match of each
    /// descriptor to its effective counterpart is memoized on first use.
    #[must_use]
    pub fn with_effective_projects(mut self, projects: Vec<Descriptor>) -> Self {
        self.effective_projects = Some(projects);
        self
    }

    #[must_use]
    pub const fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Effective descriptors, or `None` when the service was not invoked.
    #[must_use]
    pub fn effective_projects(&self) -> Option<&[Descriptor]> {
        self.effective_projects.as_deref()
    }

    #[must_use]
    pub fn get(&self, id: DescriptorId) -> Option<&Descriptor> {
        self.descriptors.get(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Ids of all loaded descriptors in load order.
    pub fn ids(&self) -> impl Iterator<Item = DescriptorId> + '_ {
        (0..self.descriptors.len()).map(DescriptorId)
    }

    /// Cached descriptor for a file or directory, without loading it.
    #[must_use]
    pub fn lookup(&self, path: &Path) -> Option<DescriptorId> {
        let file = loader::descriptor_file(path);
        let canonical = file.canonicalize().ok()?;
        self.by_path.get(&canonical).copied()
    }

    /// Resolved inheritance parent of `id`.
    #[must_use]
    pub fn parent_of(&self, id: DescriptorId) -> Option<DescriptorId> {
        self[id].parent
    }

    /// `id` followed by its parent, grandparent, and so on.
    #[must_use]
    pub const fn ancestors(&self, id: DescriptorId) -> Ancestors<'_> {
        Ancestors {
            workspace: self,
            next: Some(id),
        }
    }

    /// Human-readable inheritance chain, e.g. `g:a:1 -> g:p:1`.
    #[must_use]
    pub fn chain_description(&self, id: DescriptorId) -> String {
        self.ancestors(id)
            .take(self.descriptors.len() + 1)
            .map(|ancestor| self[ancestor].id_and_path())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    fn insert(&mut self, descriptor: Descriptor, canonical: PathBuf) -> DescriptorId {
        let id = DescriptorId(self.descriptors.len());
        self.descriptors.push(descriptor);
        self.by_path.insert(canonical, id);
        id
    }

    /// Set the `parent` edge. Returns `false` if it was already set.
    fn set_parent(&mut self, id: DescriptorId, parent: DescriptorId) -> bool {
        let slot = &mut self.descriptors[id.0].parent;
        if slot.is_some() {
            return false;
        }
        *slot = Some(parent);
        true
    }

    /// Set the `parent_directory` edge. Returns `false` if it was already set.
    fn set_parent_directory(&mut self, id: DescriptorId, parent: DescriptorId) -> bool {
        let slot = &mut self.descriptors[id.0].parent_directory;
        if slot.is_some() {
            return false;
        }
        *slot = Some(parent);
        true
    }
}

impl Index<DescriptorId> for Workspace {
    type Output = Descriptor;

    fn index(&self, id: DescriptorId) -> &Descriptor {
        &self.descriptors[id.0]
    }
}

/// Iterator over a descriptor and its resolved ancestors.
///
/// The loader rejects parent cycles, so the iteration always terminates.
pub struct Ancestors<'a> {
    workspace: &'a Workspace,
    next: Option<DescriptorId>,
}

impl Iterator for Ancestors<'_> {
    type Item = DescriptorId;

    fn next(&mut self) -> Option<DescriptorId> {
        let current = self.next?;
        self.next = self.workspace[current].parent;
        Some(current)
    }
}
