//! Registry of the modules of a multi-module build.
//!
//! [`ModuleGraph::build`] walks `<modules>` depth-first from the root and maps
//! each module's `group:artifact` to its Gradle path: root-relative module
//! names joined with `:` (`a:b` for module `b` inside module `a`).

use std::collections::HashMap;

use serde::Serialize;

use super::version_resolution::descriptor_group_id;
use crate::core::PomError;
use crate::descriptor::DescriptorId;
use crate::project::Workspace;

/// A registered module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleEntry {
    /// `group:artifact`
    pub coordinate: String,
    /// Colon-joined Gradle path without the leading `:`.
    pub path: String,
    #[serde(skip)]
    pub id: DescriptorId,
}

/// Coordinate to module path registry, read-only once built.
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    entries: Vec<ModuleEntry>,
    by_coordinate: HashMap<String, usize>,
}

impl ModuleGraph {
    /// Load every module below `root` and register it.
    ///
    /// A module directory without a descriptor is skipped with a warning. Two
    /// modules with the same coordinate fail with [`PomError::DuplicateModule`].
    pub fn build(workspace: &mut Workspace, root: DescriptorId) -> Result<Self, PomError> {
        let mut graph = Self::default();
        graph.visit(workspace, root, "")?;
        tracing::debug!("Registered {} module(s) below {}", graph.len(), workspace[root].ga());
        Ok(graph)
    }

    fn visit(
        &mut self,
        workspace: &mut Workspace,
        current: DescriptorId,
        parent_path: &str,
    ) -> Result<(), PomError> {
        let directory = workspace[current].directory().to_path_buf();
        let modules = workspace[current].modules.clone();

        for module in modules {
            let module_dir = directory.join(&module);
            let Some(child) = workspace.try_load(&module_dir, Some(current))? else {
                tracing::warn!("Module directory not found: {}", module_dir.display());
                continue;
            };
            let Some(artifact_id) = workspace[child].artifact_id.clone() else {
                tracing::warn!("Module {} declares no artifactId", module_dir.display());
                continue;
            };

            let path = if parent_path.is_empty() {
                module.trim_matches('/').to_string()
            } else {
                format!("{parent_path}:{}", module.trim_matches('/'))
            };
            let group_id = descriptor_group_id(workspace, child)?.unwrap_or_default();
            self.register(format!("{group_id}:{artifact_id}"), path.clone(), child)?;
            self.visit(workspace, child, &path)?;
        }
        Ok(())
    }

    fn register(
        &mut self,
        coordinate: String,
        path: String,
        id: DescriptorId,
    ) -> Result<(), PomError> {
        if let Some(&existing) = self.by_coordinate.get(&coordinate) {
            return Err(PomError::DuplicateModule {
                coordinate,
                first: self.entries[existing].path.clone(),
                second: path,
            });
        }
        tracing::debug!("Module {coordinate} -> :{path}");
        self.by_coordinate.insert(coordinate.clone(), self.entries.len());
        self.entries.push(ModuleEntry {
            coordinate,
            path,
            id,
        });
        Ok(())
    }

    /// Gradle path of the module with the given coordinate.
    #[must_use]
    pub fn find(&self, group_id: &str, artifact_id: &str) -> Option<&ModuleEntry> {
        self.by_coordinate
            .get(&format!("{group_id}:{artifact_id}"))
            .map(|&index| &self.entries[index])
    }

    /// Registered modules in walk order.
    #[must_use]
    pub fn entries(&self) -> &[ModuleEntry] {
        &self.entries
    }

    /// Module registered for a descriptor.
    #[must_use]
    pub fn entry_for(&self, id: DescriptorId) -> Option<&ModuleEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
