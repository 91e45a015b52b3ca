//! Parent resolution for freshly loaded descriptors.
//!
//! Candidates are tried in order: a cached descriptor at the relative path, a
//! fresh load at the relative path, and the local Maven repository. The first
//! candidate whose group and artifact match the `<parent>` block wins.

use std::path::{Path, PathBuf};

use super::Workspace;
use crate::constants::{DEFAULT_PARENT_RELATIVE_PATH, DESCRIPTOR_FILE};
use crate::core::PomError;
use crate::descriptor::{DescriptorId, ParentRef};

impl Workspace {
    /// Resolve and link the parent of `id`. Runs once per fresh load.
    pub(super) fn resolve_parent(
        &mut self,
        id: DescriptorId,
    ) -> Result<Option<DescriptorId>, PomError> {
        let Some(parent_ref) = self[id].parent_ref.clone() else {
            return Ok(None);
        };
        tracing::debug!("Resolving parent of {} -> {}", self[id].ga(), parent_ref.ga());

        let parent = self.find_parent(id, &parent_ref)?;
        if parent == id {
            return Err(self.self_reference(id));
        }

        let found = self.coordinate_of(parent);
        if found.ga() != parent_ref.ga() {
            return Err(PomError::ParentMismatch {
                path: self[id].source_file.display().to_string(),
                declared: parent_ref.id(),
                found: found.id(),
            });
        }
        if found.id() != parent_ref.id() {
            if found.version.contains("${") || parent_ref.id().contains("${") {
                tracing::info!(
                    "In {}: parent {} has an unresolved version, declared {}",
                    self[id].ga(),
                    found.id(),
                    parent_ref.id()
                );
            } else {
                tracing::warn!(
                    "Parent version mismatch in {}: declared {} but found {}",
                    self[id].ga(),
                    parent_ref.id(),
                    found.id()
                );
            }
        }

        self.set_parent(id, parent);
        // Walk the chain above the new parent; meeting `id` again closes a cycle
        let mut cursor = Some(parent);
        let mut steps = 0;
        while let Some(current) = cursor {
            if current == id || steps > self.len() {
                return Err(self.self_reference(id));
            }
            cursor = self[current].parent;
            steps += 1;
        }
        Ok(Some(parent))
    }

    fn find_parent(
        &mut self,
        id: DescriptorId,
        parent_ref: &ParentRef,
    ) -> Result<DescriptorId, PomError> {
        let local = relative_parent_file(self[id].directory(), parent_ref.relative_path.as_deref());

        if let Some(&cached) = local.canonicalize().ok().and_then(|c| self.by_path.get(&c)) {
            if cached == id {
                return Err(self.self_reference(id));
            }
            if self.coordinate_of(cached).id() == parent_ref.id() {
                return Ok(cached);
            }
        }

        // The aggregator edge of a parent is only known to the module walk
        if let Some(candidate) = self.try_load(&local, None)? {
            if candidate == id {
                return Err(self.self_reference(id));
            }
            let found = self.coordinate_of(candidate);
            if found.ga() == parent_ref.ga() {
                return Ok(candidate);
            }
            tracing::info!(
                "In {}: declared parent {} differs from {} at {}, searching the local repository",
                self[id].ga(),
                parent_ref.ga(),
                found.ga(),
                local.display()
            );
        }

        let repository = self.repository_file(parent_ref);
        if let Some(candidate) = self.try_load(&repository, None)? {
            return Ok(candidate);
        }

        Err(PomError::ParentNotFound {
            coordinate: parent_ref.id(),
            path: self[id].source_file.display().to_string(),
            local: local.display().to_string(),
            repository: repository.display().to_string(),
        })
    }

    /// `<repo>/<group as path>/<artifact>/<version>/<artifact>-<version>.pom`.
    fn repository_file(&self, parent_ref: &ParentRef) -> PathBuf {
        let group_path = parent_ref.group_id.as_deref().unwrap_or_default().replace('.', "/");
        let artifact = parent_ref.artifact_id.as_deref().unwrap_or_default();
        let version = parent_ref.version.as_deref().unwrap_or_default();
        self.options
            .local_repository
            .join(group_path)
            .join(artifact)
            .join(version)
            .join(format!("{artifact}-{version}.pom"))
    }

    /// Coordinate used for parent matching: effective when available.
    fn coordinate_of(&self, id: DescriptorId) -> Coordinate {
        let descriptor = self.effective_or_raw(id);
        Coordinate {
            group_id: descriptor.group_id.clone().unwrap_or_default(),
            artifact_id: descriptor.artifact_id.clone().unwrap_or_default(),
            version: descriptor.version().to_string(),
        }
    }

    fn self_reference(&self, id: DescriptorId) -> PomError {
        PomError::SelfReference {
            coordinate: self[id].id(),
            path: self[id].source_file.display().to_string(),
            chain: self.chain_description(id),
        }
    }
}

struct Coordinate {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl Coordinate {
    fn ga(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    fn id(&self) -> String {
        format!("{}:{}", self.ga(), self.version)
    }
}

/// Parent file named by `relativePath`, which may point at a directory or a file.
fn relative_parent_file(directory: &Path, relative_path: Option<&str>) -> PathBuf {
    let relative = relative_path
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PARENT_RELATIVE_PATH);
    let candidate = directory.join(relative);
    if candidate.extension().is_some_and(|ext| ext == "xml") {
        candidate
    } else {
        candidate.join(DESCRIPTOR_FILE)
    }
}
