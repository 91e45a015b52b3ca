//! Descriptor loading with a per-workspace cache keyed by canonical path.

use std::path::{Path, PathBuf};

use super::Workspace;
use crate::constants::DESCRIPTOR_FILE;
use crate::core::PomError;
use crate::descriptor::{DescriptorId, parse_descriptor};

/// Backing file for a directory or file path.
pub(super) fn descriptor_file(path: &Path) -> PathBuf {
    if path.is_dir() { path.join(DESCRIPTOR_FILE) } else { path.to_path_buf() }
}

impl Workspace {
    /// Load the descriptor at `path` (a directory or a descriptor file).
    ///
    /// Loading the same canonical path twice returns the same id. A fresh load
    /// resolves the parent chain before returning.
    pub fn load(&mut self, path: &Path) -> Result<DescriptorId, PomError> {
        self.load_in(path, None)
    }

    /// Load `path` as a module of `parent_directory`.
    pub fn load_in(
        &mut self,
        path: &Path,
        parent_directory: Option<DescriptorId>,
    ) -> Result<DescriptorId, PomError> {
        let file = descriptor_file(path);
        if !file.is_file() {
            tracing::debug!("No descriptor at {}", file.display());
            return Err(PomError::DescriptorNotFound {
                path: file.display().to_string(),
            });
        }
        let canonical = file.canonicalize().map_err(|e| PomError::io("resolving", &file, &e))?;

        if let Some(&id) = self.by_path.get(&canonical) {
            if let Some(directory) = parent_directory {
                self.set_parent_directory(id, directory);
            }
            return Ok(id);
        }

        tracing::debug!("Loading descriptor from {}", canonical.display());
        let mut descriptor = parse_descriptor(&canonical, self.options.ignore_unknown_elements)?;
        if let Some(parent_ref) = &descriptor.parent_ref {
            if descriptor.group_id.is_none() {
                descriptor.group_id.clone_from(&parent_ref.group_id);
            }
            if descriptor.version.is_none() {
                descriptor.version.clone_from(&parent_ref.version);
            }
        }

        let id = self.insert(descriptor, canonical);
        if let Some(directory) = parent_directory {
            self.set_parent_directory(id, directory);
        }
        self.resolve_parent(id)?;
        Ok(id)
    }

    /// Like [`Self::load_in`], but a missing descriptor is `Ok(None)`.
    pub fn try_load(
        &mut self,
        path: &Path,
        parent_directory: Option<DescriptorId>,
    ) -> Result<Option<DescriptorId>, PomError> {
        match self.load_in(path, parent_directory) {
            Ok(id) => Ok(Some(id)),
            Err(PomError::DescriptorNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
