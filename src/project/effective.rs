//! Matching descriptors to their effective counterparts.

use super::Workspace;
use crate::descriptor::{Descriptor, DescriptorId};

impl Workspace {
    /// Effective counterpart of `id`: the first effective project with the same
    /// group and artifact.
    ///
    /// The match is memoized on the descriptor, so repeated calls return the
    /// same instance without scanning again. Returns `None` when the effective
    /// descriptor service was not invoked or nothing matches.
    #[must_use]
    pub fn effective_of(&self, id: DescriptorId) -> Option<&Descriptor> {
        let projects = self.effective_projects.as_deref()?;
        let descriptor = &self[id];
        let index = descriptor.effective.get_or_init(|| {
            let found = projects.iter().position(|project| {
                project.has_ga(descriptor.group_id.as_deref(), descriptor.artifact_id.as_deref())
            });
            if found.is_none() {
                tracing::debug!("No effective descriptor for {}", descriptor.ga());
            }
            found
        });
        index.and_then(|i| projects.get(i))
    }

    /// Effective counterpart of `id`, or the raw descriptor when there is none.
    #[must_use]
    pub fn effective_or_raw(&self, id: DescriptorId) -> &Descriptor {
        self.effective_of(id).unwrap_or(&self[id])
    }
}
