//! Dependency version and group resolution.
//!
//! A version is taken from the first source that yields a placeholder-free
//! value:
//!
//! 1. the literal version on the dependency,
//! 2. the matching dependency of the effective descriptor,
//! 3. the dependency's own templated version, interpolated,
//! 4. `dependencyManagement` of the descriptor and its ancestors, interpolated
//!    in the ancestor that declares the entry,
//! 5. `dependencyManagement` of any effective project.
//!
//! `None` means no source matched; callers apply the skip-or-fail policy.

use super::interpolation::{has_placeholder, interpolate};
use crate::core::PomError;
use crate::descriptor::{Dependency, DescriptorId};
use crate::project::Workspace;

/// Resolve the version of `dependency` as declared by descriptor `id`.
pub fn resolve_version(
    workspace: &Workspace,
    dependency: &Dependency,
    id: DescriptorId,
) -> Result<Option<String>, PomError> {
    let declared = dependency.version.as_deref().map(str::trim).filter(|v| !v.is_empty());
    if let Some(version) = declared
        && !has_placeholder(version)
    {
        return Ok(Some(version.to_string()));
    }

    let group_id = resolve_group_id(workspace, dependency, id)?.unwrap_or_default();
    let artifact_id = interpolate(workspace, &dependency.artifact_id, id)?;

    if let Some(effective) = workspace.effective_of(id)
        && let Some(version) = effective
            .dependencies
            .iter()
            .filter(|d| d.matches(&group_id, &artifact_id))
            .find_map(|d| d.version.as_deref())
            .filter(|v| !has_placeholder(v))
    {
        return Ok(Some(version.to_string()));
    }

    if let Some(version) = declared {
        let expanded = interpolate(workspace, version, id)?;
        if !has_placeholder(&expanded) {
            return Ok(Some(expanded));
        }
    }

    if let Some(version) = managed_version(workspace, &group_id, &artifact_id, id)? {
        return Ok(Some(version));
    }

    Ok(workspace.effective_projects().and_then(|projects| {
        projects.iter().find_map(|project| {
            project
                .dependency_management
                .iter()
                .filter(|d| d.matches(&group_id, &artifact_id))
                .find_map(|d| d.version.clone())
                .filter(|v| !has_placeholder(v))
        })
    }))
}

/// Group id of a dependency: its own (interpolated) group, or the closest
/// declared group id of the descriptor chain.
pub fn resolve_group_id(
    workspace: &Workspace,
    dependency: &Dependency,
    id: DescriptorId,
) -> Result<Option<String>, PomError> {
    if let Some(group) = dependency.group_id.as_deref().filter(|g| !g.trim().is_empty()) {
        return interpolate(workspace, group.trim(), id).map(Some);
    }
    descriptor_group_id(workspace, id)
}

/// Group id of a descriptor, inherited from the closest ancestor declaring one.
pub fn descriptor_group_id(
    workspace: &Workspace,
    id: DescriptorId,
) -> Result<Option<String>, PomError> {
    for ancestor in workspace.ancestors(id) {
        if let Some(group) = workspace[ancestor].group_id.as_deref().filter(|g| !g.trim().is_empty()) {
            return interpolate(workspace, group.trim(), ancestor).map(Some);
        }
    }
    Ok(None)
}

/// Walk `dependencyManagement` up the ancestor chain; the first entry wins.
fn managed_version(
    workspace: &Workspace,
    group_id: &str,
    artifact_id: &str,
    id: DescriptorId,
) -> Result<Option<String>, PomError> {
    for ancestor in workspace.ancestors(id) {
        for managed in &workspace[ancestor].dependency_management {
            if managed.artifact_id != artifact_id {
                continue;
            }
            let Some(version) = managed.version.as_deref() else { continue };
            let managed_group = match managed.group_id.as_deref() {
                Some(group) if has_placeholder(group) => interpolate(workspace, group, ancestor)?,
                Some(group) => group.to_string(),
                None => continue,
            };
            if managed_group != group_id {
                continue;
            }
            let expanded = interpolate(workspace, version, ancestor)?;
            if has_placeholder(&expanded) {
                tracing::debug!(
                    "Managed version of {group_id}:{artifact_id} in {} is unresolved: {expanded}",
                    workspace[ancestor].ga()
                );
                return Ok(None);
            }
            return Ok(Some(expanded));
        }
    }
    Ok(None)
}
