//! Writing the generated files of a whole build.

use std::path::PathBuf;

use super::GradleEmitter;
use crate::constants::{GRADLE_BUILD_FILE, GRADLE_SETTINGS_FILE};
use crate::core::PomError;
use crate::descriptor::DescriptorId;
use crate::project::Workspace;
use crate::resolver::ModuleGraph;
use crate::utils::fs::{rename_to_backup, safe_write};

/// Files touched by [`write_tree`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Generated files in write order, settings first.
    pub written: Vec<PathBuf>,
    /// Stray module settings files and where they were moved.
    pub backups: Vec<(PathBuf, PathBuf)>,
}

/// Write `settings.gradle.kts` at the root and a `build.gradle.kts` next to the
/// root descriptor and every registered module.
///
/// A `settings.gradle.kts` already present in a module directory is moved to
/// the first free `settings.gradle.kts.bak<N>`.
pub fn write_tree(
    emitter: &GradleEmitter,
    workspace: &Workspace,
    root: DescriptorId,
    modules: &ModuleGraph,
) -> Result<WriteSummary, PomError> {
    let mut summary = WriteSummary::default();
    let root_dir = workspace[root].directory().to_path_buf();

    let settings = emitter.render_settings(workspace, root, modules)?;
    let settings_path = root_dir.join(GRADLE_SETTINGS_FILE);
    safe_write(&settings_path, &settings)?;
    tracing::info!("Generated {}", settings_path.display());
    summary.written.push(settings_path);

    let targets = std::iter::once(root).chain(modules.entries().iter().map(|entry| entry.id));
    for id in targets {
        let descriptor = &workspace[id];
        tracing::info!("Generating {} for {}", GRADLE_BUILD_FILE, descriptor.ga());
        let build = emitter.render_build(workspace, modules, id)?;
        let build_path = descriptor.directory().join(GRADLE_BUILD_FILE);
        safe_write(&build_path, &build)?;
        summary.written.push(build_path);

        if id == root {
            continue;
        }
        let stray = descriptor.directory().join(GRADLE_SETTINGS_FILE);
        if stray.exists() {
            let moved = rename_to_backup(&stray)?;
            tracing::warn!(
                "Renamed unexpected {} in module: {} -> {}",
                GRADLE_SETTINGS_FILE,
                stray.display(),
                moved.display()
            );
            summary.backups.push((stray, moved));
        }
    }
    Ok(summary)
}
