//! Java language level of a descriptor.

use super::interpolation::{has_placeholder, interpolate};
use crate::core::PomError;
use crate::descriptor::DescriptorId;
use crate::project::Workspace;

const COMPILER_KEYS: &[&str] = &["release", "source", "target"];
const PROPERTY_KEYS: &[&str] =
    &["maven.compiler.release", "maven.compiler.source", "maven.compiler.target", "java.version"];

/// Java version for descriptor `id`.
///
/// Looks at the compiler plugin configuration, then the well-known compiler
/// properties, then the parent. When nothing is declared anywhere, the
/// configured default is used if unknown versions are tolerated.
pub fn java_version(workspace: &Workspace, id: DescriptorId) -> Result<String, PomError> {
    let declared = workspace.ancestors(id).find_map(|ancestor| {
        declared_version(workspace, ancestor).map(|raw| (ancestor, raw))
    });

    let Some((declaring, raw)) = declared else {
        let descriptor = &workspace[id];
        if workspace.options().ignore_unknown_java_version {
            tracing::warn!(
                "No Java version found in {}, using {}",
                descriptor.id_and_path(),
                workspace.options().default_java_version
            );
            return Ok(workspace.options().default_java_version.clone());
        }
        return Err(PomError::UnresolvedJavaVersion {
            coordinate: descriptor.id(),
            path: descriptor.source_file.display().to_string(),
            raw: String::new(),
        });
    };

    let resolved = interpolate(workspace, &raw, declaring)?;
    if resolved.trim().is_empty() || has_placeholder(&resolved) {
        let descriptor = &workspace[id];
        return Err(PomError::UnresolvedJavaVersion {
            coordinate: descriptor.id(),
            path: descriptor.source_file.display().to_string(),
            raw: format!("{raw} => {resolved}"),
        });
    }
    Ok(resolved.trim().to_string())
}

fn declared_version(workspace: &Workspace, id: DescriptorId) -> Option<String> {
    let descriptor = workspace.effective_or_raw(id);
    let from_compiler = descriptor.compiler_plugin().and_then(|plugin| {
        COMPILER_KEYS.iter().find_map(|key| plugin.configuration.get(key))
    });
    from_compiler
        .or_else(|| {
            PROPERTY_KEYS.iter().find_map(|key| {
                descriptor.properties.get(*key).map(String::as_str).filter(|v| !v.trim().is_empty())
            })
        })
        .map(str::to_string)
}
