//! Repository mirrors from the Maven user settings.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::descriptor::xml::parse_document;

/// A `<mirror>` of `settings.xml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mirror {
    pub id: String,
    pub url: String,
    pub mirror_of: Option<String>,
}

/// `~/.m2/settings.xml`
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".m2").join("settings.xml"))
}

/// Mirrors declared in a Maven settings file.
///
/// A missing or unreadable file yields no mirrors; a malformed one is logged
/// and ignored so the conversion itself can proceed.
#[must_use]
pub fn read_mirrors(path: &Path) -> Vec<Mirror> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("No Maven settings at {}: {e}", path.display());
            return Vec::new();
        }
    };
    match parse_mirrors(&content) {
        Ok(mirrors) => {
            tracing::debug!("Found {} mirror(s) in {}", mirrors.len(), path.display());
            mirrors
        }
        Err(reason) => {
            tracing::warn!("Ignoring malformed Maven settings {}: {reason}", path.display());
            Vec::new()
        }
    }
}

fn parse_mirrors(content: &str) -> Result<Vec<Mirror>, String> {
    let root = parse_document(content)?;
    let Some(mirrors) = root.child("mirrors") else {
        return Ok(Vec::new());
    };
    Ok(mirrors
        .children_named("mirror")
        .filter_map(|mirror| {
            Some(Mirror {
                id: mirror.child_text("id")?,
                url: mirror.child_text("url")?,
                mirror_of: mirror.child_text("mirrorOf"),
            })
        })
        .collect())
}
