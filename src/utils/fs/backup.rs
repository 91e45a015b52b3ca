//! Moving files out of the way without overwriting earlier backups.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::PomError;

/// Rename `path` to the first free `<name>.bak<N>` (N starting at 1).
///
/// Returns the new location.
pub fn rename_to_backup(path: &Path) -> Result<PathBuf, PomError> {
    let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let mut counter = 1;
    let mut target = path.with_file_name(format!("{file_name}.bak{counter}"));
    while target.exists() {
        counter += 1;
        target = path.with_file_name(format!("{file_name}.bak{counter}"));
    }
    fs::rename(path, &target).map_err(|e| PomError::io("renaming", path, &e))?;
    Ok(target)
}
