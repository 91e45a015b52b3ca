//! Atomic file writes using a temp-and-rename strategy.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::PomError;

/// Write `content` to `path` so readers see either the old or the new file.
///
/// The content goes to a sibling temp file which is synced and then renamed
/// over the target. Missing parent directories are created.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<(), PomError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PomError::io("creating directory", parent, &e))?;
    }

    let temp_path = temp_path_for(path);
    {
        let mut file =
            fs::File::create(&temp_path).map_err(|e| PomError::io("creating", &temp_path, &e))?;
        file.write_all(content).map_err(|e| PomError::io("writing", &temp_path, &e))?;
        file.sync_all().map_err(|e| PomError::io("syncing", &temp_path, &e))?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PomError::io("renaming temp file to", path, &e)
    })
}

/// String convenience wrapper around [`atomic_write`].
pub fn safe_write(path: &Path, content: &str) -> Result<(), PomError> {
    atomic_write(path, content.as_bytes())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
