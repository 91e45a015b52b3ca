//! File system helpers for writing generated build files.

mod atomic;
mod backup;

pub use atomic::{atomic_write, safe_write};
pub use backup::rename_to_backup;
