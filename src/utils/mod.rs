//! Shared helpers.
//!
//! - [`fs`] - atomic writes and backups of generated files

pub mod fs;

pub use fs::{atomic_write, rename_to_backup, safe_write};
