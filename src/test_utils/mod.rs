//! Test utilities for pomgrade
//!
//! Helpers for laying out Maven project trees on disk and for enabling
//! logging inside tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use pomgrade_cli::test_utils::{PomFixture, write_pom};
//!
//! let temp = tempfile::TempDir::new().unwrap();
//! PomFixture::multi_module().write_to(temp.path()).unwrap();
//! write_pom(&temp.path().join("extra"), "<project><artifactId>extra</artifactId></project>");
//! ```

pub mod fixtures;

pub use fixtures::PomFixture;

use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG` when it is set; without either, tests run silently.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// Write `content` to `<dir>/pom.xml`, creating `dir` as needed.
///
/// # Panics
///
/// Panics if the directory or file cannot be written.
pub fn write_pom(dir: &Path, content: &str) -> PathBuf {
    std::fs::create_dir_all(dir).expect("create descriptor directory");
    let path = dir.join(crate::constants::DESCRIPTOR_FILE);
    std::fs::write(&path, content).expect("write descriptor");
    path
}
