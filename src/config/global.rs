//! Global configuration file for pomgrade.
//!
//! The file lives at `~/.pomgrade/config.toml` (`%LOCALAPPDATA%\pomgrade\config.toml`
//! on Windows) and holds machine-specific settings that should not be repeated
//! on every invocation. Every field is optional.
//!
//! ```toml
//! local_repository = "/data/maven/repository"
//! default_java_version = "17"
//! annotation_processors = ["io.micronaut:micronaut-inject-java"]
//! force_provided_for_tests = ["org.apache.maven:maven-compat"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Environment variable that overrides the global config location.
pub const CONFIG_ENV_VAR: &str = "POMGRADE_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Local Maven repository root used for parent lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_repository: Option<PathBuf>,

    /// Java version assumed when a project declares none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_java_version: Option<String>,

    /// Extra `group:artifact` coordinates treated as annotation processors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotation_processors: Vec<String>,

    /// Replaces the default provided-for-tests override set when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_provided_for_tests: Option<Vec<String>>,
}

impl GlobalConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the default configuration.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => match std::env::var_os(CONFIG_ENV_VAR) {
                Some(path) => PathBuf::from(path),
                None => Self::default_path()?,
            },
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No global config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read global config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse global config from {}", path.display()))
    }

    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize global config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write global config to {}", path.display()))
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("pomgrade")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".pomgrade")
        };

        Ok(config_dir.join("config.toml"))
    }
}
