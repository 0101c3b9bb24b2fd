//! Configuration for appup.
//!
//! The tracked repository, asset suffix, and local paths are explicit
//! [`AppConfig`] fields loaded from a TOML file, so deployments can point
//! appup at a different repository and tests can run against throwaway
//! directories.
//!
//! # File Location
//!
//! Resolution order:
//! 1. `--config <path>` CLI flag
//! 2. `APPUP_CONFIG` environment variable
//! 3. `~/.appup/config.toml`
//!
//! A missing file is not an error: defaults track the Nextcloud desktop
//! AppImage, so a bare `appup` works without any setup.
//!
//! # Example
//!
//! ```toml
//! repo_owner = "nextcloud"
//! repo_name = "desktop"
//! asset_suffix = ".AppImage"
//!
//! [network]
//! timeout_secs = 30
//! retries = 3
//! ```

use crate::constants::{DEFAULT_QUERY_RETRIES, DEFAULT_REQUEST_TIMEOUT, VERSION_MARKER_FILE};
use crate::core::AppupError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Environment variable overriding the config file path.
pub const CONFIG_ENV_VAR: &str = "APPUP_CONFIG";

/// Network behavior for release-host requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network timeout in seconds. Default: 30.
    ///
    /// Total deadline for the metadata query; for the artifact download it
    /// bounds connection setup and per-read stalls instead, so a large
    /// artifact that keeps transferring is never cut off.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry attempts for the release metadata query. Default: 3.
    ///
    /// The artifact download is never retried; a failed download leaves the
    /// partial file in place and the next full run starts over.
    #[serde(default = "default_retries")]
    pub retries: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
        }
    }
}

impl NetworkConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_retries() -> usize {
    DEFAULT_QUERY_RETRIES
}

/// Top-level appup configuration.
///
/// Every field has a serde default, so an empty file (or no file at all)
/// yields a fully usable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Release-host repository owner.
    #[serde(default = "default_repo_owner")]
    pub repo_owner: String,

    /// Release-host repository name.
    #[serde(default = "default_repo_name")]
    pub repo_name: String,

    /// Suffix an asset name must end with to be selected (e.g. `.AppImage`).
    #[serde(default = "default_asset_suffix")]
    pub asset_suffix: String,

    /// Working directory holding the version marker and the artifact.
    ///
    /// Defaults to `~/.appup/bin` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,

    /// File name of the installed artifact inside the working directory.
    ///
    /// Defaults to `<repo_name><asset_suffix>` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_name: Option<String>,

    /// Network behavior for release-host requests.
    #[serde(default)]
    pub network: NetworkConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            repo_owner: default_repo_owner(),
            repo_name: default_repo_name(),
            asset_suffix: default_asset_suffix(),
            work_dir: None,
            artifact_name: None,
            network: NetworkConfig::default(),
        }
    }
}

fn default_repo_owner() -> String {
    "nextcloud".to_string()
}

fn default_repo_name() -> String {
    "desktop".to_string()
}

fn default_asset_suffix() -> String {
    ".AppImage".to_string()
}

impl AppConfig {
    /// Load configuration from the default location.
    ///
    /// Returns [`AppConfig::default()`] when no config file exists.
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional explicit path.
    ///
    /// An explicit path that does not exist is an error (the operator asked
    /// for a specific file); the default path falls back to defaults.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(&path).await,
            None => Self::load().await,
        }
    }

    /// Load configuration from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| AppupError::ConfigError {
            message: format!("invalid TOML in {}: {e}", path.display()),
        })?;

        Ok(config)
    }

    /// Save configuration to a specific file, creating parent directories.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Get the default config file path.
    ///
    /// Honors the `APPUP_CONFIG` environment variable, otherwise
    /// `~/.appup/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::home_dir()?.join(".appup").join("config.toml"))
    }

    fn home_dir() -> Result<PathBuf> {
        dirs::home_dir().context("Could not determine home directory")
    }

    /// Working directory holding the marker and the artifact.
    pub fn work_dir(&self) -> Result<PathBuf> {
        match &self.work_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::home_dir()?.join(".appup").join("bin")),
        }
    }

    /// File name of the installed artifact.
    pub fn artifact_name(&self) -> String {
        self.artifact_name
            .clone()
            .unwrap_or_else(|| format!("{}{}", self.repo_name, self.asset_suffix))
    }

    /// Full path of the installed artifact.
    pub fn artifact_path(&self) -> Result<PathBuf> {
        Ok(self.work_dir()?.join(self.artifact_name()))
    }

    /// Full path of the version marker file.
    pub fn marker_path(&self) -> Result<PathBuf> {
        Ok(self.work_dir()?.join(VERSION_MARKER_FILE))
    }
}
