//! The version marker: a plain-text file recording the last installed tag.

use crate::constants::NO_VERSION;
use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Reads and writes the version marker file.
///
/// The marker holds the bare tag of the last successfully installed release
/// (e.g. `v3.1.0`). A missing file is the valid "nothing installed yet"
/// state and reads as the [`NO_VERSION`] sentinel; it is created on the
/// first successful install and overwritten on every one after that, never
/// deleted.
pub struct VersionMarker {
    path: PathBuf,
}

impl VersionMarker {
    /// Bind a marker to its file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the marker file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the recorded tag.
    ///
    /// Returns the [`NO_VERSION`] sentinel when the file does not exist.
    /// Any other read failure propagates as a fatal error.
    pub async fn read(&self) -> Result<String> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content.trim().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No version marker at {}; treating as fresh install", self.path.display());
                Ok(NO_VERSION.to_string())
            }
            Err(e) => Err(e).with_context(|| {
                format!("Failed to read version marker: {}", self.path.display())
            }),
        }
    }

    /// Overwrite the marker with `tag`, creating the parent directory.
    ///
    /// Written as plain text with no trailing structure.
    pub async fn write(&self, tag: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create marker directory: {}", parent.display())
            })?;
        }

        fs::write(&self.path, tag).await.with_context(|| {
            format!("Failed to write version marker: {}", self.path.display())
        })?;

        debug!("Recorded installed version {} in {}", tag, self.path.display());
        Ok(())
    }
}
