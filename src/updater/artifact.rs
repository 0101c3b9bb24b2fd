//! Artifact file lifecycle: directory preparation, stale removal, and
//! executable permissions.

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Manages the artifact file inside the working directory.
///
/// The artifact is replaced wholesale on every update: the old copy is
/// removed before the new one is written, never merged or patched.
pub struct ArtifactStore {
    work_dir: PathBuf,
    artifact_path: PathBuf,
}

impl ArtifactStore {
    /// Bind a store to the working directory and artifact path.
    pub fn new(work_dir: impl Into<PathBuf>, artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            artifact_path: artifact_path.into(),
        }
    }

    /// Path of the installed artifact.
    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Whether the artifact currently exists on disk.
    pub fn exists(&self) -> bool {
        self.artifact_path.exists()
    }

    /// Ensure the working directory exists.
    ///
    /// Idempotent: an already-existing directory is success.
    pub async fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.work_dir).await.with_context(|| {
            format!("Failed to create working directory: {}", self.work_dir.display())
        })
    }

    /// Remove a pre-existing artifact so the download never merges with
    /// stale content.
    ///
    /// A missing artifact is success, not an error.
    pub async fn remove_stale(&self) -> Result<()> {
        match fs::remove_file(&self.artifact_path).await {
            Ok(()) => {
                debug!("Removed stale artifact: {}", self.artifact_path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to remove stale artifact: {}", self.artifact_path.display())
            }),
        }
    }

    /// Mark the artifact executable after a completed download.
    ///
    /// Sets mode 0775 on Unix; a no-op on other platforms.
    pub async fn mark_executable(&self) -> Result<()> {
        #[cfg(unix)]
        {
            use crate::constants::ARTIFACT_MODE;
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(&self.artifact_path)
                .await
                .with_context(|| {
                    format!("Failed to read artifact metadata: {}", self.artifact_path.display())
                })?
                .permissions();
            perms.set_mode(ARTIFACT_MODE);
            fs::set_permissions(&self.artifact_path, perms)
                .await
                .with_context(|| {
                    format!(
                        "Failed to mark artifact executable: {}",
                        self.artifact_path.display()
                    )
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> ArtifactStore {
        let work_dir = temp.path().join("bin");
        let artifact = work_dir.join("app.AppImage");
        ArtifactStore::new(work_dir, artifact)
    }

    #[tokio::test]
    async fn prepare_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        store.prepare().await.unwrap();
        store.prepare().await.unwrap();
        assert!(temp.path().join("bin").is_dir());
    }

    #[tokio::test]
    async fn remove_stale_tolerates_missing_artifact() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.prepare().await.unwrap();

        // No artifact yet: removal is a no-op.
        store.remove_stale().await.unwrap();

        tokio::fs::write(store.artifact_path(), b"old").await.unwrap();
        assert!(store.exists());
        store.remove_stale().await.unwrap();
        assert!(!store.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn mark_executable_sets_0775() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.prepare().await.unwrap();
        tokio::fs::write(store.artifact_path(), b"#!/bin/sh\n").await.unwrap();

        store.mark_executable().await.unwrap();

        let mode = tokio::fs::metadata(store.artifact_path())
            .await
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o775);
    }
}
