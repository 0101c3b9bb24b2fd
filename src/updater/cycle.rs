//! The update cycle: read marker, query host, compare, install, record.

use super::{ArtifactStore, VersionMarker};
use crate::core::AppupError;
use crate::release::ReleaseHost;
use anyhow::Result;
use tracing::{debug, info};

/// Result of one update cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new release was downloaded and installed.
    Updated {
        /// Tag that is now installed.
        tag: String,
    },
    /// The installed version already matches the latest release.
    UpToDate {
        /// Tag that is installed (and latest).
        tag: String,
    },
}

impl CycleOutcome {
    /// Tag of the release the cycle ended on.
    pub fn tag(&self) -> &str {
        match self {
            Self::Updated { tag } | Self::UpToDate { tag } => tag,
        }
    }
}

/// One at-most-one-update cycle against a release host.
///
/// Generic over [`ReleaseHost`] so tests can drive the full cycle with an
/// in-memory fake. Each invocation performs the steps documented on
/// [`crate::updater`]; any fatal error aborts the cycle with the marker in
/// its pre-cycle state.
pub struct UpdateCycle<H> {
    host: H,
    marker: VersionMarker,
    store: ArtifactStore,
    asset_suffix: String,
    force: bool,
}

impl<H: ReleaseHost> UpdateCycle<H> {
    /// Assemble a cycle from its collaborators.
    pub fn new(host: H, marker: VersionMarker, store: ArtifactStore, asset_suffix: &str) -> Self {
        Self {
            host,
            marker,
            store,
            asset_suffix: asset_suffix.to_string(),
            force: false,
        }
    }

    /// Re-install even when the marker already matches the latest tag.
    ///
    /// Covers reinstalling a corrupted artifact without waiting for the
    /// next release.
    #[must_use]
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// The artifact store this cycle installs into.
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// The release host this cycle queries.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Read the locally recorded version.
    pub async fn current_version(&self) -> Result<String> {
        self.marker.read().await
    }

    /// Run one update cycle.
    ///
    /// On the up-to-date path nothing beyond the metadata query touches the
    /// network or the filesystem. On the update path the marker is written
    /// only after the download completed and permissions were set, so an
    /// interrupted install is retried in full on the next run.
    pub async fn run(&self) -> Result<CycleOutcome> {
        let current = self.marker.read().await?;
        debug!("Current version: {}", current);

        let release = self.host.latest_release().await?;
        let latest = release.tag_name.clone();

        if latest == current && !self.force {
            info!("Already on latest version {}", latest);
            return Ok(CycleOutcome::UpToDate { tag: latest });
        }

        info!("Update available: {} -> {}", current, latest);

        let asset = release
            .matching_asset(&self.asset_suffix)
            .ok_or_else(|| AppupError::AssetNotFound {
                tag: latest.clone(),
                suffix: self.asset_suffix.clone(),
            })?;

        self.store.prepare().await?;
        self.store.remove_stale().await?;
        self.host.download(asset, self.store.artifact_path()).await?;
        self.store.mark_executable().await?;
        self.marker.write(&latest).await?;

        info!("Installed {}", latest);
        Ok(CycleOutcome::Updated { tag: latest })
    }

    /// Query the latest release and report it against the marker, without
    /// touching the artifact.
    ///
    /// Returns `(current, latest)`.
    pub async fn check(&self) -> Result<(String, String)> {
        let current = self.marker.read().await?;
        let release = self.host.latest_release().await?;
        Ok((current, release.tag_name))
    }
}
