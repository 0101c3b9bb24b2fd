//! Release-host types and the query/download seam.
//!
//! [`Release`] and [`ReleaseAsset`] mirror the GitHub latest-release payload;
//! [`ReleaseHost`] abstracts the host behind a trait so the update cycle can
//! run against the real [`GithubHost`](github::GithubHost) in production and
//! an in-memory fake in tests.

pub mod github;

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

pub use github::GithubHost;

/// A published release: a tag identifier plus zero or more assets.
///
/// Field names match the GitHub REST wire format.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Tag the release was published under (e.g. `v3.1.0`).
    pub tag_name: String,
    /// Downloadable files attached to the release.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A named, downloadable file attached to a release.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    /// Asset file name (e.g. `app-v3.1.0.AppImage`).
    pub name: String,
    /// Direct download URL for the asset content.
    pub browser_download_url: String,
}

impl Release {
    /// Find the single asset whose name ends with `suffix`.
    ///
    /// Returns the first match; releases are expected to carry exactly one
    /// asset per suffix convention. `None` means the release has no
    /// compatible asset, which callers treat as a fatal error.
    pub fn matching_asset(&self, suffix: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|asset| asset.name.ends_with(suffix))
    }
}

/// Read-only access to a release host.
///
/// The two operations cover everything the update cycle needs from the
/// network: the latest-release metadata and a streamed asset download. Both
/// are fallible; neither mutates host state.
pub trait ReleaseHost {
    /// Fetch metadata for the most recent published release.
    fn latest_release(&self) -> impl Future<Output = Result<Release>> + Send;

    /// Stream the asset's content into `dest`, replacing nothing on its own:
    /// the caller is responsible for removing stale content first.
    ///
    /// On failure a partially-written `dest` may remain; the caller must not
    /// record the release as installed.
    fn download(&self, asset: &ReleaseAsset, dest: &Path) -> impl Future<Output = Result<()>> + Send;
}
