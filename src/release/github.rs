//! GitHub Releases implementation of [`ReleaseHost`].
//!
//! The metadata query is wrapped in a bounded exponential-backoff retry;
//! client-error statuses (4xx) abort the retry immediately since a missing
//! repository or exhausted rate limit will not heal between attempts.
//! The artifact download is not retried: a failed transfer leaves the
//! partial file in place and the next run redoes the install from scratch.
//!
//! The configured timeout is applied as a total deadline on the metadata
//! query only. The download uses it to bound connection setup and per-read
//! stalls instead; a whole-transfer deadline would abort large artifacts
//! that are still making progress.

use super::{Release, ReleaseAsset, ReleaseHost};
use crate::config::NetworkConfig;
use crate::constants::{MAX_BACKOFF_DELAY, STARTING_BACKOFF_DELAY_MS, USER_AGENT};
use crate::core::AppupError;
use crate::utils::progress::ProgressBar;
use anyhow::{Context, Result};
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_retry::RetryIf;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{debug, info, warn};

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Non-success HTTP status from the release host.
///
/// Kept as a typed error so the retry loop can tell permanent client
/// errors apart from transient server-side failures.
#[derive(Debug, thiserror::Error)]
#[error("release host returned HTTP {status}")]
struct HttpStatusError {
    status: reqwest::StatusCode,
}

/// GitHub Releases client for a fixed repository.
pub struct GithubHost {
    /// Repository owner (e.g. "nextcloud").
    owner: String,
    /// Repository name (e.g. "desktop").
    repo: String,
    /// Retry attempts for the metadata query.
    retries: usize,
    /// Total deadline for one metadata query attempt.
    query_timeout: Duration,
    /// API base URL; fixed in production, overridden in tests.
    api_base: String,
    /// Shared HTTP client with connect/read timeouts and User-Agent applied.
    client: reqwest::Client,
}

impl GithubHost {
    /// Create a client for `owner/repo` with the configured network behavior.
    pub fn new(owner: &str, repo: &str, network: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(network.timeout())
            .read_timeout(network.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            retries: network.retries,
            query_timeout: network.timeout(),
            api_base: DEFAULT_API_BASE.to_string(),
            client,
        })
    }

    #[cfg(test)]
    fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn latest_release_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_base, self.owner, self.repo
        )
    }

    async fn fetch_latest_once(&self) -> Result<Release> {
        let url = self.latest_release_url();
        debug!("Querying latest release: {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.query_timeout)
            .send()
            .await
            .context("Release query request failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpStatusError { status }.into());
        }

        let release: Release = response
            .json()
            .await
            .context("Failed to decode release metadata")?;

        debug!("Latest release tag: {}", release.tag_name);
        Ok(release)
    }
}

/// Whether a failed query attempt is worth retrying.
///
/// 4xx responses are permanent for the lifetime of this invocation; only
/// transport errors and server-side (5xx) failures get another attempt.
fn is_transient(error: &anyhow::Error) -> bool {
    !error
        .downcast_ref::<HttpStatusError>()
        .is_some_and(|e| e.status.is_client_error())
}

impl ReleaseHost for GithubHost {
    /// Fetch the latest release, retrying transient failures with capped
    /// exponential backoff. Client errors (4xx) fail immediately.
    async fn latest_release(&self) -> Result<Release> {
        let retry_strategy = ExponentialBackoff::from_millis(STARTING_BACKOFF_DELAY_MS)
            .max_delay(MAX_BACKOFF_DELAY)
            .factor(2)
            .take(self.retries);

        let mut attempt = 0u32;
        RetryIf::spawn(
            retry_strategy,
            || {
                attempt += 1;
                if attempt > 1 {
                    warn!("Retrying release query (attempt {})", attempt);
                }
                self.fetch_latest_once()
            },
            is_transient,
        )
        .await
        .map_err(|source| {
            AppupError::ReleaseQueryFailed {
                owner: self.owner.clone(),
                repo: self.repo.clone(),
                source,
            }
            .into()
        })
    }

    /// Stream the asset body into `dest`.
    ///
    /// A non-success status is fatal before any byte is written. A stream or
    /// write error mid-transfer is fatal and leaves the partial file at
    /// `dest` for the next run to overwrite.
    async fn download(&self, asset: &ReleaseAsset, dest: &Path) -> Result<()> {
        info!("Downloading {} -> {}", asset.name, dest.display());

        let response = self
            .client
            .get(&asset.browser_download_url)
            .send()
            .await
            .with_context(|| format!("Download request for '{}' failed", asset.name))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppupError::DownloadFailed {
                asset: asset.name.clone(),
                status: status.as_u16(),
            }
            .into());
        }

        let progress = match response.content_length() {
            Some(len) => ProgressBar::new(len),
            None => ProgressBar::new_spinner(),
        };
        progress.set_message(asset.name.clone());

        let write_result: Result<()> = async {
            let mut file = fs::File::create(dest)
                .await
                .context("Failed to create artifact file")?;

            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk.context("Download stream interrupted")?;
                file.write_all(&chunk)
                    .await
                    .context("Failed to write artifact chunk")?;
                progress.inc(chunk.len() as u64);
            }

            file.flush().await.context("Failed to flush artifact file")?;
            Ok(())
        }
        .await;

        progress.finish_and_clear();

        write_result.map_err(|source| {
            AppupError::ArtifactWriteFailed {
                path: dest.to_path_buf(),
                source,
            }
            .into()
        })
    }
}
