//! Test utilities shared by unit and integration tests.
//!
//! Available to integration tests through the `test-utils` cargo feature
//! (the crate depends on itself in `dev-dependencies` with that feature
//! enabled).

use crate::release::{Release, ReleaseAsset, ReleaseHost};
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize test logging from `RUST_LOG`, at most once per process.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// In-memory [`ReleaseHost`] for driving the update cycle in tests.
///
/// Serves a fixed release and byte payloads keyed by asset name, and counts
/// queries and downloads so tests can assert on network activity (e.g. "the
/// up-to-date path performs no download").
pub struct FakeHost {
    release: Release,
    payloads: HashMap<String, Vec<u8>>,
    fail_downloads: bool,
    query_count: AtomicUsize,
    download_count: AtomicUsize,
}

impl FakeHost {
    /// Host serving a release with the given tag and no assets.
    pub fn new(tag: &str) -> Self {
        Self {
            release: Release {
                tag_name: tag.to_string(),
                assets: Vec::new(),
            },
            payloads: HashMap::new(),
            fail_downloads: false,
            query_count: AtomicUsize::new(0),
            download_count: AtomicUsize::new(0),
        }
    }

    /// Attach an asset with downloadable content.
    #[must_use]
    pub fn with_asset(mut self, name: &str, content: &[u8]) -> Self {
        self.release.assets.push(ReleaseAsset {
            name: name.to_string(),
            browser_download_url: format!("fake://assets/{name}"),
        });
        self.payloads.insert(name.to_string(), content.to_vec());
        self
    }

    /// Make every download fail after writing a partial payload.
    #[must_use]
    pub fn with_failing_downloads(mut self) -> Self {
        self.fail_downloads = true;
        self
    }

    /// Number of latest-release queries served.
    pub fn query_count(&self) -> usize {
        self.query_count.load(Ordering::SeqCst)
    }

    /// Number of downloads attempted.
    pub fn download_count(&self) -> usize {
        self.download_count.load(Ordering::SeqCst)
    }
}

impl ReleaseHost for FakeHost {
    async fn latest_release(&self) -> Result<Release> {
        self.query_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.release.clone())
    }

    async fn download(&self, asset: &ReleaseAsset, dest: &Path) -> Result<()> {
        self.download_count.fetch_add(1, Ordering::SeqCst);

        let payload = self
            .payloads
            .get(&asset.name)
            .ok_or_else(|| anyhow::anyhow!("no payload registered for asset '{}'", asset.name))?;

        if self.fail_downloads {
            // Leave a partial file behind, as an interrupted stream would.
            let partial = &payload[..payload.len() / 2];
            tokio::fs::write(dest, partial).await?;
            anyhow::bail!("simulated stream interruption for '{}'", asset.name);
        }

        tokio::fs::write(dest, payload).await?;
        Ok(())
    }
}
