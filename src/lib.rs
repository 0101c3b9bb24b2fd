//! appup - update-and-launch runner for GitHub-released applications.
//!
//! appup keeps a single GitHub-released application current in a local
//! working directory and starts it. Each invocation is one pass of a linear
//! procedure: read the locally recorded version, query the release host for
//! the latest published release, download and install the matching artifact
//! if the tags differ, record the new tag, and launch the application as a
//! detached process.
//!
//! It is designed to be invoked fresh each time by a scheduler or login
//! hook; no state is kept in memory between runs, and concurrent
//! invocations are not supported.
//!
//! # Core Modules
//!
//! - [`cli`] - command-line interface (`run`, `check`, `config`)
//! - [`config`] - the configuration file (tracked repository, paths, network)
//! - [`release`] - release-host types and the [`release::ReleaseHost`] seam
//! - [`updater`] - the update cycle, version marker, artifact store, launcher
//! - [`core`] - error taxonomy and user-facing error presentation
//!
//! # On-Disk Layout
//!
//! The working directory (default `~/.appup/bin`) holds exactly two entries:
//!
//! ```text
//! ~/.appup/bin/
//! ├── version.txt        # tag of the last installed release
//! └── desktop.AppImage   # the installed application
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use appup_cli::config::AppConfig;
//! use appup_cli::release::GithubHost;
//! use appup_cli::updater::{ArtifactStore, UpdateCycle, VersionMarker};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::load().await?;
//! let host = GithubHost::new(&config.repo_owner, &config.repo_name, &config.network)?;
//! let cycle = UpdateCycle::new(
//!     host,
//!     VersionMarker::new(config.marker_path()?),
//!     ArtifactStore::new(config.work_dir()?, config.artifact_path()?),
//!     &config.asset_suffix,
//! );
//! let outcome = cycle.run().await?;
//! println!("now on {}", outcome.tag());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod release;
pub mod updater;
pub mod utils;

// Available to both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
