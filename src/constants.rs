//! Global constants used throughout the appup codebase.
//!
//! Timeout durations, retry parameters, and fixed file names live here so
//! that magic numbers stay discoverable and consistent across modules.

use std::time::Duration;

/// Sentinel recorded as the current version when no marker file exists.
///
/// The sentinel is not a valid GitHub tag, so it never compares equal to a
/// real release and a fresh environment always triggers an update attempt.
pub const NO_VERSION: &str = "none";

/// File name of the version marker inside the working directory.
pub const VERSION_MARKER_FILE: &str = "version.txt";

/// Default timeout for release-host requests (30 seconds).
///
/// Total deadline for the metadata query; connect and read-stall limit for
/// the artifact download. Without it a hung connection would block the
/// whole cycle indefinitely.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retry attempts for the release metadata query.
///
/// The artifact download itself is never retried; see
/// [`crate::release::github`] for why.
pub const DEFAULT_QUERY_RETRIES: usize = 3;

/// Starting delay for exponential backoff between query retries (250ms).
pub const STARTING_BACKOFF_DELAY_MS: u64 = 250;

/// Maximum backoff delay between query retries (5 seconds).
///
/// Backoff delays double per attempt and are capped at this value.
pub const MAX_BACKOFF_DELAY: Duration = Duration::from_secs(5);

/// Permission bits applied to the artifact after a completed download.
///
/// Owner read/write/execute, group read/write/execute, other read/execute.
#[cfg(unix)]
pub const ARTIFACT_MODE: u32 = 0o775;

/// User-Agent sent with every release-host request.
///
/// GitHub rejects API requests that carry no User-Agent header.
pub const USER_AGENT: &str = concat!("appup/", env!("CARGO_PKG_VERSION"));
