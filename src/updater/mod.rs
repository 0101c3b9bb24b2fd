//! The update-and-launch engine.
//!
//! This module implements the whole cycle appup exists for:
//!
//! ```text
//! 1. Read local version
//!    └── marker file missing -> "none" sentinel (not an error)
//!
//! 2. Query latest release
//!    └── bounded retry + timeout around the metadata fetch
//!
//! 3. Compare versions
//!    └── tags equal -> stop, no further filesystem or network activity
//!
//! 4. Install
//!    ├── select asset by suffix (no match is fatal)
//!    ├── ensure working directory, remove stale artifact
//!    ├── stream download to the artifact path
//!    ├── mark executable (0775)
//!    └── persist new tag to the marker
//!
//! 5. Launch
//!    └── detached spawn, no supervision, controller exits
//! ```
//!
//! Failure anywhere in steps 1-4 aborts the cycle; step 5 runs on both the
//! updated and the already-up-to-date paths. There is no rollback: a failure
//! after the stale artifact was removed leaves the system without an
//! artifact and with an unchanged marker, which the next successful run
//! repairs.
//!
//! Concurrent invocations are not guarded against; callers must not
//! schedule overlapping runs.

/// Version-marker file handling.
///
/// Reads and writes the plain-text record of the last installed release
/// tag, treating absence as the distinguished "nothing installed" state.
pub mod marker;

/// Artifact file lifecycle around a download.
///
/// Working-directory creation, stale-artifact removal, and executable
/// permission handling.
pub mod artifact;

/// The update cycle orchestration, generic over the release host.
pub mod cycle;

/// Detached launching of the installed artifact.
pub mod launcher;

#[cfg(test)]
mod tests;

pub use artifact::ArtifactStore;
pub use cycle::{CycleOutcome, UpdateCycle};
pub use launcher::launch_detached;
pub use marker::VersionMarker;
