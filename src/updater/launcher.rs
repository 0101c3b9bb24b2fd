//! Detached launching of the installed artifact.
//!
//! The launched process must outlive the controller: it gets null standard
//! streams and its own process group (Unix) or a detached console (Windows),
//! and the controller never waits on it.

use crate::core::AppupError;
use anyhow::Result;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::info;

/// Launch the artifact as a fully detached process.
///
/// Invoked with no arguments. The child is not supervised; the caller is
/// expected to terminate shortly after. Fails with
/// [`AppupError::ArtifactMissing`] when the artifact does not exist, which
/// on the up-to-date path means no prior run ever completed an install.
pub fn launch_detached(artifact: &Path) -> Result<()> {
    if !artifact.exists() {
        return Err(AppupError::ArtifactMissing {
            path: artifact.to_path_buf(),
        }
        .into());
    }

    let mut command = Command::new(artifact);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // New process group so terminal signals to the controller never
        // reach the launched application.
        command.process_group(0);
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const DETACHED_PROCESS: u32 = 0x0000_0008;
        const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
        command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
    }

    // Fire and forget: the Child handle is dropped without waiting.
    command.spawn().map_err(|source| AppupError::LaunchFailed {
        path: artifact.to_path_buf(),
        source,
    })?;

    info!("Launched {}", artifact.display());
    Ok(())
}
