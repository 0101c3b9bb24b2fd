use crate::config::AppConfig;
use crate::release::GithubHost;
use crate::updater::{ArtifactStore, CycleOutcome, UpdateCycle, VersionMarker, launch_detached};
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

/// Command-line arguments for the update-and-launch cycle.
///
/// One invocation performs at most one update, then launches the artifact.
/// The launch happens on both the updated and the already-up-to-date paths;
/// on the up-to-date path the artifact is expected from a prior run.
///
/// # Examples
///
/// ```bash
/// appup                 # cycle + launch (default command)
/// appup run --force     # re-install even when already current
/// appup run --no-launch # update only, e.g. for provisioning images
/// ```
#[derive(Parser, Debug, Default)]
pub struct RunCommand {
    /// Re-install the latest release even if the recorded version matches.
    ///
    /// Useful for repairing a corrupted or manually deleted artifact
    /// without waiting for the next release.
    #[arg(short, long)]
    force: bool,

    /// Perform the update cycle but do not launch the application.
    #[arg(long)]
    no_launch: bool,
}

impl RunCommand {
    /// Execute the cycle against the configured repository.
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let config = AppConfig::load_with_optional(config_path).await?;

        let host = GithubHost::new(&config.repo_owner, &config.repo_name, &config.network)?;
        let marker = VersionMarker::new(config.marker_path()?);
        let store = ArtifactStore::new(config.work_dir()?, config.artifact_path()?);
        let cycle =
            UpdateCycle::new(host, marker, store, &config.asset_suffix).force(self.force);

        let previous = cycle.current_version().await?;
        let outcome = cycle.run().await?;

        match &outcome {
            CycleOutcome::Updated { tag } => {
                println!(
                    "{}",
                    format!("Installed {} ({} -> {})", config.artifact_name(), previous, tag)
                        .green()
                );
            }
            CycleOutcome::UpToDate { tag } => {
                println!("{}", format!("Already up to date ({tag})").green());
            }
        }

        if self.no_launch {
            return Ok(());
        }

        launch_detached(cycle.store().artifact_path())?;
        println!("{}", format!("Launched {}", config.artifact_name()).green());
        Ok(())
    }
}
