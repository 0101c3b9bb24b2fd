use crate::config::AppConfig;
use crate::release::GithubHost;
use crate::updater::{ArtifactStore, UpdateCycle, VersionMarker};
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

/// Check for a newer release without installing anything.
///
/// Queries the release host, compares against the version marker, and
/// reports. Exits 0 whether or not an update is available; a failed query
/// is still a fatal error.
#[derive(Parser, Debug)]
pub struct CheckCommand {}

impl CheckCommand {
    /// Execute the check against the configured repository.
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let config = AppConfig::load_with_optional(config_path).await?;

        let host = GithubHost::new(&config.repo_owner, &config.repo_name, &config.network)?;
        let marker = VersionMarker::new(config.marker_path()?);
        let store = ArtifactStore::new(config.work_dir()?, config.artifact_path()?);
        let cycle = UpdateCycle::new(host, marker, store, &config.asset_suffix);

        println!("{}", "Checking for updates...".cyan());
        let (current, latest) = cycle.check().await?;

        if current == latest {
            println!("{}", format!("You are on the latest release ({latest})").green());
        } else {
            println!(
                "{}",
                format!("Update available: {current} -> {latest}").yellow()
            );
            println!("Run `appup run` to install and launch it");
        }

        if !cycle.store().exists() {
            println!(
                "{}",
                format!(
                    "Note: no artifact installed yet at {}",
                    cycle.store().artifact_path().display()
                )
                .yellow()
            );
        }

        Ok(())
    }
}
