use crate::config::AppConfig;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

/// Inspect or create the appup configuration file.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
enum ConfigSubcommand {
    /// Print the effective configuration as TOML.
    Show,

    /// Print the path of the configuration file.
    Path,

    /// Write a default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl ConfigCommand {
    /// Execute the selected configuration operation.
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let path = match config_path {
            Some(path) => path,
            None => AppConfig::default_path()?,
        };

        match self.command {
            ConfigSubcommand::Show => {
                let config = if path.exists() {
                    AppConfig::load_from(&path).await?
                } else {
                    AppConfig::default()
                };
                let rendered =
                    toml::to_string_pretty(&config).context("Failed to render config")?;
                print!("{rendered}");
            }
            ConfigSubcommand::Path => {
                println!("{}", path.display());
            }
            ConfigSubcommand::Init { force } => {
                if path.exists() && !force {
                    bail!(
                        "config file already exists at {} (use --force to overwrite)",
                        path.display()
                    );
                }
                AppConfig::default().save_to(&path).await?;
                println!("{}", format!("Wrote default config to {}", path.display()).green());
            }
        }

        Ok(())
    }
}
