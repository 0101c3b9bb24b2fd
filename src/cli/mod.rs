//! Command-line interface for appup.
//!
//! Each command lives in its own module with its own argument structure and
//! execution logic:
//!
//! - `run` - the update-and-launch cycle (the default when no subcommand is
//!   given, so schedulers and login hooks can invoke plain `appup`)
//! - `check` - query the latest release without installing anything
//! - `config` - inspect or create the configuration file
//!
//! # Global Options
//!
//! - `--verbose` / `--quiet` - logging verbosity (mutually exclusive)
//! - `--config` - path to a custom config file
//! - `--no-progress` - disable the download progress bar

mod check;
mod config;
mod run;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Main CLI structure for appup.
///
/// Global options apply to every subcommand; a missing subcommand behaves
/// exactly like `appup run` with default arguments.
#[derive(Parser)]
#[command(
    name = "appup",
    about = "Update-and-launch runner for GitHub-released applications",
    version,
    long_about = "appup keeps a GitHub-released application current in a local working \
                  directory: it checks the latest release, installs a newer artifact when \
                  one exists, and launches the application."
)]
pub struct Cli {
    /// The subcommand to execute; defaults to `run`.
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a custom configuration file.
    ///
    /// Overrides both the `APPUP_CONFIG` environment variable and the
    /// default location (`~/.appup/config.toml`).
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable the download progress bar.
    #[arg(long, global = true)]
    no_progress: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run one update cycle, then launch the application.
    Run(run::RunCommand),

    /// Check for a newer release without installing anything.
    Check(check::CheckCommand),

    /// Inspect or create the configuration file.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// Sets up logging and progress suppression once, then dispatches.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        if self.no_progress {
            // Read by the progress wrapper; keeps the flag out of every
            // call site that renders a bar.
            unsafe {
                std::env::set_var("APPUP_NO_PROGRESS", "1");
            }
        }

        let config_path = self.config;
        match self.command {
            Some(Commands::Run(cmd)) => cmd.execute(config_path).await,
            Some(Commands::Check(cmd)) => cmd.execute(config_path).await,
            Some(Commands::Config(cmd)) => cmd.execute(config_path).await,
            None => run::RunCommand::default().execute(config_path).await,
        }
    }

    fn init_logging(&self) {
        let default_level = if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::ERROR
        } else {
            tracing::Level::WARN
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
