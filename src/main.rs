//! appup CLI entry point.
//!
//! Parses arguments, runs the selected command, and maps any fatal error to
//! an operator-friendly message on stderr plus exit code 1.

use anyhow::Result;
use appup_cli::cli;
use appup_cli::core::error::user_friendly_error;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
