//! Error handling for appup.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`AppupError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable
//!    suggestions for CLI users
//!
//! Every fatal failure in the update cycle bubbles to the top-level
//! invocation through `anyhow`, is converted with [`user_friendly_error`],
//! displayed on stderr, and terminates the process with exit code 1.

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for appup operations.
///
/// Each variant represents a specific failure mode of the update-and-launch
/// cycle and carries the details an operator needs to act on it. Absence
/// conditions the cycle treats as success (missing version marker, missing
/// stale artifact, pre-existing working directory) never surface here.
#[derive(Error, Debug)]
pub enum AppupError {
    /// The release-host metadata query failed after all retry attempts.
    #[error("failed to query latest release for {owner}/{repo}")]
    ReleaseQueryFailed {
        /// Repository owner on the release host.
        owner: String,
        /// Repository name on the release host.
        repo: String,
        /// Underlying transport or decode error.
        #[source]
        source: anyhow::Error,
    },

    /// The latest release has assets, but none matches the configured suffix.
    ///
    /// A release without a compatible asset is an operator-visible error,
    /// not a silent no-op: it usually means the release pipeline changed its
    /// artifact naming.
    #[error("release {tag} has no asset ending in '{suffix}'")]
    AssetNotFound {
        /// Tag of the release that was inspected.
        tag: String,
        /// Suffix the asset name was expected to end with.
        suffix: String,
    },

    /// The artifact download returned a non-success HTTP status.
    #[error("download of '{asset}' failed with HTTP status {status}")]
    DownloadFailed {
        /// Name of the asset being downloaded.
        asset: String,
        /// HTTP status code returned by the host.
        status: u16,
    },

    /// An I/O error occurred while streaming the artifact to disk.
    ///
    /// The partially-written file is left in place; the version marker is
    /// untouched, so the next run retries the full download.
    #[error("failed writing artifact to {path}")]
    ArtifactWriteFailed {
        /// Destination path of the interrupted write.
        path: PathBuf,
        /// Underlying stream or filesystem error.
        #[source]
        source: anyhow::Error,
    },

    /// The artifact is missing at launch time.
    ///
    /// Raised by the pre-launch existence guard: the up-to-date path assumes
    /// an artifact from a prior run, and a fresh environment that never
    /// completed an install has none.
    #[error("artifact not found at {path}; nothing to launch")]
    ArtifactMissing {
        /// Expected artifact location.
        path: PathBuf,
    },

    /// Spawning the artifact process failed.
    #[error("failed to launch {path}")]
    LaunchFailed {
        /// Path of the binary that could not be started.
        path: PathBuf,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file exists but could not be read or parsed.
    #[error("configuration error: {message}")]
    ConfigError {
        /// Description of what is wrong with the configuration.
        message: String,
    },
}

/// A user-friendly error wrapper with an optional suggestion.
///
/// Pairs the underlying error with guidance the CLI prints to stderr, so
/// operators get a next step instead of a bare failure message.
pub struct ErrorContext {
    /// The underlying error.
    pub error: anyhow::Error,
    /// Actionable suggestion for resolving the error.
    pub suggestion: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion.
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
        }
    }

    /// Attach an actionable suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Print the error and suggestion to stderr with colors.
    pub fn display(&self) {
        eprintln!("{} {}", "Error:".red().bold(), self.error);

        // Print the error chain below the headline, skipping the headline itself.
        for cause in self.error.chain().skip(1) {
            eprintln!("  {} {}", "Caused by:".yellow(), cause);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("\n{} {}", "Suggestion:".cyan().bold(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with a contextual suggestion.
///
/// Downcasts to [`AppupError`] where possible and attaches the suggestion
/// matching that failure mode; other errors pass through unchanged.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let suggestion = match error.downcast_ref::<AppupError>() {
        Some(AppupError::ReleaseQueryFailed { owner, repo, .. }) => Some(format!(
            "Check network connectivity and that https://github.com/{owner}/{repo} exists and has published releases"
        )),
        Some(AppupError::AssetNotFound { suffix, .. }) => Some(format!(
            "Verify the release pipeline still publishes a '{suffix}' asset, or adjust asset_suffix in the config file"
        )),
        Some(AppupError::DownloadFailed { .. }) => {
            Some("The release host may be rate-limiting or temporarily unavailable; re-run in a few minutes".to_string())
        }
        Some(AppupError::ArtifactWriteFailed { path, .. }) => Some(format!(
            "Check free disk space and write permissions for {}; re-running the cycle restarts the download from scratch",
            path.display()
        )),
        Some(AppupError::ArtifactMissing { .. }) => {
            Some("Run `appup run` with network access so an initial install can complete".to_string())
        }
        Some(AppupError::LaunchFailed { path, .. }) => Some(format!(
            "Check that {} is a valid executable for this platform",
            path.display()
        )),
        Some(AppupError::ConfigError { .. }) => {
            Some("Run `appup config init` to write a fresh default configuration".to_string())
        }
        _ => None,
    };

    let ctx = ErrorContext::new(error);
    match suggestion {
        Some(s) => ctx.with_suggestion(s),
        None => ctx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_not_found_message_names_suffix_and_tag() {
        let err = AppupError::AssetNotFound {
            tag: "v3.1.0".to_string(),
            suffix: ".AppImage".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("v3.1.0"));
        assert!(msg.contains(".AppImage"));
    }

    #[test]
    fn user_friendly_error_attaches_suggestion() {
        let err = AppupError::AssetNotFound {
            tag: "v1.0.0".to_string(),
            suffix: ".AppImage".to_string(),
        };
        let ctx = user_friendly_error(anyhow::Error::from(err));
        assert!(ctx.suggestion.as_deref().unwrap().contains("asset_suffix"));
    }

    #[test]
    fn unknown_errors_pass_through_without_suggestion() {
        let ctx = user_friendly_error(anyhow::anyhow!("something else"));
        assert!(ctx.suggestion.is_none());
        assert_eq!(ctx.error.to_string(), "something else");
    }
}
