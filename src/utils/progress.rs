//! Progress indicators for long-running operations.
//!
//! Wraps `indicatif` with consistent styling and automatic suppression in
//! non-interactive environments. The only long-running operation in appup is
//! the artifact download, which gets a byte-count bar when the host reports a
//! content length and a spinner otherwise.
//!
//! # Environment Variables
//!
//! - `APPUP_NO_PROGRESS`: set to any value to disable all progress output.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::time::Duration;

/// Checks if progress bars should be disabled.
///
/// Progress output is suppressed when the `APPUP_NO_PROGRESS` environment
/// variable is set, which the `--no-progress` flag arranges.
fn is_progress_disabled() -> bool {
    std::env::var("APPUP_NO_PROGRESS").is_ok()
}

/// A progress indicator with appup styling.
///
/// Hidden (but still fully functional as an API) when progress output is
/// disabled, so call sites never need to branch.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Create a byte-count bar for a transfer of known length.
    pub fn new(len: u64) -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new(len);
            bar.set_style(download_style());
            bar
        };
        Self { inner: bar }
    }

    /// Create a spinner for a transfer of unknown length.
    pub fn new_spinner() -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new_spinner();
            bar.set_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self { inner: bar }
    }

    /// Set the message displayed alongside the indicator.
    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Advance the indicator by `delta` units (bytes, for downloads).
    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    /// Finish and remove the indicator from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

fn download_style() -> IndicatifStyle {
    IndicatifStyle::default_bar()
        .template("{msg:.bold} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
        .unwrap()
        .progress_chars("━╸━")
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}
