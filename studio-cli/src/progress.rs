//! Render progress reporting
//!
//! The poller reports through [`ProgressSink`] so it never touches the
//! terminal directly.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use studio_core::domain::job::RenderResult;

/// Receives progress updates from a render job poller
pub trait ProgressSink: Send + Sync {
    /// Called on every poll cycle; `percent` is always within 0..=100
    fn update(&self, percent: u8, status_line: &str);

    /// Called once when the job completes
    fn completed(&self, result: &RenderResult);

    /// Called once when the job fails
    fn failed(&self, message: &str);
}

/// Progress bar on stderr
pub struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::with_template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalProgress {
    fn update(&self, percent: u8, status_line: &str) {
        self.bar.set_position(u64::from(percent.min(100)));
        self.bar.set_message(status_line.to_string());
    }

    fn completed(&self, _result: &RenderResult) {
        self.bar.set_position(100);
        self.bar
            .finish_with_message("Render complete".green().to_string());
    }

    fn failed(&self, message: &str) {
        self.bar.abandon_with_message(message.red().to_string());
    }
}
