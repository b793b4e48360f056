//! Stage progress display for a pipeline run

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix:>12}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{prefix:>12} {spinner} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Coordinates one progress line per pipeline stage
///
/// Stages with a known amount of work get a bar; open-ended stages such as the
/// assignment solve get a spinner.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    current: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            current: None,
        }
    }

    /// Begin a stage with `total` units of work
    pub fn start_stage(&mut self, name: &str, total: usize) {
        self.finish_stage();
        let bar = ProgressBar::new(total as u64);
        bar.set_style(STAGE_STYLE.clone());
        bar.set_prefix(name.to_string());
        self.current = Some(self.multi_progress.add(bar));
    }

    /// Begin a stage whose amount of work is unknown
    pub fn start_spinner(&mut self, name: &str) {
        self.finish_stage();
        let bar = ProgressBar::new_spinner();
        bar.set_style(SPINNER_STYLE.clone());
        bar.set_prefix(name.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        self.current = Some(self.multi_progress.add(bar));
    }

    /// Record `units` of finished work on the current stage
    pub fn advance(&self, units: usize) {
        if let Some(ref bar) = self.current {
            bar.inc(units as u64);
        }
    }

    /// Attach a short status message to the current stage
    pub fn set_message(&self, message: &str) {
        if let Some(ref bar) = self.current {
            bar.set_message(message.to_string());
        }
    }

    /// Mark the current stage as complete
    pub fn finish_stage(&mut self) {
        if let Some(bar) = self.current.take() {
            bar.finish();
        }
    }

    /// Clean up all progress displays
    pub fn finish(&mut self) {
        self.finish_stage();
        let _ = self.multi_progress.clear();
    }
}
