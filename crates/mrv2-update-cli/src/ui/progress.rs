//! indicatif progress bars for download and install stages.

use std::sync::{Mutex, MutexGuard, PoisonError};

use indicatif::{ProgressBar, ProgressStyle};
use mrv2_update_core::ports::ProgressReporter;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})";
const SPINNER_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {msg}";

/// [`ProgressReporter`] drawing one bar or spinner per stage.
#[derive(Default)]
pub struct CliProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(BAR_TEMPLATE)
            .map(|style| style.progress_chars("█▓░"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Advance the spinner between worker polls.
    pub fn tick(&self) {
        if let Some(bar) = self.slot().as_ref() {
            bar.tick();
        }
    }
}

impl ProgressReporter for CliProgress {
    fn start(&self, message: &str, total: Option<u64>) {
        let bar = match total {
            Some(total) if total > 0 => ProgressBar::new(total).with_style(Self::bar_style()),
            _ => ProgressBar::new_spinner().with_style(Self::spinner_style()),
        };
        bar.set_message(message.to_string());
        if let Some(previous) = self.slot().replace(bar) {
            previous.finish_and_clear();
        }
    }

    fn update(&self, current: u64, total: Option<u64>) {
        if let Some(bar) = self.slot().as_ref() {
            // Content-Length is only known once the response arrives.
            if let Some(total) = total {
                if bar.length() != Some(total) {
                    bar.set_style(Self::bar_style());
                    bar.set_length(total);
                }
            }
            bar.set_position(current);
        }
    }

    fn message(&self, msg: &str) {
        match self.slot().as_ref() {
            Some(bar) => bar.set_message(msg.to_string()),
            None => eprintln!("{msg}"),
        }
    }

    fn finish(&self, message: &str) {
        match self.slot().take() {
            Some(bar) => bar.finish_with_message(message.to_string()),
            None => eprintln!("{message}"),
        }
    }

    fn finish_with_error(&self, message: &str) {
        if let Some(bar) = self.slot().take() {
            bar.abandon_with_message(format!("Error: {message}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_lifecycle() {
        let progress = CliProgress::new();
        progress.start("Downloading mrv2.deb", None);
        progress.update(512, Some(1024));
        assert_eq!(progress.slot().as_ref().and_then(ProgressBar::length), Some(1024));
        assert_eq!(progress.slot().as_ref().map(ProgressBar::position), Some(512));
        progress.tick();
        progress.finish("Downloaded");
        assert!(progress.slot().is_none());
    }

    #[test]
    fn test_error_clears_stage() {
        let progress = CliProgress::new();
        progress.start("Installing", None);
        progress.finish_with_error("exit code 1");
        assert!(progress.slot().is_none());
        // No bar: nothing to abandon.
        progress.finish_with_error("again");
    }
}
