//! Spinner shown while a slow service call runs.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner wrapper. Finishes with a message or clears itself on drop.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.magenta} {msg} [{elapsed}]") {
            bar.set_style(style);
        }
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    pub fn finish(self, message: impl Into<String>) {
        self.bar.finish_with_message(message.into());
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
