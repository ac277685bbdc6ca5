use indicatif::{ProgressBar, ProgressStyle};

use super::subscriber::ScanSubscriber;

/// Subscriber that renders scan progress as a terminal progress bar
#[derive(Debug)]
pub struct ProgressBarSubscriber {
    /// The bar being driven, 0-100
    bar: ProgressBar,
}

impl ProgressBarSubscriber {
    /// Create a subscriber with a fresh 0-100 progress bar
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        Self { bar }
    }
}

impl Default for ProgressBarSubscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSubscriber for ProgressBarSubscriber {
    fn scan_progress(&self, progress: u8, message: &str) {
        self.bar.set_position(progress as u64);
        self.bar.set_message(message.to_string());
    }

    fn scan_completed(&self) {
        self.bar.finish_with_message("Scan completed!");
    }

    fn scan_failed(&self, reason: &str) {
        self.bar.abandon_with_message(reason.to_string());
    }

    fn message_cleared(&self) {
        // The bar is already finished; nothing left to clear on a terminal.
    }
}
