//! Animated step spinner for terminals.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::{ColabTheme, Mark};
use super::SpinnerHandle;

/// Spinner shown while a step runs, replaced by its outcome line.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: ColabTheme,
}

impl ProgressSpinner {
    /// Start spinning with `message`.
    pub fn new(message: &str, theme: ColabTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.blue} {msg} {elapsed:.dim}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar, theme }
    }

    fn finish(&mut self, mark: Mark, msg: &str) {
        let line = self.theme.status(mark, msg);
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.finish(Mark::Done, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(Mark::Failed, msg);
    }
}
