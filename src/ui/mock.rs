//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use qiime_colab::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//!
//! // Use ui in code under test...
//! ui.message("Downloading miniforge...");
//! ui.success("Done.");
//!
//! // Assert on captured interactions
//! assert!(ui.has_message("Downloading"));
//! assert!(ui.successes().contains(&"Done.".to_string()));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
}

type FinishLog = Rc<RefCell<Vec<(SpinnerStatus, String)>>>;

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    skips: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    error_blocks: Vec<(String, String, Option<String>)>,
    finished: FinishLog,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured skip messages.
    pub fn skips(&self) -> &[String] {
        &self.skips
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get all captured error blocks as (command, output, hint).
    pub fn error_blocks(&self) -> &[(String, String, Option<String>)] {
        &self.error_blocks
    }

    /// Get every spinner outcome, in the order they finished.
    pub fn spinner_outcomes(&self) -> Vec<(SpinnerStatus, String)> {
        self.finished.borrow().clone()
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown, directly or by a spinner.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
            || self
                .finished
                .borrow()
                .iter()
                .any(|(s, m)| *s == SpinnerStatus::Success && m.contains(msg))
    }

    /// Check if a specific error was shown, directly or by a spinner.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
            || self
                .finished
                .borrow()
                .iter()
                .any(|(s, m)| *s == SpinnerStatus::Error && m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific skip was shown.
    pub fn has_skip(&self, msg: &str) -> bool {
        self.skips.iter().any(|m| m.contains(msg))
    }

    /// Check if a spinner was started with this message.
    pub fn has_spinner(&self, msg: &str) -> bool {
        self.spinners.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn skipped(&mut self, msg: &str) {
        self.skips.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_error_block(&mut self, command: &str, output: &str, hint: Option<&str>) {
        self.error_blocks.push((
            command.to_string(),
            output.to_string(),
            hint.map(|h| h.to_string()),
        ));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            finished: Rc::clone(&self.finished),
        })
    }
}

/// Mock spinner that reports its outcome back to the owning [`MockUI`].
#[derive(Debug)]
pub struct MockSpinner {
    finished: FinishLog,
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.finished
            .borrow_mut()
            .push((SpinnerStatus::Success, msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.finished
            .borrow_mut()
            .push((SpinnerStatus::Error, msg.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_messages() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.warning("careful");
        ui.error("broken");
        ui.skipped("already there");
        assert!(ui.has_message("hello"));
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("broken"));
        assert!(ui.has_skip("already there"));
    }

    #[test]
    fn spinner_outcomes_reach_the_ui() {
        let mut ui = MockUI::new();
        let mut spinner = ui.start_spinner("Installing...");
        spinner.finish_success("Installed");
        drop(spinner);

        let mut spinner = ui.start_spinner("Verifying...");
        spinner.finish_error("Broken");
        drop(spinner);

        assert!(ui.has_spinner("Installing"));
        assert!(ui.has_success("Installed"));
        assert!(ui.has_error("Broken"));
        assert_eq!(
            ui.spinner_outcomes(),
            vec![
                (SpinnerStatus::Success, "Installed".to_string()),
                (SpinnerStatus::Error, "Broken".to_string()),
            ]
        );
    }

    #[test]
    fn captures_error_blocks() {
        let mut ui = MockUI::new();
        ui.show_error_block("qiime info", "boom", Some("see logs.txt"));
        assert_eq!(ui.error_blocks().len(), 1);
        assert_eq!(ui.error_blocks()[0].2.as_deref(), Some("see logs.txt"));
    }

    #[test]
    fn with_mode_sets_mode() {
        let ui = MockUI::with_mode(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }
}
