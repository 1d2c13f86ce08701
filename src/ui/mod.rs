//! Console narration.
//!
//! Every operation that reports progress takes a `&mut dyn UserInterface`.
//! [`TerminalUI`] draws spinners on a TTY, [`NonInteractiveUI`] prints one
//! line per event for notebook cells, and [`MockUI`] records events for tests.
//!
//! # Example
//!
//! ```
//! use qiime_colab::ui::{NonInteractiveUI, OutputMode, UserInterface};
//!
//! let mut ui = NonInteractiveUI::new(OutputMode::Quiet);
//! ui.show_header("QIIME 2 setup");
//! ui.success("Miniforge installed");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ColabTheme, Mark};

/// Sink for install narration.
pub trait UserInterface {
    fn output_mode(&self) -> OutputMode;

    /// Plain narration line. Hidden in quiet mode.
    fn message(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Always shown, whatever the mode.
    fn error(&mut self, msg: &str);

    /// A phase that did not need to run.
    fn skipped(&mut self, msg: &str);

    fn show_header(&mut self, title: &str);

    /// A failed command with its full output.
    fn show_error_block(&mut self, command: &str, output: &str, hint: Option<&str>);

    /// Start showing progress for a step. The handle reports its outcome.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;
}

/// Outcome reporter for a running step.
pub trait SpinnerHandle {
    fn finish_success(&mut self, msg: &str);

    fn finish_error(&mut self, msg: &str);
}
