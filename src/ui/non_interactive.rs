//! Plain line-oriented UI.
//!
//! Notebook cells capture stdout without a TTY, so spinners would only
//! produce control-character noise. Every event becomes one line instead.
//! Warnings, errors and failed-command blocks go to stderr.

use super::theme::{ColabTheme, Mark};
use super::{OutputMode, SpinnerHandle, UserInterface};

pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: ColabTheme,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: ColabTheme::plain(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_messages() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.status(Mark::Done, msg));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.status(Mark::Warning, msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.status(Mark::Failed, msg));
    }

    fn skipped(&mut self, msg: &str) {
        println!("{}", self.theme.status(Mark::Skipped, msg));
    }

    fn show_header(&mut self, title: &str) {
        println!("{}", self.theme.banner(title));
    }

    fn show_error_block(&mut self, command: &str, output: &str, hint: Option<&str>) {
        for line in self.theme.error_block(command, output, hint) {
            eprintln!("{}", line);
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        println!("{}", message);
        Box::new(LineSpinner {
            theme: self.theme.clone(),
        })
    }
}

/// Prints the step outcome as a line.
struct LineSpinner {
    theme: ColabTheme,
}

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        println!("{}", self.theme.status(Mark::Done, msg));
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.status(Mark::Failed, msg));
    }
}
