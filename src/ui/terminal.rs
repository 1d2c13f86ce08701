//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use super::{
    ColabTheme, Mark, NonInteractiveUI, OutputMode, ProgressSpinner, SpinnerHandle, UserInterface,
};

/// TTY output with colors and animated spinners.
pub struct TerminalUI {
    term: Term,
    theme: ColabTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            term: Term::stdout(),
            theme: ColabTheme::detect(),
            mode,
        }
    }

    fn line(&mut self, text: &str) {
        writeln!(self.term, "{}", text).ok();
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_messages() {
            self.line(msg);
        }
    }

    fn success(&mut self, msg: &str) {
        let text = self.theme.status(Mark::Done, msg);
        self.line(&text);
    }

    fn warning(&mut self, msg: &str) {
        let text = self.theme.status(Mark::Warning, msg);
        self.line(&text);
    }

    fn error(&mut self, msg: &str) {
        let text = self.theme.status(Mark::Failed, msg);
        self.line(&text);
    }

    fn skipped(&mut self, msg: &str) {
        let text = self.theme.status(Mark::Skipped, msg);
        self.line(&text);
    }

    fn show_header(&mut self, title: &str) {
        let text = self.theme.banner(title);
        self.line(&text);
    }

    fn show_error_block(&mut self, command: &str, output: &str, hint: Option<&str>) {
        for text in self.theme.error_block(command, output, hint) {
            self.line(&text);
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::new(message, self.theme.clone()))
    }
}

/// Pick the UI for stdout.
///
/// Notebook `!` cells capture stdout without a TTY, so they get
/// [`NonInteractiveUI`].
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    if Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
