//! Styling of status lines, banners and failed-command blocks.

use console::Style;

/// Outcome symbol that leads a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Done,
    Skipped,
    Warning,
    Failed,
}

impl Mark {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Done => "✓",
            Self::Skipped => "○",
            Self::Warning => "⚠",
            Self::Failed => "✗",
        }
    }
}

/// Styles for the install narration.
#[derive(Debug, Clone)]
pub struct ColabTheme {
    done: Style,
    skipped: Style,
    warning: Style,
    failed: Style,
    banner: Style,
    frame: Style,
    command: Style,
    hint: Style,
}

impl ColabTheme {
    /// Colored theme: blue progress, orange warnings, green banner.
    pub fn colored() -> Self {
        Self {
            done: Style::new().blue(),
            skipped: Style::new().dim(),
            warning: Style::new().color256(208),
            failed: Style::new().red().bold(),
            banner: Style::new().green().bold(),
            frame: Style::new().dim(),
            command: Style::new().dim().italic(),
            hint: Style::new().magenta().dim(),
        }
    }

    /// Theme without escape codes.
    pub fn plain() -> Self {
        Self {
            done: Style::new(),
            skipped: Style::new(),
            warning: Style::new(),
            failed: Style::new(),
            banner: Style::new(),
            frame: Style::new(),
            command: Style::new(),
            hint: Style::new(),
        }
    }

    /// Colored when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// `<symbol> <msg>` in the mark's style.
    pub fn status(&self, mark: Mark, msg: &str) -> String {
        let style = match mark {
            Mark::Done => &self.done,
            Mark::Skipped => &self.skipped,
            Mark::Warning => &self.warning,
            Mark::Failed => &self.failed,
        };
        style.apply_to(format!("{} {}", mark.symbol(), msg)).to_string()
    }

    /// A header or the final banner, surrounded by blank lines.
    pub fn banner(&self, title: &str) -> String {
        format!("\n{}\n", self.banner.apply_to(format!("◆ {}", title)))
    }

    /// Lines showing a failed command, everything it printed, and a hint.
    pub fn error_block(&self, command: &str, output: &str, hint: Option<&str>) -> Vec<String> {
        let bar = self.frame.apply_to("│");
        let mut lines = vec![
            String::new(),
            format!("    {}", self.frame.apply_to("┌─ Command ─────────────────────────")),
            format!("    {} {}", bar, self.command.apply_to(command)),
        ];
        if !output.is_empty() {
            lines.push(format!(
                "    {}",
                self.frame.apply_to("├─ Output ──────────────────────────")
            ));
            lines.extend(output.lines().map(|l| format!("    {} {}", bar, l)));
        }
        lines.push(format!(
            "    {}",
            self.frame.apply_to("└───────────────────────────────────")
        ));
        if let Some(hint) = hint {
            lines.push(String::new());
            lines.push(format!("    {} {}", self.hint.apply_to("Hint:"), hint));
        }
        lines
    }
}

/// Colors are used only on a terminal, and never when `NO_COLOR` is set.
pub fn should_use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::Term::stdout().is_term()
}
