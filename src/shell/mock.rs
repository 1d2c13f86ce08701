//! Scripted command runner for testing.
//!
//! `ScriptedRunner` implements [`CommandRunner`] without launching anything.
//! Responses are matched against the rendered command line; every call is
//! recorded for later assertion.
//!
//! # Example
//!
//! ```
//! use qiime_colab::shell::{CommandRunner, CommandSpec, ScriptedRunner};
//!
//! let runner = ScriptedRunner::new();
//! runner.respond("qiime info", 0, "QIIME 2 release: 2025.4\n");
//!
//! let result = runner.run(&CommandSpec::new("qiime", ["info"])).unwrap();
//! assert!(result.stdout.contains("QIIME 2 release:"));
//! assert!(runner.was_called("qiime info"));
//! ```

use std::cell::RefCell;

use crate::error::{InstallError, Result};

use super::{CommandResult, CommandRunner, CommandSpec};

#[derive(Debug, Clone)]
enum Scripted {
    Output(CommandResult),
    SpawnError(String),
}

/// Command runner that replays scripted outcomes.
///
/// Later rules take precedence over earlier ones, so a test can override a
/// shared baseline. Unmatched commands exit 127 with "command not found".
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    rules: RefCell<Vec<(String, Scripted)>>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    /// Create a runner with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to any command line containing `pattern` with `exit_code` and `stdout`.
    pub fn respond(&self, pattern: &str, exit_code: i32, stdout: &str) {
        self.respond_with(pattern, CommandResult::new(Some(exit_code), stdout, ""));
    }

    /// Reply to any command line containing `pattern` with a full result.
    pub fn respond_with(&self, pattern: &str, result: CommandResult) {
        self.rules
            .borrow_mut()
            .push((pattern.to_string(), Scripted::Output(result)));
    }

    /// Make any command line containing `pattern` fail to start.
    pub fn fail_to_spawn(&self, pattern: &str, message: &str) {
        self.rules
            .borrow_mut()
            .push((pattern.to_string(), Scripted::SpawnError(message.to_string())));
    }

    /// All commands run so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Rendered command lines run so far, in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.to_string()).collect()
    }

    /// Check if any command line containing `pattern` was run.
    pub fn was_called(&self, pattern: &str) -> bool {
        self.command_lines().iter().any(|c| c.contains(pattern))
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        self.calls.borrow_mut().push(spec.clone());
        let line = spec.to_string();

        let rules = self.rules.borrow();
        let matched = rules
            .iter()
            .rev()
            .find(|(pattern, _)| line.contains(pattern.as_str()));

        match matched {
            Some((_, Scripted::Output(result))) => Ok(result.clone()),
            Some((_, Scripted::SpawnError(message))) => Err(InstallError::StepFailed {
                step: spec.program.clone(),
                message: message.clone(),
            }),
            None => Ok(CommandResult::new(
                Some(127),
                "",
                format!("{}: command not found\n", spec.program),
            )),
        }
    }
}
