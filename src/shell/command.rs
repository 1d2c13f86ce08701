//! External process execution.

use std::fmt;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{InstallError, Result};

/// Shell used for composite command lines (activation, wrapper scripts).
pub const BASH: &str = "/bin/bash";

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to launch (looked up on PATH if not absolute).
    pub program: String,
    /// Arguments passed verbatim.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a spec for `program` with `args`.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Run `line` through `bash -c`.
    pub fn bash(line: impl Into<String>) -> Self {
        Self::new(BASH, ["-c".to_string(), line.into()])
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,
}

impl CommandResult {
    /// Create a result from its parts.
    pub fn new(exit_code: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration: Duration::ZERO,
        }
    }

    /// Whether the process exited with status 0.
    pub fn exited_ok(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stdout followed by stderr.
    pub fn combined(&self) -> String {
        let mut out = String::with_capacity(self.stdout.len() + self.stderr.len());
        out.push_str(&self.stdout);
        out.push_str(&self.stderr);
        out
    }
}

/// Something that can launch processes and wait for them.
///
/// The installer only talks to processes through this trait so tests can
/// script command outcomes.
pub trait CommandRunner {
    /// Launch `spec`, capture both streams, and wait for completion.
    ///
    /// Returns `Err` only when the process could not be started at all.
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult>;
}

/// Runs real processes with the inherited environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        let start = Instant::now();
        tracing::debug!("Executing: {}", spec);

        let output = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| InstallError::StepFailed {
                step: spec.program.clone(),
                message: format!("could not start '{}': {}", spec, e),
            })?;

        let result = CommandResult {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration: start.elapsed(),
        };

        tracing::debug!(
            "'{}' exited with {:?} after {:?}",
            spec.program,
            result.exit_code,
            result.duration
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_runner_captures_stdout() {
        let result = SystemRunner
            .run(&CommandSpec::bash("echo hello"))
            .unwrap();
        assert!(result.exited_ok());
        assert!(result.stdout.contains("hello"));
        assert!(result.stderr.is_empty());
    }

    #[test]
    fn system_runner_captures_stderr_separately() {
        let result = SystemRunner
            .run(&CommandSpec::bash("echo out; echo err >&2"))
            .unwrap();
        assert_eq!(result.stdout.trim(), "out");
        assert_eq!(result.stderr.trim(), "err");
        assert_eq!(result.combined(), "out\nerr\n");
    }

    #[test]
    fn system_runner_reports_exit_code() {
        let result = SystemRunner.run(&CommandSpec::bash("exit 3")).unwrap();
        assert!(!result.exited_ok());
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn system_runner_passes_args_verbatim() {
        let spec = CommandSpec::new("printf", ["%s|%s", "a b", "$HOME"]);
        let result = SystemRunner.run(&spec).unwrap();
        assert_eq!(result.stdout, "a b|$HOME");
    }

    #[test]
    fn missing_program_is_an_error() {
        let spec = CommandSpec::new("definitely-not-a-real-program-qc", Vec::<String>::new());
        let err = SystemRunner.run(&spec).unwrap_err();
        assert!(err.to_string().contains("could not start"));
    }

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let spec = CommandSpec::new("bash", ["-c", "echo hi"]);
        assert_eq!(spec.to_string(), "bash -c 'echo hi'");
    }

    #[test]
    fn combined_without_stderr() {
        let result = CommandResult::new(Some(0), "only stdout", "");
        assert_eq!(result.combined(), "only stdout");
    }
}
