//! Step descriptions.

use crate::shell::CommandSpec;

/// Console text for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepMessages {
    /// Shown before the step starts.
    pub doing: String,
    /// Shown, together with the captured output, when the step fails.
    pub failure: String,
    /// Shown when the step succeeds.
    pub success: String,
}

impl StepMessages {
    pub fn new(
        doing: impl Into<String>,
        failure: impl Into<String>,
        success: impl Into<String>,
    ) -> Self {
        Self {
            doing: doing.into(),
            failure: failure.into(),
            success: success.into(),
        }
    }
}

/// A command whose success is decided by exit code and an output marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedStep {
    /// Short identifier used in errors and logs.
    pub name: &'static str,
    /// What to run.
    pub command: CommandSpec,
    /// Snippet that must appear in the combined output.
    pub marker: String,
    /// Console text.
    pub messages: StepMessages,
}

impl CheckedStep {
    pub fn new(
        name: &'static str,
        command: CommandSpec,
        marker: impl Into<String>,
        messages: StepMessages,
    ) -> Self {
        Self {
            name,
            command,
            marker: marker.into(),
            messages,
        }
    }
}
