//! Process execution and the marker-based success check.

pub mod check;
pub mod command;
pub mod mock;

pub use check::succeeded;
pub use command::{CommandResult, CommandRunner, CommandSpec, SystemRunner, BASH};
pub use mock::ScriptedRunner;
