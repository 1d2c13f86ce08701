//! Pre-flight probing of what is already installed.

use serde::Serialize;

use crate::config::InstallConfig;
use crate::shell::{succeeded, CommandRunner, CommandSpec};

/// Snapshot of the machine taken once at startup.
///
/// Nothing re-validates these facts later in the run; the installer acts on
/// the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InstallState {
    /// `conda info` under the prefix reports a conda version.
    pub has_manager: bool,
    /// The tool exists inside the target environment.
    pub env_installed: bool,
    /// The tool on PATH reports a release.
    pub tool_active: bool,
}

impl InstallState {
    /// Probe the prefix, the environment and PATH.
    ///
    /// A command that cannot be started counts as "not installed".
    pub fn probe(config: &InstallConfig, runner: &dyn CommandRunner) -> Self {
        let conda = config.prefix_bin("conda");
        let has_manager = probe_command(
            runner,
            &CommandSpec::new(conda.to_string_lossy(), ["info"]),
            &config.markers.manager_info,
        );
        let env_installed = config.env_tool_path().exists();
        let tool_active = probe_command(
            runner,
            &CommandSpec::new(config.tool.clone(), ["info"]),
            &config.markers.tool_info,
        );

        let state = Self {
            has_manager,
            env_installed,
            tool_active,
        };
        tracing::debug!("Probed install state: {:?}", state);
        state
    }
}

fn probe_command(runner: &dyn CommandRunner, spec: &CommandSpec, marker: &str) -> bool {
    match runner.run(spec) {
        Ok(result) => succeeded(&result, marker),
        Err(e) => {
            tracing::debug!("Probe '{}' could not run: {}", spec, e);
            false
        }
    }
}
