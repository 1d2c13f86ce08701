//! Conda environment activation.
//!
//! Conda environments only take effect in a shell that has sourced the
//! activation profile and run `conda activate`. Both operations here wrap a
//! command in that sequence: [`Activator::run_in_env`] for a one-off
//! command, and [`Activator::install_wrapper`] for a script on PATH that
//! does it on every invocation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::InstallConfig;
use crate::error::Result;
use crate::shell::{CommandResult, CommandRunner, CommandSpec};

/// Activates a named environment before running commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activator {
    profile: PathBuf,
    env_name: String,
}

impl Activator {
    /// Create an activator for `env_name` using the profile at `profile`.
    pub fn new(profile: impl Into<PathBuf>, env_name: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            env_name: env_name.into(),
        }
    }

    /// Create an activator for the configured prefix and environment.
    pub fn from_config(config: &InstallConfig) -> Self {
        Self::new(config.conda_profile(), config.env_name.clone())
    }

    /// The environment this activator switches to.
    pub fn env_name(&self) -> &str {
        &self.env_name
    }

    /// Shell line that activates the environment, then runs `cmd`.
    pub fn activation_command(&self, cmd: &str) -> String {
        format!(
            ". {} && conda activate {} && {}",
            self.profile.display(),
            self.env_name,
            cmd
        )
    }

    /// Run `cmd` inside the environment through one bash process.
    ///
    /// The result is returned as-is; callers decide what counts as success.
    pub fn run_in_env(&self, runner: &dyn CommandRunner, cmd: &str) -> Result<CommandResult> {
        tracing::debug!("Running in environment {}: {}", self.env_name, cmd);
        runner.run(&CommandSpec::bash(self.activation_command(cmd)))
    }

    /// Body of a wrapper script that forwards all arguments to `tool`.
    pub fn wrapper_script(&self, tool: &str) -> String {
        format!(
            "#!/usr/bin/env bash\n\n{}\n",
            self.activation_command(&format!("{} \"$@\"", tool))
        )
    }

    /// Write the wrapper script for `tool` to `path` and make it executable.
    pub fn install_wrapper(&self, path: &Path, tool: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.wrapper_script(tool))?;
        make_executable(path)?;
        tracing::info!("Installed {} wrapper at {}", tool, path.display());
        Ok(())
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
