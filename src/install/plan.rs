//! What a run will do, and what it did.

use serde::Serialize;

use crate::config::InstallConfig;
use crate::probe::InstallState;
use crate::version::Resolution;

/// The phases a run would execute given a probed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
    pub resolution: Resolution,
    pub installer_url: String,
    pub state: InstallState,
    /// Download and run the Miniforge installer.
    pub install_manager: bool,
    /// Download the environment file and create the environment.
    pub create_env: bool,
    /// Write the activating wrapper script.
    pub install_wrapper: bool,
    /// Install the auxiliary package into the new environment.
    pub install_aux: bool,
}

impl InstallPlan {
    /// Decide the phases for `state`.
    pub fn new(config: &InstallConfig, resolution: Resolution, state: InstallState) -> Self {
        let create_env = !state.env_installed;
        Self {
            resolution,
            installer_url: config.installer_url.clone(),
            state,
            install_manager: !state.has_manager,
            create_env,
            install_wrapper: create_env || !state.tool_active,
            install_aux: create_env,
        }
    }
}

/// Result of a phase that may be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseOutcome {
    Installed,
    Skipped,
}

/// Result of the best-effort auxiliary package step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuxOutcome {
    Installed,
    Failed,
    NotAttempted,
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub manager: PhaseOutcome,
    pub environment: PhaseOutcome,
    pub wrapper_installed: bool,
    pub aux: AuxOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::resolve;

    fn plan(state: InstallState) -> InstallPlan {
        InstallPlan::new(&InstallConfig::default(), resolve("2025.4").unwrap(), state)
    }

    #[test]
    fn fresh_machine_runs_everything() {
        let p = plan(InstallState::default());
        assert!(p.install_manager);
        assert!(p.create_env);
        assert!(p.install_wrapper);
        assert!(p.install_aux);
    }

    #[test]
    fn everything_present_runs_nothing() {
        let p = plan(InstallState {
            has_manager: true,
            env_installed: true,
            tool_active: true,
        });
        assert!(!p.install_manager);
        assert!(!p.create_env);
        assert!(!p.install_wrapper);
        assert!(!p.install_aux);
    }

    #[test]
    fn inactive_tool_only_needs_wrapper() {
        let p = plan(InstallState {
            has_manager: true,
            env_installed: true,
            tool_active: false,
        });
        assert!(!p.create_env);
        assert!(p.install_wrapper);
        assert!(!p.install_aux);
    }

    #[test]
    fn plan_serializes_for_dry_run() {
        let p = plan(InstallState::default());
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["resolution"]["python_tag"], "310");
        assert_eq!(json["resolution"]["template"], "amplicon");
        assert_eq!(json["install_manager"], true);
    }
}
