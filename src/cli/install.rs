//! The install command.
//!
//! Loads configuration, then either prints the plan (`--dry-run`) or runs the
//! installer against the real system.

use crate::config::{load_config, InstallConfig};
use crate::error::{InstallError, Result};
use crate::fetch::{Downloader, HttpDownloader};
use crate::install::{InstallPlan, Installer};
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::UserInterface;

use super::args::Cli;

/// Install QIIME 2, or print the plan for doing so.
pub struct InstallCommand {
    config: InstallConfig,
    dry_run: bool,
    json: bool,
}

impl InstallCommand {
    /// Build the command from parsed arguments, loading any config file.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = load_config(cli.config.as_deref(), &cli.overrides())?;
        Ok(Self::new(config, cli.dry_run, cli.json))
    }

    /// Create the command from an already loaded config.
    pub fn new(config: InstallConfig, dry_run: bool, json: bool) -> Self {
        Self {
            config,
            dry_run,
            json,
        }
    }

    /// Run against the real system.
    pub fn execute(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let runner = SystemRunner;
        let downloader = HttpDownloader::new()?;
        self.execute_with(&runner, &downloader, ui)
    }

    /// Run with the given process runner and downloader.
    pub fn execute_with(
        &self,
        runner: &dyn CommandRunner,
        downloader: &dyn Downloader,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let installer = Installer::new(self.config.clone(), runner, downloader)?;

        if self.dry_run {
            let plan = installer.plan(installer.probe());
            return self.print_plan(&plan, ui);
        }

        let report = installer.run(ui)?;
        tracing::debug!("Install report: {:?}", report);
        Ok(())
    }

    fn print_plan(&self, plan: &InstallPlan, ui: &mut dyn UserInterface) -> Result<()> {
        if self.json {
            let json = serde_json::to_string_pretty(plan)
                .map_err(|e| InstallError::Other(e.into()))?;
            println!("{}", json);
            return Ok(());
        }

        let r = &plan.resolution;
        ui.show_header(&format!("Dry run: QIIME 2 {}", r.version));
        ui.message(&format!("  Python tag:    {}", r.python_tag));
        ui.message(&format!("  Package list:  {}", r.url));
        ui.message(&format!("  Saved as:      {}", r.file_name));
        ui.message(&format!("  Installer:     {}", plan.installer_url));
        ui.message(&format!("  Env name:      {}", self.config.env_name));
        ui.message(&format!("  Manager:       {}", self.config.manager.binary()));
        ui.message("");
        ui.message(&format!(
            "  Miniforge:     {}",
            phase_label(plan.install_manager)
        ));
        ui.message(&format!(
            "  Environment:   {}",
            phase_label(plan.create_env)
        ));
        ui.message(&format!(
            "  Wrapper:       {}",
            if plan.install_wrapper {
                self.config.wrapper_path.display().to_string()
            } else {
                "keep".to_string()
            }
        ));
        ui.message(&format!(
            "  Empress:       {}",
            if !plan.install_aux {
                "skip"
            } else if self.config.aux.required {
                "install (required)"
            } else {
                "install (best-effort)"
            }
        ));
        Ok(())
    }
}

fn phase_label(run: bool) -> &'static str {
    if run {
        "install"
    } else {
        "already installed, skip"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::RecordingDownloader;
    use crate::shell::ScriptedRunner;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn config_in(temp: &TempDir, version: &str) -> InstallConfig {
        InstallConfig {
            version: version.to_string(),
            prefix: temp.path().join("miniforge3"),
            wrapper_path: temp.path().join("bin").join("qiime"),
            download_dir: temp.path().to_path_buf(),
            log_file: temp.path().join("logs.txt"),
            sample_data_dir: temp.path().join("sample_data"),
            ..Default::default()
        }
    }

    #[test]
    fn dry_run_probes_but_changes_nothing() {
        let temp = TempDir::new().unwrap();
        let runner = ScriptedRunner::new();
        let dl = RecordingDownloader::new();
        let mut ui = MockUI::new();

        InstallCommand::new(config_in(&temp, "2020.1"), true, false)
            .execute_with(&runner, &dl, &mut ui)
            .unwrap();

        assert!(dl.requests().is_empty());
        assert!(runner.command_lines().iter().all(|c| c.ends_with(" info")));
        assert!(ui.has_message("py36"));
        assert!(ui.has_message("qiime2-2020.1-py36-linux-conda.yml"));
        assert!(!temp.path().join("bin").join("qiime").exists());
    }

    #[test]
    fn dry_run_reports_skipped_phases() {
        let temp = TempDir::new().unwrap();
        let runner = ScriptedRunner::new();
        runner.respond("bin/conda info", 0, "conda version : 24.9.2");
        let dl = RecordingDownloader::new();
        let mut ui = MockUI::new();

        InstallCommand::new(config_in(&temp, "2024.10"), true, false)
            .execute_with(&runner, &dl, &mut ui)
            .unwrap();

        assert!(ui.has_message("Miniforge:     already installed, skip"));
        assert!(ui.has_message("Environment:   install"));
    }

    #[test]
    fn invalid_version_fails_before_running_anything() {
        let temp = TempDir::new().unwrap();
        let runner = ScriptedRunner::new();
        let dl = RecordingDownloader::new();
        let mut ui = MockUI::new();

        let err = InstallCommand::new(config_in(&temp, "latest"), false, false)
            .execute_with(&runner, &dl, &mut ui)
            .unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(runner.calls().is_empty());
    }
}
