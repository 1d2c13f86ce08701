//! Installation orchestration.
//!
//! [`Installer`] sequences the phases of a run:
//!
//! 1. Miniforge: download and run the installer, unless conda already works
//! 2. QIIME 2: download the environment file, create the environment,
//!    install the wrapper and the auxiliary package, unless the environment
//!    exists (then only the wrapper is reinstalled if the tool is inactive)
//! 3. Verify that `qiime info` reports a release
//! 4. Clean up downloads and print the final banner
//!
//! Every checked step goes through [`Installer::run_checked`]. A failed step
//! prints its output, writes it to the log file, runs cleanup, and returns
//! [`InstallError::StepFailed`]; nothing runs after it.

pub mod plan;
pub mod step;

use std::fs;
use std::path::Path;

use crate::activate::Activator;
use crate::cleanup::Cleanup;
use crate::config::InstallConfig;
use crate::error::{InstallError, Result};
use crate::fetch::Downloader;
use crate::probe::InstallState;
use crate::shell::{succeeded, CommandResult, CommandRunner, CommandSpec};
use crate::ui::UserInterface;
use crate::version::{resolve, Resolution};

pub use plan::{AuxOutcome, InstallPlan, InstallReport, PhaseOutcome};
pub use step::{CheckedStep, StepMessages};

/// Final banner of a successful run.
pub const SUCCESS_BANNER: &str = "Everything is A-OK. You can start using Qiime 2 now";

/// Drives one installation run.
pub struct Installer<'a> {
    config: InstallConfig,
    resolution: Resolution,
    activator: Activator,
    cleanup: Cleanup,
    runner: &'a dyn CommandRunner,
    downloader: &'a dyn Downloader,
}

impl<'a> Installer<'a> {
    /// Resolve the configured version and prepare an installer.
    ///
    /// Fails only if the version string is malformed.
    pub fn new(
        config: InstallConfig,
        runner: &'a dyn CommandRunner,
        downloader: &'a dyn Downloader,
    ) -> Result<Self> {
        let resolution = resolve(&config.version)?;
        let activator = Activator::from_config(&config);
        let cleanup = Cleanup::for_install(&config, &resolution.file_name);

        Ok(Self {
            config,
            resolution,
            activator,
            cleanup,
            runner,
            downloader,
        })
    }

    /// The resolved environment file for the configured version.
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Probe the machine once.
    pub fn probe(&self) -> InstallState {
        InstallState::probe(&self.config, self.runner)
    }

    /// Decide what a run would do for `state`.
    pub fn plan(&self, state: InstallState) -> InstallPlan {
        InstallPlan::new(&self.config, self.resolution.clone(), state)
    }

    /// Probe, then install whatever is missing.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<InstallReport> {
        let state = self.probe();
        self.execute(&self.plan(state), ui)
    }

    /// Execute a plan.
    pub fn execute(&self, plan: &InstallPlan, ui: &mut dyn UserInterface) -> Result<InstallReport> {
        ui.show_header(&format!(
            "QIIME 2 {} (python {})",
            self.resolution.version, self.resolution.python_tag
        ));

        let manager = if plan.install_manager {
            self.install_manager(ui)?;
            PhaseOutcome::Installed
        } else {
            ui.skipped("Miniforge is already installed. Skipped.");
            PhaseOutcome::Skipped
        };

        let mut aux = AuxOutcome::NotAttempted;
        let environment = if plan.create_env {
            self.create_environment(ui)?;
            PhaseOutcome::Installed
        } else {
            ui.skipped("Qiime 2 is already installed. Skipped.");
            PhaseOutcome::Skipped
        };

        if plan.install_wrapper {
            self.install_wrapper(ui)?;
        }
        if plan.install_aux {
            aux = self.install_aux(ui)?;
        }

        self.verify(ui)?;

        self.cleanup.run(ui);
        ui.show_header(SUCCESS_BANNER);

        Ok(InstallReport {
            manager,
            environment,
            wrapper_installed: plan.install_wrapper,
            aux,
        })
    }

    fn install_manager(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let installer = self.config.installer_path();
        self.download_checked(
            "download-miniforge",
            &self.config.installer_url,
            &installer,
            StepMessages::new(
                "Downloading miniforge...",
                "failed downloading miniforge",
                "Downloaded miniforge.",
            ),
            ui,
        )?;

        let prefix = self.config.prefix.to_string_lossy().to_string();
        let step = CheckedStep::new(
            "install-miniforge",
            CommandSpec::new(
                "bash",
                [installer.to_string_lossy().to_string(), "-bfp".to_string(), prefix.clone()],
            ),
            self.config.markers.installer.clone(),
            StepMessages::new(
                "Installing miniforge...",
                "could not install miniforge",
                format!("Installed miniforge to `{}`.", prefix),
            ),
        );
        self.run_checked(&step, ui)?;
        Ok(())
    }

    fn create_environment(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let env_file = self.config.download_path(&self.resolution.file_name);
        self.download_checked(
            "download-package-list",
            &self.resolution.url,
            &env_file,
            StepMessages::new(
                "Downloading Qiime 2 package list...",
                "could not download package list",
                "Downloaded Qiime 2 package list.",
            ),
            ui,
        )?;

        let manager = self.config.manager;
        let mut args: Vec<String> = vec!["env".into(), "create".into()];
        args.extend(manager.create_args().iter().map(|a| a.to_string()));
        args.extend([
            "-n".to_string(),
            self.config.env_name.clone(),
            "--file".to_string(),
            env_file.to_string_lossy().to_string(),
        ]);

        let version = &self.resolution.version;
        let step = CheckedStep::new(
            "create-environment",
            CommandSpec::new(
                self.config.prefix_bin(manager.binary()).to_string_lossy(),
                args,
            ),
            self.config.env_create_marker(),
            StepMessages::new(
                format!(
                    "Installing Qiime 2 ({}). This may take a little bit.",
                    version
                ),
                "could not install Qiime 2",
                format!("Installed Qiime 2 ({}).", version),
            ),
        );
        self.run_checked(&step, ui)?;
        Ok(())
    }

    fn install_wrapper(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let path = &self.config.wrapper_path;
        let mut spinner = ui.start_spinner(&format!("Setting up the {} command...", self.config.tool));

        match self.activator.install_wrapper(path, &self.config.tool) {
            Ok(()) => {
                spinner.finish_success(&format!(
                    "`{}` now runs inside the {} environment.",
                    self.config.tool,
                    self.activator.env_name()
                ));
                Ok(())
            }
            Err(e) => {
                let message = format!("could not write {}", path.display());
                spinner.finish_error(&message);
                drop(spinner);
                Err(self.fail(
                    ui,
                    "install-wrapper",
                    &format!("write {}", path.display()),
                    &e.to_string(),
                    &message,
                ))
            }
        }
    }

    fn install_aux(&self, ui: &mut dyn UserInterface) -> Result<AuxOutcome> {
        let command = &self.config.aux.command;
        let mut spinner = ui.start_spinner("Installing empress...");

        let (ok, output) = match self.activator.run_in_env(self.runner, command) {
            Ok(result) => (result.exited_ok(), result.combined()),
            Err(e) => (false, e.to_string()),
        };

        if ok {
            spinner.finish_success("Installed empress.");
            return Ok(AuxOutcome::Installed);
        }

        spinner.finish_error("could not install Empress");
        drop(spinner);

        if self.config.aux.required {
            return Err(self.fail(
                ui,
                "install-empress",
                &self.activator.activation_command(command),
                &output,
                "could not install Empress",
            ));
        }

        tracing::warn!("Empress install failed:\n{}", output);
        ui.warning("Empress is optional. Continuing without it.");
        Ok(AuxOutcome::Failed)
    }

    fn verify(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let step = CheckedStep::new(
            "verify",
            CommandSpec::new(self.config.tool.clone(), ["info"]),
            self.config.markers.tool_info.clone(),
            StepMessages::new(
                "Checking that Qiime 2 command line works...",
                "Qiime 2 command line does not seem to work",
                "Qiime 2 command line looks good.",
            ),
        );
        self.run_checked(&step, ui)
    }

    /// Run a command and require exit code 0 plus the step's marker.
    ///
    /// On failure the output is shown and written to the log file, cleanup
    /// runs, and `StepFailed` is returned.
    pub fn run_checked(
        &self,
        step: &CheckedStep,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let mut spinner = ui.start_spinner(&step.messages.doing);
        tracing::info!("Running step {}: {}", step.name, step.command);

        let result = match self.runner.run(&step.command) {
            Ok(result) => result,
            Err(e) => {
                spinner.finish_error(&step.messages.failure);
                drop(spinner);
                return Err(self.fail(
                    ui,
                    step.name,
                    &step.command.to_string(),
                    &e.to_string(),
                    &step.messages.failure,
                ));
            }
        };

        if succeeded(&result, &step.marker) {
            spinner.finish_success(&step.messages.success);
            drop(spinner);
            if ui.output_mode().echoes_command_output() {
                ui.message(&result.combined());
            }
            return Ok(result);
        }

        tracing::debug!(
            "Step {} exited with {:?}; marker {:?} present: {}",
            step.name,
            result.exit_code,
            step.marker,
            result.combined().contains(&step.marker)
        );
        spinner.finish_error(&step.messages.failure);
        drop(spinner);
        Err(self.fail(
            ui,
            step.name,
            &step.command.to_string(),
            &result.combined(),
            &step.messages.failure,
        ))
    }

    fn download_checked(
        &self,
        name: &'static str,
        url: &str,
        dest: &Path,
        messages: StepMessages,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let mut spinner = ui.start_spinner(&messages.doing);

        match self.downloader.download(url, dest) {
            Ok(bytes) => {
                tracing::info!("Saved {} ({} bytes)", dest.display(), bytes);
                spinner.finish_success(&messages.success);
                Ok(())
            }
            Err(e) => {
                spinner.finish_error(&messages.failure);
                drop(spinner);
                Err(self.fail(
                    ui,
                    name,
                    &format!("GET {}", url),
                    &format!("{:#}", e),
                    &messages.failure,
                ))
            }
        }
    }

    /// Report a failed step, persist its output, and clean up.
    fn fail(
        &self,
        ui: &mut dyn UserInterface,
        step: &str,
        command: &str,
        output: &str,
        failure: &str,
    ) -> InstallError {
        let log_file = &self.config.log_file;
        let hint = format!("Full output written to {}", log_file.display());
        ui.show_error_block(command, output, Some(&hint));

        if let Err(e) = fs::write(log_file, output) {
            tracing::warn!("Could not write {}: {}", log_file.display(), e);
        }

        self.cleanup.run(ui);

        InstallError::StepFailed {
            step: step.to_string(),
            message: failure.to_string(),
        }
    }
}
