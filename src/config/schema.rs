//! Configuration schema.
//!
//! Every field has a default matching the Colab VM layout, so an empty file
//! (or no file at all) describes a standard install.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::version::DEFAULT_VERSION;

/// Miniforge installer for x86_64 Linux.
pub const MINIFORGE_URL: &str =
    "https://github.com/conda-forge/miniforge/releases/latest/download/Miniforge3-Linux-x86_64.sh";

/// Complete installer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallConfig {
    /// Distribution version to install.
    pub version: String,

    /// Miniforge install prefix.
    pub prefix: PathBuf,

    /// Name of the environment QIIME 2 is installed into.
    pub env_name: String,

    /// Which manager binary creates the environment.
    pub manager: Manager,

    /// Miniforge installer download URL.
    pub installer_url: String,

    /// Command name of the installed tool.
    pub tool: String,

    /// Where the activating wrapper script is written.
    pub wrapper_path: PathBuf,

    /// Directory downloads are written to.
    pub download_dir: PathBuf,

    /// Where the output of a failed step is written.
    pub log_file: PathBuf,

    /// Notebook sample data removed during cleanup.
    pub sample_data_dir: PathBuf,

    /// Auxiliary package installation.
    pub aux: AuxConfig,

    /// Output markers that signal success.
    pub markers: Markers,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            prefix: PathBuf::from("/usr/local/miniforge3"),
            env_name: "qiime2".to_string(),
            manager: Manager::default(),
            installer_url: MINIFORGE_URL.to_string(),
            tool: "qiime".to_string(),
            wrapper_path: PathBuf::from("/usr/local/bin/qiime"),
            download_dir: PathBuf::from("."),
            log_file: PathBuf::from("logs.txt"),
            sample_data_dir: PathBuf::from("/content/sample_data"),
            aux: AuxConfig::default(),
            markers: Markers::default(),
        }
    }
}

impl InstallConfig {
    /// `<prefix>/bin/<name>`
    pub fn prefix_bin(&self, name: &str) -> PathBuf {
        self.prefix.join("bin").join(name)
    }

    /// Activation profile sourced before `conda activate`.
    pub fn conda_profile(&self) -> PathBuf {
        self.prefix.join("etc").join("profile.d").join("conda.sh")
    }

    /// Path of the tool inside the environment; its presence means the environment exists.
    pub fn env_tool_path(&self) -> PathBuf {
        self.prefix
            .join("envs")
            .join(&self.env_name)
            .join("bin")
            .join(&self.tool)
    }

    /// Local path a downloaded URL is saved to.
    pub fn download_path(&self, file_name: &str) -> PathBuf {
        self.download_dir.join(file_name)
    }

    /// Local path of the downloaded Miniforge installer.
    pub fn installer_path(&self) -> PathBuf {
        self.download_path(crate::version::url_file_name(&self.installer_url))
    }

    /// Marker the configured manager prints after creating an environment.
    pub fn env_create_marker(&self) -> &str {
        match self.manager {
            Manager::Conda => &self.markers.conda_transaction,
            Manager::Mamba => &self.markers.mamba_transaction,
        }
    }
}

/// Package manager binary used for `env create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Manager {
    Conda,
    #[default]
    Mamba,
}

impl Manager {
    /// Binary name under `<prefix>/bin`.
    pub fn binary(&self) -> &'static str {
        match self {
            Self::Conda => "conda",
            Self::Mamba => "mamba",
        }
    }

    /// Extra arguments for a non-interactive `env create`.
    pub fn create_args(&self) -> &'static [&'static str] {
        match self {
            Self::Conda => &["-q"],
            Self::Mamba => &["-y"],
        }
    }
}

impl FromStr for Manager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conda" => Ok(Self::Conda),
            "mamba" => Ok(Self::Mamba),
            _ => Err(format!("unknown package manager: {}", s)),
        }
    }
}

/// The auxiliary visualization package step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuxConfig {
    /// Shell command run inside the activated environment.
    pub command: String,

    /// Abort the install if the command fails.
    pub required: bool,
}

impl Default for AuxConfig {
    fn default() -> Self {
        Self {
            command: "pip install --verbose Cython && pip install iow==1.0.7 empress".to_string(),
            required: false,
        }
    }
}

/// Output snippets that mark a successful step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Markers {
    /// Printed by `conda info` when Miniforge is installed.
    pub manager_info: String,

    /// Printed by the Miniforge installer on success.
    pub installer: String,

    /// Printed by `conda env create` on success.
    pub conda_transaction: String,

    /// Printed by `mamba env create` on success.
    pub mamba_transaction: String,

    /// Printed by `qiime info` when the tool works.
    pub tool_info: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            manager_info: "conda version".to_string(),
            installer: "installation finished.".to_string(),
            conda_transaction: "Verifying transaction: ...working... done".to_string(),
            mamba_transaction: "Transaction finished".to_string(),
            tool_info: "QIIME 2 release:".to_string(),
        }
    }
}
