//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigOverrides, Manager};

/// Set up QIIME 2 and Miniforge inside a disposable notebook VM.
#[derive(Debug, Parser)]
#[command(name = "qiime-colab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// QIIME 2 release to install (e.g. 2024.10)
    #[arg(id = "release", value_name = "VERSION")]
    pub version: Option<String>,

    /// Path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Miniforge install prefix
    #[arg(long, value_name = "DIR")]
    pub prefix: Option<PathBuf>,

    /// Name of the QIIME 2 environment
    #[arg(long, value_name = "NAME")]
    pub env_name: Option<String>,

    /// Package manager used to create the environment
    #[arg(long, value_name = "conda|mamba")]
    pub manager: Option<Manager>,

    /// Treat a failed Empress install as fatal
    #[arg(long)]
    pub strict_aux: bool,

    /// Show what would be installed without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the dry-run plan as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Show command output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Flags that override the config file.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            version: self.version.clone(),
            prefix: self.prefix.clone(),
            env_name: self.env_name.clone(),
            manager: self.manager,
            strict_aux: self.strict_aux,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["qiime-colab"]).unwrap();
        assert!(cli.version.is_none());
        assert!(!cli.dry_run);
        assert_eq!(cli.overrides(), ConfigOverrides::default());
    }

    #[test]
    fn positional_version() {
        let cli = Cli::try_parse_from(["qiime-colab", "2024.10"]).unwrap();
        assert_eq!(cli.version.as_deref(), Some("2024.10"));
    }

    #[test]
    fn manager_flag_parses() {
        let cli = Cli::try_parse_from(["qiime-colab", "--manager", "conda"]).unwrap();
        assert_eq!(cli.manager, Some(Manager::Conda));
        assert!(Cli::try_parse_from(["qiime-colab", "--manager", "pip"]).is_err());
    }

    #[test]
    fn overrides_carry_flags() {
        let cli = Cli::try_parse_from([
            "qiime-colab",
            "2023.9",
            "--prefix",
            "/opt/mf",
            "--env-name",
            "q2",
            "--strict-aux",
        ])
        .unwrap();
        let o = cli.overrides();
        assert_eq!(o.version.as_deref(), Some("2023.9"));
        assert_eq!(o.prefix, Some(PathBuf::from("/opt/mf")));
        assert_eq!(o.env_name.as_deref(), Some("q2"));
        assert!(o.strict_aux);
    }

    #[test]
    fn json_requires_dry_run() {
        assert!(Cli::try_parse_from(["qiime-colab", "--json"]).is_err());
        assert!(Cli::try_parse_from(["qiime-colab", "--dry-run", "--json"]).is_ok());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["qiime-colab", "-v", "-q"]).is_err());
    }
}
