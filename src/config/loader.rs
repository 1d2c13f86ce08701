//! Configuration file loading and command-line overrides.
//!
//! Precedence, later wins:
//! 1. Built-in defaults ([`InstallConfig::default`])
//! 2. The YAML file given with `--config`
//! 3. Individual command-line flags ([`ConfigOverrides`])

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::{InstallConfig, Manager};
use crate::error::{InstallError, Result};

/// Values given on the command line that replace file or default values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub version: Option<String>,
    pub prefix: Option<PathBuf>,
    pub env_name: Option<String>,
    pub manager: Option<Manager>,
    pub strict_aux: bool,
}

/// Parse configuration from YAML text.
///
/// `path` is only used for error messages.
pub fn parse_config(content: &str, path: &Path) -> Result<InstallConfig> {
    // An empty document deserializes as unit, not as an empty mapping.
    if content.trim().is_empty() {
        return Ok(InstallConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| InstallError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load configuration from a YAML file.
pub fn load_config_file(path: &Path) -> Result<InstallConfig> {
    if !path.exists() {
        return Err(InstallError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content, path)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load the optional config file and apply command-line overrides.
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<InstallConfig> {
    let mut config = match path {
        Some(p) => load_config_file(p)?,
        None => InstallConfig::default(),
    };
    apply_overrides(&mut config, overrides);
    Ok(config)
}

/// Replace config values with any that were given on the command line.
pub fn apply_overrides(config: &mut InstallConfig, overrides: &ConfigOverrides) {
    if let Some(version) = &overrides.version {
        config.version = version.clone();
    }
    if let Some(prefix) = &overrides.prefix {
        config.prefix = prefix.clone();
    }
    if let Some(env_name) = &overrides.env_name {
        config.env_name = env_name.clone();
    }
    if let Some(manager) = overrides.manager {
        config.manager = manager;
    }
    if overrides.strict_aux {
        config.aux.required = true;
    }
}
