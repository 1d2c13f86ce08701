//! Installer configuration.
//!
//! - Schema definitions and defaults in [`schema`]
//! - File loading and command-line overrides in [`loader`]
//!
//! # Example
//!
//! ```
//! use qiime_colab::config::{parse_config, Manager};
//! use std::path::Path;
//!
//! let config = parse_config("manager: conda\nenv_name: q2", Path::new("install.yml")).unwrap();
//! assert_eq!(config.manager, Manager::Conda);
//! assert_eq!(config.env_name, "q2");
//! assert_eq!(config.version, "2025.4");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{apply_overrides, load_config, load_config_file, parse_config, ConfigOverrides};
pub use schema::{AuxConfig, InstallConfig, Manager, Markers, MINIFORGE_URL};
