//! qiime-colab - QIIME 2 setup for disposable notebook VMs.
//!
//! Installs Miniforge, creates a QIIME 2 environment for a requested release,
//! puts an activating `qiime` wrapper on PATH, verifies it, and cleans up.
//! Every phase is skipped when a probe shows it is already done, so running
//! the tool twice is cheap.
//!
//! # Modules
//!
//! - [`activate`] - Environment activation and the wrapper script
//! - [`cleanup`] - Removal of downloads and sample data
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and overrides
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - HTTP downloads
//! - [`install`] - Phase orchestration and checked steps
//! - [`probe`] - Detection of what is already installed
//! - [`shell`] - External process execution and output checks
//! - [`ui`] - Console reporting and spinners
//! - [`version`] - Release version parsing and package-list resolution
//!
//! # Example
//!
//! ```
//! use qiime_colab::version::resolve;
//!
//! let r = resolve("2024.10").unwrap();
//! assert_eq!(r.python_tag, "310");
//! assert_eq!(r.file_name, "qiime2-amplicon-2024.10-py310-linux-conda.yml");
//! ```
//!
//! For end-to-end runs with scripted commands, see the integration tests.

pub mod activate;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod install;
pub mod probe;
pub mod shell;
pub mod ui;
pub mod version;

pub use error::{InstallError, Result};
