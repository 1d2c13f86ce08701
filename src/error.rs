//! Error types for installer operations.
//!
//! This module defines [`InstallError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration problems (bad version string, unreadable config) surface
//!   before any step runs and map to exit status 2
//! - A checked step that fails has already written its log and cleaned up by
//!   the time [`InstallError::StepFailed`] is returned; it maps to exit status 1
//! - Use `anyhow::Error` (via `InstallError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for installer operations.
#[derive(Debug, Error)]
pub enum InstallError {
    /// Version string is not a dot-separated list of integers.
    #[error("Invalid version '{input}': {message}")]
    InvalidVersion { input: String, message: String },

    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A checked installation step failed.
    #[error("Step '{step}' failed: {message}")]
    StepFailed { step: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InstallError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidVersion { .. }
            | Self::ConfigNotFound { .. }
            | Self::ConfigParseError { .. } => 2,
            _ => 1,
        }
    }
}

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, InstallError>;
