//! Removal of temporary artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::InstallConfig;
use crate::ui::UserInterface;

/// Paths removed at the end of a run, successful or not.
///
/// Safe to run any number of times: absent paths are skipped, and removal
/// errors are logged rather than raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cleanup {
    files: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
}

impl Cleanup {
    /// Create an empty cleanup set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The installer, the environment file, and the notebook's sample data.
    pub fn for_install(config: &InstallConfig, env_file_name: &str) -> Self {
        Self::new()
            .file(config.installer_path())
            .file(config.download_path(env_file_name))
            .dir(config.sample_data_dir.clone())
    }

    /// Track a file.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Track a directory, removed recursively.
    pub fn dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.push(path.into());
        self
    }

    /// Tracked files.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Tracked directories.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Remove every tracked path that exists. Returns how many were removed.
    pub fn run(&self, ui: &mut dyn UserInterface) -> usize {
        let mut removed = 0;

        for path in &self.files {
            if remove(path, |p| fs::remove_file(p)) {
                removed += 1;
            }
        }
        for path in &self.dirs {
            if remove(path, |p| fs::remove_dir_all(p)) {
                removed += 1;
            }
        }

        tracing::debug!("Cleanup removed {} path(s)", removed);
        ui.success("Cleaned up unneeded files.");
        removed
    }
}

fn remove(path: &Path, op: fn(&Path) -> std::io::Result<()>) -> bool {
    if !path.exists() {
        return false;
    }
    match op(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Could not remove {}: {}", path.display(), e);
            false
        }
    }
}
