//! HTTP downloads.
//!
//! Provides a blocking HTTP client for fetching the installer and the
//! environment file into the working directory.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Something that can save a URL to a local file.
pub trait Downloader {
    /// Download `url` to `dest`, replacing it. Returns the number of bytes written.
    fn download(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// Downloads over HTTP/HTTPS.
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    /// Create a downloader with a 30-second connect timeout.
    ///
    /// There is no overall timeout: the installer is large and Colab
    /// bandwidth varies.
    pub fn new() -> Result<Self> {
        Self::with_connect_timeout(Duration::from_secs(30))
    }

    /// Create a downloader with a custom connect timeout.
    pub fn with_connect_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("qiime-colab/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        tracing::debug!("Downloading {} to {}", url, dest.display());
        let mut response = self.client.get(url).send()?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        let file = File::create(dest)
            .with_context(|| format!("Failed to create {}", dest.display()))?;
        let mut writer = BufWriter::new(file);
        let bytes = response
            .copy_to(&mut writer)
            .with_context(|| format!("Failed to read body of {}", url))?;
        writer.flush()?;

        tracing::debug!("Saved {} bytes to {}", bytes, dest.display());
        Ok(bytes)
    }
}

/// Downloader that writes canned content and records requests, for tests.
#[derive(Debug, Default)]
pub struct RecordingDownloader {
    requests: RefCell<Vec<(String, PathBuf)>>,
    failing: Vec<String>,
}

impl RecordingDownloader {
    /// Create a downloader where every request succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make requests for URLs containing `pattern` fail.
    pub fn fail_on(mut self, pattern: &str) -> Self {
        self.failing.push(pattern.to_string());
        self
    }

    /// Every `(url, dest)` requested so far.
    pub fn requests(&self) -> Vec<(String, PathBuf)> {
        self.requests.borrow().clone()
    }

    /// Check if any URL containing `pattern` was requested.
    pub fn was_requested(&self, pattern: &str) -> bool {
        self.requests.borrow().iter().any(|(u, _)| u.contains(pattern))
    }
}

impl Downloader for RecordingDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        self.requests
            .borrow_mut()
            .push((url.to_string(), dest.to_path_buf()));

        if self.failing.iter().any(|p| url.contains(p.as_str())) {
            bail!("HTTP 404 Not Found fetching {}", url);
        }

        let body = format!("# downloaded from {}\n", url);
        std::fs::write(dest, &body)?;
        Ok(body.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn recording_downloader_writes_file() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("a.yml");
        let dl = RecordingDownloader::new();

        let n = dl.download("https://example.com/a.yml", &dest).unwrap();
        assert!(n > 0);
        assert!(dest.exists());
        assert!(dl.was_requested("a.yml"));
    }

    #[test]
    fn recording_downloader_can_fail() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("a.yml");
        let dl = RecordingDownloader::new().fail_on("a.yml");

        let err = dl.download("https://example.com/a.yml", &dest).unwrap_err();
        assert!(err.to_string().contains("404"));
        assert!(!dest.exists());
        assert_eq!(dl.requests().len(), 1);
    }

    #[test]
    fn http_downloader_builds() {
        assert!(HttpDownloader::new().is_ok());
    }

    #[test]
    fn http_download_saves_body() {
        let server = MockServer::start();
        let yaml = "channels:\n  - conda-forge\ndependencies:\n  - qiime2\n";
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/distro/amplicon/qiime2.yml")
                .header("user-agent", concat!("qiime-colab/", env!("CARGO_PKG_VERSION")));
            then.status(200).body(yaml);
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("qiime2.yml");
        let n = HttpDownloader::new()
            .unwrap()
            .download(&server.url("/distro/amplicon/qiime2.yml"), &dest)
            .unwrap();

        mock.assert();
        assert_eq!(n, yaml.len() as u64);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), yaml);
    }

    #[test]
    fn http_download_replaces_existing_file() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/installer.sh");
            then.status(200).body("new");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("installer.sh");
        std::fs::write(&dest, "old contents that were longer").unwrap();

        HttpDownloader::new()
            .unwrap()
            .download(&server.url("/installer.sh"), &dest)
            .unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn http_download_fails_on_404() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing.yml");
            then.status(404).body("Not Found");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("missing.yml");
        let err = HttpDownloader::new()
            .unwrap()
            .download(&server.url("/missing.yml"), &dest)
            .unwrap_err()
            .to_string();

        assert!(err.contains("404"), "Error should mention 404: {}", err);
        assert!(!dest.exists());
    }

    #[test]
    fn http_download_fails_on_500() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/error.yml");
            then.status(500).body("Internal Server Error");
        });

        let temp = TempDir::new().unwrap();
        let result = HttpDownloader::new()
            .unwrap()
            .download(&server.url("/error.yml"), &temp.path().join("error.yml"));
        assert!(result.unwrap_err().to_string().contains("500"));
    }
}
