//! Distribution version parsing and resolution.
//!
//! A QIIME 2 release is named `YYYY.M` (e.g. `2025.4`). The version decides
//! two things independently: which Python build tag the environment file was
//! published for, and which URL layout the file lives under. Both decisions
//! are ordered range tables in [`rules`], evaluated against one canonical
//! [`DistroVersion`].
//!
//! # Example
//!
//! ```
//! use qiime_colab::version::{resolve, PackageListTemplate};
//!
//! let resolution = resolve("2020.1").unwrap();
//! assert_eq!(resolution.python_tag, "36");
//! assert_eq!(resolution.template, PackageListTemplate::Core);
//! assert_eq!(resolution.file_name, "qiime2-2020.1-py36-linux-conda.yml");
//! ```

pub mod rules;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{InstallError, Result};

pub use rules::{PackageListTemplate, Rule, RuleTable, PYTHON_TAGS, TEMPLATES};

/// Version used when none is given on the command line or in the config.
pub const DEFAULT_VERSION: &str = "2025.4";

/// A parsed distribution version.
///
/// Components compare lexicographically, so `2024` < `2024.5` < `2024.10`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DistroVersion(Vec<u64>);

impl DistroVersion {
    /// Whether this version sorts strictly before `bound`.
    pub fn is_before(&self, bound: &[u64]) -> bool {
        self.0.as_slice() < bound
    }
}

impl FromStr for DistroVersion {
    type Err = InstallError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InstallError::InvalidVersion {
                input: s.to_string(),
                message: "version is empty".to_string(),
            });
        }

        let components = trimmed
            .split('.')
            .map(|token| {
                token
                    .parse::<u64>()
                    .map_err(|_| InstallError::InvalidVersion {
                        input: s.to_string(),
                        message: format!("'{}' is not a non-negative integer", token),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self(components))
    }
}

impl fmt::Display for DistroVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Everything derived from a requested version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The version exactly as requested; it is interpolated into the URL verbatim.
    pub version: String,
    /// Python build tag, e.g. `"310"`.
    pub python_tag: &'static str,
    /// Which URL layout the environment file uses.
    pub template: PackageListTemplate,
    /// Concrete download URL of the environment file.
    pub url: String,
    /// Local file name, the final path segment of `url`.
    pub file_name: String,
}

/// Resolve a version string into a download URL and local file name.
pub fn resolve(version: &str) -> Result<Resolution> {
    let parsed: DistroVersion = version.parse()?;
    let version = version.trim().to_string();

    let python_tag = *PYTHON_TAGS.select(&parsed);
    let template = *TEMPLATES.select(&parsed);
    let url = template.url(&version, python_tag);
    let file_name = url_file_name(&url).to_string();

    tracing::debug!(
        "Resolved version {} to python tag {} using {:?} template",
        version,
        python_tag,
        template
    );

    Ok(Resolution {
        version,
        python_tag,
        template,
        url,
        file_name,
    })
}

/// Final path segment of a URL, ignoring any query or fragment.
pub fn url_file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_year_and_month() {
        let v: DistroVersion = "2025.4".parse().unwrap();
        assert_eq!(v, DistroVersion(vec![2025, 4]));
    }

    #[test]
    fn parses_single_component() {
        let v: DistroVersion = "2024".parse().unwrap();
        assert_eq!(v, DistroVersion(vec![2024]));
    }

    #[test]
    fn accepts_components_wider_than_32_bits() {
        let v: DistroVersion = "2025.4294967296".parse().unwrap();
        assert_eq!(v.to_string(), "2025.4294967296");
        assert!(!v.is_before(&[2025, 4294967295]));
    }

    #[test]
    fn rejects_non_numeric_component() {
        let err = "2025.x".parse::<DistroVersion>().unwrap_err();
        assert!(matches!(err, InstallError::InvalidVersion { .. }));
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn rejects_empty_component() {
        assert!("2025.".parse::<DistroVersion>().is_err());
        assert!("".parse::<DistroVersion>().is_err());
    }

    #[test]
    fn rejects_negative_component() {
        assert!("2025.-1".parse::<DistroVersion>().is_err());
    }

    #[test]
    fn compares_numerically_not_lexically() {
        let may: DistroVersion = "2024.5".parse().unwrap();
        let october: DistroVersion = "2024.10".parse().unwrap();
        assert!(may < october);
    }

    #[test]
    fn shorter_prefix_sorts_first() {
        let year: DistroVersion = "2024".parse().unwrap();
        let may: DistroVersion = "2024.5".parse().unwrap();
        assert!(year < may);
    }

    #[test]
    fn is_before_is_strict() {
        let v: DistroVersion = "2023.9".parse().unwrap();
        assert!(!v.is_before(&[2023, 9]));
        assert!(v.is_before(&[2023, 10]));
    }

    #[test]
    fn display_round_trips_canonical_form() {
        let v: DistroVersion = "2024.10".parse().unwrap();
        assert_eq!(v.to_string(), "2024.10");
    }

    #[test]
    fn resolve_legacy_release() {
        let r = resolve("2020.1").unwrap();
        assert_eq!(r.python_tag, "36");
        assert_eq!(r.template, PackageListTemplate::Core);
        assert_eq!(
            r.url,
            "https://data.qiime2.org/distro/core/qiime2-2020.1-py36-linux-conda.yml"
        );
        assert_eq!(r.file_name, "qiime2-2020.1-py36-linux-conda.yml");
    }

    #[test]
    fn resolve_recent_release() {
        let r = resolve("2024.10").unwrap();
        assert_eq!(r.python_tag, "310");
        assert_eq!(r.template, PackageListTemplate::Amplicon);
        assert_eq!(
            r.url,
            "https://data.qiime2.org/distro/amplicon/qiime2-amplicon-2024.10-py310-linux-conda.yml"
        );
        assert_eq!(r.file_name, "qiime2-amplicon-2024.10-py310-linux-conda.yml");
    }

    #[test]
    fn resolve_default_version() {
        let r = resolve(DEFAULT_VERSION).unwrap();
        assert_eq!(r.version, "2025.4");
        assert_eq!(r.python_tag, "310");
        assert_eq!(r.template, PackageListTemplate::Amplicon);
    }

    #[test]
    fn resolve_keeps_requested_spelling() {
        let r = resolve("2023.09").unwrap();
        assert_eq!(r.version, "2023.09");
        assert!(r.url.contains("qiime2-amplicon-2023.09-py38"));
    }

    #[test]
    fn resolve_rejects_garbage() {
        assert!(resolve("latest").is_err());
    }

    #[test]
    fn file_name_is_last_url_segment() {
        for v in ["2019.10", "2021.4", "2023.9", "2024.5", "2025.4"] {
            let r = resolve(v).unwrap();
            assert_eq!(r.file_name, r.url.rsplit('/').next().unwrap());
            assert!(r.file_name.ends_with("-linux-conda.yml"));
        }
    }

    #[test]
    fn url_file_name_strips_query() {
        assert_eq!(
            url_file_name("https://example.com/a/b/file.sh?raw=1"),
            "file.sh"
        );
        assert_eq!(url_file_name("file.sh"), "file.sh");
    }
}
