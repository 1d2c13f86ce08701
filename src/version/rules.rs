//! Ordered version-range tables.

use serde::Serialize;

use super::DistroVersion;

/// A single range rule: versions strictly before `below` map to `value`.
#[derive(Debug, Clone, Copy)]
pub struct Rule<T: 'static> {
    pub below: &'static [u64],
    pub value: T,
}

/// Rules checked in order, first match wins, else `fallback`.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable<T: 'static> {
    pub rules: &'static [Rule<T>],
    pub fallback: T,
}

impl<T> RuleTable<T> {
    /// Select the value for `version`.
    pub fn select(&self, version: &DistroVersion) -> &T {
        self.rules
            .iter()
            .find(|rule| version.is_before(rule.below))
            .map(|rule| &rule.value)
            .unwrap_or(&self.fallback)
    }
}

/// Python build tag each release range was published for.
pub const PYTHON_TAGS: RuleTable<&str> = RuleTable {
    rules: &[
        Rule {
            below: &[2021, 4],
            value: "36",
        },
        Rule {
            below: &[2024, 5],
            value: "38",
        },
        Rule {
            below: &[2024, 10],
            value: "39",
        },
    ],
    fallback: "310",
};

/// Where each release range publishes its environment file.
pub const TEMPLATES: RuleTable<PackageListTemplate> = RuleTable {
    rules: &[Rule {
        below: &[2023, 9],
        value: PackageListTemplate::Core,
    }],
    fallback: PackageListTemplate::Amplicon,
};

/// URL layout of a published environment file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageListTemplate {
    /// `distro/core/qiime2-{version}-py{python}-linux-conda.yml`
    Core,
    /// `distro/amplicon/qiime2-amplicon-{version}-py{python}-linux-conda.yml`
    Amplicon,
}

impl PackageListTemplate {
    /// Build the download URL for a version and python tag.
    pub fn url(&self, version: &str, python_tag: &str) -> String {
        match self {
            Self::Core => format!(
                "https://data.qiime2.org/distro/core/qiime2-{}-py{}-linux-conda.yml",
                version, python_tag
            ),
            Self::Amplicon => format!(
                "https://data.qiime2.org/distro/amplicon/qiime2-amplicon-{}-py{}-linux-conda.yml",
                version, python_tag
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> DistroVersion {
        s.parse().unwrap()
    }

    #[test]
    fn python_tag_before_first_threshold() {
        assert_eq!(*PYTHON_TAGS.select(&v("2019.1")), "36");
        assert_eq!(*PYTHON_TAGS.select(&v("2021.2")), "36");
    }

    #[test]
    fn python_tag_boundaries_are_exclusive() {
        assert_eq!(*PYTHON_TAGS.select(&v("2021.4")), "38");
        assert_eq!(*PYTHON_TAGS.select(&v("2024.2")), "38");
        assert_eq!(*PYTHON_TAGS.select(&v("2024.5")), "39");
        assert_eq!(*PYTHON_TAGS.select(&v("2024.9")), "39");
        assert_eq!(*PYTHON_TAGS.select(&v("2024.10")), "310");
    }

    #[test]
    fn python_tag_after_last_threshold() {
        assert_eq!(*PYTHON_TAGS.select(&v("2025.4")), "310");
        assert_eq!(*PYTHON_TAGS.select(&v("2030.1")), "310");
    }

    #[test]
    fn template_cutover() {
        assert_eq!(*TEMPLATES.select(&v("2023.7")), PackageListTemplate::Core);
        assert_eq!(
            *TEMPLATES.select(&v("2023.9")),
            PackageListTemplate::Amplicon
        );
        assert_eq!(
            *TEMPLATES.select(&v("2024.10")),
            PackageListTemplate::Amplicon
        );
    }

    #[test]
    fn year_only_sorts_before_its_months() {
        // (2024,) < (2024, 5), so a bare year lands in the earlier range.
        assert_eq!(*PYTHON_TAGS.select(&v("2024")), "38");
    }

    #[test]
    fn empty_table_uses_fallback() {
        let table: RuleTable<u8> = RuleTable {
            rules: &[],
            fallback: 7,
        };
        assert_eq!(*table.select(&v("1.0")), 7);
    }

    #[test]
    fn core_template_interpolates() {
        assert_eq!(
            PackageListTemplate::Core.url("2022.2", "38"),
            "https://data.qiime2.org/distro/core/qiime2-2022.2-py38-linux-conda.yml"
        );
    }
}
