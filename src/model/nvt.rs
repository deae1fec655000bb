//! Network vulnerability test (NVT) attributes.

use super::{CvssMetrics, Severity};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Quality of detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qod {
    /// Percentage 0-100
    pub value: Option<i64>,
    pub qod_type: Option<String>,
}

/// Solution advice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// `VendorFix`, `Workaround`, `Mitigation`, `NoneAvailable`, `WillNotFix`
    pub solution_type: Option<String>,
    pub method: Option<String>,
    pub description: Option<String>,
}

/// Advisory reference (`cert-bund`, `dfn-cert`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NvtCertRef {
    pub id: String,
    pub ref_type: String,
}

/// Any other reference (`url`, `bid`, vendor ids, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NvtXref {
    pub id: String,
    pub ref_type: String,
}

/// Script preference of an NVT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NvtPreference {
    pub id: Option<String>,
    pub name: String,
    pub hr_name: String,
    pub preference_type: Option<String>,
    pub value: Option<String>,
    pub default: Option<String>,
    pub alternatives: Vec<String>,
}

/// NVT attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NvtDetails {
    pub oid: Option<String>,
    pub family: Option<String>,
    pub severity: Option<Severity>,
    pub cvss_vector: Option<String>,
    pub cvss_metrics: Option<CvssMetrics>,
    pub qod: Option<Qod>,
    /// `key=value` pairs of the pipe separated tag string, in order
    pub tags: IndexMap<String, String>,
    pub solution: Option<Solution>,
    pub cves: Vec<String>,
    pub certs: Vec<NvtCertRef>,
    pub xrefs: Vec<NvtXref>,
    pub preferences: Vec<NvtPreference>,
    pub timeout: Option<i64>,
    pub default_timeout: Option<i64>,
}

impl NvtDetails {
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }
}

/// Split an NVT tag string (`cvss_base_vector=AV:N/...|summary=...`).
///
/// Segments without `=` are skipped; a value may itself contain `=`.
#[must_use]
pub fn parse_nvt_tags(tags: &str) -> IndexMap<String, String> {
    tags.split('|')
        .filter_map(|segment| {
            let (key, value) = segment.split_once('=')?;
            let key = key.trim();
            (!key.is_empty()).then(|| (key.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nvt_tags() {
        let tags = parse_nvt_tags(
            "cvss_base_vector=AV:N/AC:L/Au:N/C:P/I:P/A:P|summary=A=B test|broken|solution_type=VendorFix",
        );
        assert_eq!(tags.len(), 3);
        assert_eq!(tags["cvss_base_vector"], "AV:N/AC:L/Au:N/C:P/I:P/A:P");
        assert_eq!(tags["summary"], "A=B test");
        assert_eq!(tags.keys().last().map(String::as_str), Some("solution_type"));
    }

    #[test]
    fn test_empty_tags() {
        assert!(parse_nvt_tags("").is_empty());
    }
}
