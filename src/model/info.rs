//! Attributes of the SecInfo families served by the information endpoint:
//! CVEs, CPEs, OVAL definitions and the `allinfo` union rows.
//!
//! NVTs and the two advisory families live in their own modules.

use super::{CvssMetrics, NvtRef, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Advisory referencing a CVE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertRef {
    /// `CERT-Bund` or `DFN-CERT`
    pub cert_type: Option<String>,
    pub name: String,
    pub title: Option<String>,
}

/// External reference of a CVE (NVD `references` entry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CveReference {
    pub name: Option<String>,
    pub href: Option<String>,
    pub source: Option<String>,
    pub reference_type: Option<String>,
}

/// CVE attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CveDetails {
    pub severity: Option<Severity>,
    pub cvss_vector: Option<String>,
    pub cvss_metrics: Option<CvssMetrics>,
    pub description: Option<String>,
    /// Affected products as CPE names
    pub products: Vec<String>,
    pub nvts: Vec<NvtRef>,
    pub cert_refs: Vec<CertRef>,
    pub published: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub references: Vec<CveReference>,
}

/// CVE affecting a CPE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CveRef {
    pub id: String,
    pub severity: Option<Severity>,
}

/// CPE attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpeDetails {
    pub title: Option<String>,
    pub nvd_id: Option<String>,
    pub severity: Option<Severity>,
    pub status: Option<String>,
    pub deprecated_by: Option<String>,
    pub cve_ref_count: usize,
    pub cves: Vec<CveRef>,
}

/// Reference listed in OVAL definition metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvalReference {
    pub source: Option<String>,
    pub ref_id: Option<String>,
    pub ref_url: Option<String>,
}

/// Platforms and products an OVAL definition applies to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvalAffected {
    pub family: Option<String>,
    pub platforms: Vec<String>,
    pub products: Vec<String>,
}

/// Leaf test of an OVAL criteria tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvalCriterion {
    pub comment: Option<String>,
    pub test_ref: Option<String>,
    pub negate: bool,
}

/// Reference to another definition inside a criteria tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvalExtendDefinition {
    pub comment: Option<String>,
    pub definition_ref: Option<String>,
    pub negate: bool,
    pub applicability_check: bool,
}

/// Criteria tree of an OVAL definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvalCriteria {
    /// `AND` / `OR`
    pub operator: Option<String>,
    pub comment: Option<String>,
    pub negate: bool,
    pub criterions: Vec<OvalCriterion>,
    pub extend_definitions: Vec<OvalExtendDefinition>,
    pub criteria: Vec<OvalCriteria>,
}

impl OvalCriteria {
    /// Total number of leaf tests in the tree.
    #[must_use]
    pub fn criterion_count(&self) -> usize {
        self.criterions.len()
            + self
                .criteria
                .iter()
                .map(Self::criterion_count)
                .sum::<usize>()
    }
}

/// OVAL definition attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvalDefDetails {
    pub title: Option<String>,
    pub version: Option<String>,
    /// `vulnerability`, `patch`, `inventory`, `compliance`, `miscellaneous`
    pub class: Option<String>,
    pub status: Option<String>,
    pub file: Option<String>,
    pub deprecated: bool,
    pub severity: Option<Severity>,
    pub cve_ref_count: usize,
    pub description: Option<String>,
    pub references: Vec<OvalReference>,
    pub affected: OvalAffected,
    pub criteria: Option<OvalCriteria>,
}

impl OvalDefDetails {
    /// CVE ids among the references.
    pub fn cves(&self) -> impl Iterator<Item = &str> {
        self.references
            .iter()
            .filter(|r| r.source.as_deref() == Some("CVE"))
            .filter_map(|r| r.ref_id.as_deref())
    }
}

/// Row of the `allinfo` union listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllInfoDetails {
    /// Concrete info family of the row
    pub info_type: Option<String>,
    pub extra: Option<String>,
    pub severity: Option<Severity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criterion_count_recurses() {
        let tree = OvalCriteria {
            criterions: vec![OvalCriterion {
                comment: None,
                test_ref: Some("oval:t:1".to_string()),
                negate: false,
            }],
            criteria: vec![OvalCriteria {
                criterions: vec![
                    OvalCriterion {
                        comment: None,
                        test_ref: Some("oval:t:2".to_string()),
                        negate: true,
                    };
                    2
                ],
                ..OvalCriteria::default()
            }],
            ..OvalCriteria::default()
        };
        assert_eq!(tree.criterion_count(), 3);
    }
}
