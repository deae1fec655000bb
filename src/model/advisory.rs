//! CERT-Bund and DFN-CERT advisory attributes.

use super::Severity;
use serde::{Deserialize, Serialize};

/// Further information link of a CERT-Bund advisory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryInfo {
    pub issuer: Option<String>,
    pub url: Option<String>,
}

/// CERT-Bund advisory attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertBundAdvDetails {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub severity: Option<Severity>,
    pub cve_ref_count: usize,
    pub version: Option<String>,
    pub software: Option<String>,
    pub platform: Option<String>,
    pub effect: Option<String>,
    pub remote_attack: Option<String>,
    pub risk: Option<String>,
    pub reference_source: Option<String>,
    pub reference_url: Option<String>,
    pub categories: Vec<String>,
    /// Text blocks of the description, in order
    pub description: Vec<String>,
    pub additional_information: Vec<AdvisoryInfo>,
    pub cves: Vec<String>,
}

/// Link of a DFN-CERT advisory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryLink {
    pub rel: Option<String>,
    pub href: String,
}

/// DFN-CERT advisory attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DfnCertAdvDetails {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub severity: Option<Severity>,
    pub cve_ref_count: usize,
    /// The `alternate` link pointing at the advisory itself
    pub advisory_link: Option<String>,
    pub additional_links: Vec<AdvisoryLink>,
    pub cves: Vec<String>,
}
