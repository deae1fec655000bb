//! Host asset attributes.

use super::Severity;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Where a host identifier or detail was learned from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSource {
    pub id: Option<String>,
    pub source_type: Option<String>,
    pub data: Option<String>,
    pub description: Option<String>,
    pub deleted: bool,
}

/// Operating system an identifier points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsRef {
    pub id: String,
    pub title: Option<String>,
}

/// Identifier (ip, hostname, MAC, OS CPE, ...) of a host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostIdentifier {
    pub id: Option<String>,
    pub name: String,
    pub value: Option<String>,
    pub creation_time: Option<DateTime<Utc>>,
    pub modification_time: Option<DateTime<Utc>>,
    pub source: Option<AssetSource>,
    pub os: Option<OsRef>,
}

/// Single host detail value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostDetail {
    pub value: Option<String>,
    pub source: Option<AssetSource>,
}

/// Host asset attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostDetails {
    pub severity: Option<Severity>,
    pub identifiers: Vec<HostIdentifier>,
    /// Details keyed by name, in protocol order
    pub details: IndexMap<String, HostDetail>,
    pub hostname: Option<String>,
    pub ip: Option<String>,
    pub best_os_cpe: Option<String>,
    pub best_os_txt: Option<String>,
}

impl HostDetails {
    /// First identifier with the given name.
    #[must_use]
    pub fn identifier(&self, name: &str) -> Option<&HostIdentifier> {
        self.identifiers.iter().find(|i| i.name == name)
    }

    /// Value of a host detail.
    #[must_use]
    pub fn detail_value(&self, name: &str) -> Option<&str> {
        self.details.get(name).and_then(|d| d.value.as_deref())
    }
}
