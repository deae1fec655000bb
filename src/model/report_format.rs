//! Report format attributes.

use super::EntityRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Signature check outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrustValue {
    Yes,
    No,
    Unknown,
}

impl TrustValue {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        match text {
            "yes" => Self::Yes,
            "no" => Self::No,
            _ => Self::Unknown,
        }
    }
}

/// Trust state of a report format; empty when the server sent none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trust {
    pub value: Option<TrustValue>,
    pub time: Option<DateTime<Utc>>,
}

/// Configurable report format parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFormatParam {
    pub name: String,
    /// `boolean`, `integer`, `string`, `text`, `selection`, `report_format_list`
    pub param_type: Option<String>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub value: Option<String>,
    pub default: Option<String>,
    pub options: Vec<String>,
}

/// Report format attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFormatDetails {
    pub extension: Option<String>,
    pub content_type: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub trust: Trust,
    pub active: bool,
    pub predefined: bool,
    pub configurable: bool,
    pub deprecated: bool,
    pub params: Vec<ReportFormatParam>,
    pub alerts: Vec<EntityRef>,
}

impl ReportFormatDetails {
    /// Whether the format is trusted and active, i.e. usable for downloads.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.active && self.trust.value == Some(TrustValue::Yes)
    }
}
