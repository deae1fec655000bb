//! Scan configuration and policy attributes.

use super::EntityRef;
use serde::{Deserialize, Serialize};

/// Whether a selection grows automatically when new NVTs/families appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    /// Fixed selection (`growing` = 0)
    Static,
    /// New items are added automatically (`growing` = 1)
    Dynamic,
}

impl Trend {
    #[must_use]
    pub const fn from_growing(growing: bool) -> Self {
        if growing {
            Self::Dynamic
        } else {
            Self::Static
        }
    }
}

/// What the configuration is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsageType {
    Scan,
    Policy,
}

impl UsageType {
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "scan" => Some(Self::Scan),
            "policy" => Some(Self::Policy),
            _ => None,
        }
    }
}

/// Scanner family a configuration targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanConfigType {
    OpenVas,
    Osp,
    Other(i64),
}

impl ScanConfigType {
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::OpenVas,
            1 => Self::Osp,
            other => Self::Other(other),
        }
    }
}

/// Selection summary for a family inside a configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFamily {
    pub name: String,
    pub nvt_count: usize,
    pub max_nvt_count: usize,
    pub trend: Trend,
}

/// NVT a preference belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NvtRef {
    pub oid: String,
    pub name: Option<String>,
}

/// Scanner or NVT preference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPreference {
    pub id: Option<String>,
    pub name: String,
    /// Human readable name, falls back to `name`
    pub hr_name: String,
    pub preference_type: Option<String>,
    pub value: Option<String>,
    pub default: Option<String>,
    pub alternatives: Vec<String>,
    pub nvt: Option<NvtRef>,
}

/// Scan configuration (and policy) attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfigDetails {
    pub usage_type: Option<UsageType>,
    pub scan_config_type: Option<ScanConfigType>,
    pub predefined: bool,
    pub deprecated: bool,
    pub family_count: Option<usize>,
    pub family_trend: Option<Trend>,
    pub nvt_count: Option<usize>,
    pub nvt_trend: Option<Trend>,
    pub max_nvt_count: Option<usize>,
    pub known_nvt_count: Option<usize>,
    pub families: Vec<ConfigFamily>,
    pub scanner_preferences: Vec<ConfigPreference>,
    pub nvt_preferences: Vec<ConfigPreference>,
    pub tasks: Vec<EntityRef>,
    pub scanner: Option<EntityRef>,
}

impl ScanConfigDetails {
    /// Look up a family selection by name.
    #[must_use]
    pub fn family(&self, name: &str) -> Option<&ConfigFamily> {
        self.families.iter().find(|f| f.name == name)
    }

    /// Number of NVTs selected across all families.
    #[must_use]
    pub fn selected_nvts(&self) -> usize {
        self.families.iter().map(|f| f.nvt_count).sum()
    }
}
