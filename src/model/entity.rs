//! The normalized entity and the attributes every entity carries.

use super::{
    AllInfoDetails, CertBundAdvDetails, CpeDetails, CveDetails, DfnCertAdvDetails, HostDetails,
    NvtDetails, OvalDefDetails, ReportFormatDetails, ScanConfigDetails, ScannerDetails,
};
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of entity a fragment is normalized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Task,
    Target,
    PortList,
    Credential,
    Tag,
    Filter,
    ScanConfig,
    Policy,
    Scanner,
    Host,
    OperatingSystem,
    ReportFormat,
    Cve,
    Cpe,
    Nvt,
    OvalDef,
    CertBundAdv,
    DfnCertAdv,
    AllInfo,
}

impl EntityType {
    /// Every known entity type.
    pub const ALL: [Self; 19] = [
        Self::Task,
        Self::Target,
        Self::PortList,
        Self::Credential,
        Self::Tag,
        Self::Filter,
        Self::ScanConfig,
        Self::Policy,
        Self::Scanner,
        Self::Host,
        Self::OperatingSystem,
        Self::ReportFormat,
        Self::Cve,
        Self::Cpe,
        Self::Nvt,
        Self::OvalDef,
        Self::CertBundAdv,
        Self::DfnCertAdv,
        Self::AllInfo,
    ];

    /// Stable name used in configuration files and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Target => "target",
            Self::PortList => "port_list",
            Self::Credential => "credential",
            Self::Tag => "tag",
            Self::Filter => "filter",
            Self::ScanConfig => "scan_config",
            Self::Policy => "policy",
            Self::Scanner => "scanner",
            Self::Host => "host",
            Self::OperatingSystem => "operating_system",
            Self::ReportFormat => "report_format",
            Self::Cve => "cve",
            Self::Cpe => "cpe",
            Self::Nvt => "nvt",
            Self::OvalDef => "ovaldef",
            Self::CertBundAdv => "cert_bund_adv",
            Self::DfnCertAdv => "dfn_cert_adv",
            Self::AllInfo => "allinfo",
        }
    }

    /// Parse a type from its [`name`](Self::name).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Whether the entity is served by the generic information endpoint.
    #[must_use]
    pub const fn is_info(&self) -> bool {
        matches!(
            self,
            Self::Cve
                | Self::Cpe
                | Self::Nvt
                | Self::OvalDef
                | Self::CertBundAdv
                | Self::DfnCertAdv
                | Self::AllInfo
        )
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference to another entity (`<task id="..."><name>...</name></task>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
    pub name: Option<String>,
}

impl EntityRef {
    #[must_use]
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }
}

/// User-defined tag attached to an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTag {
    pub id: String,
    pub name: String,
    pub value: Option<String>,
    pub comment: Option<String>,
}

/// Names of the permissions the requesting user holds on an entity, in
/// protocol order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permissions(IndexSet<String>);

impl Permissions {
    #[must_use]
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self(names.into_iter().collect())
    }

    /// Whether the user holds `name`, or the blanket `everything` permission.
    #[must_use]
    pub fn may(&self, name: &str) -> bool {
        self.0.contains("everything") || self.0.contains(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Family-specific attributes of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
#[allow(clippy::large_enum_variant)]
pub enum EntityDetails {
    /// Entity types without specialized attributes
    Generic,
    ScanConfig(ScanConfigDetails),
    Scanner(ScannerDetails),
    Host(HostDetails),
    ReportFormat(ReportFormatDetails),
    Cve(CveDetails),
    Cpe(CpeDetails),
    Nvt(NvtDetails),
    OvalDef(OvalDefDetails),
    CertBundAdv(CertBundAdvDetails),
    DfnCertAdv(DfnCertAdvDetails),
    AllInfo(AllInfoDetails),
}

/// A normalized protocol entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity_type: EntityType,
    /// Protocol-assigned id
    pub id: String,
    pub name: Option<String>,
    pub comment: Option<String>,
    /// Name of the owning user
    pub owner: Option<String>,
    pub creation_time: Option<DateTime<Utc>>,
    pub modification_time: Option<DateTime<Utc>>,
    pub writable: bool,
    pub in_use: bool,
    pub orphan: bool,
    pub permissions: Permissions,
    pub user_tags: Vec<UserTag>,
    pub details: EntityDetails,
    /// Remaining child values no normalization step consumed
    pub properties: Map<String, Value>,
}

impl Entity {
    /// Create an entity with only an id; everything else defaulted.
    #[must_use]
    pub fn new(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self {
            entity_type,
            id: id.into(),
            name: None,
            comment: None,
            owner: None,
            creation_time: None,
            modification_time: None,
            writable: false,
            in_use: false,
            orphan: false,
            permissions: Permissions::default(),
            user_tags: Vec::new(),
            details: EntityDetails::Generic,
            properties: Map::new(),
        }
    }

    /// Get a leftover property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Whether the user may delete this entity: it must be writable, not in
    /// use, and the user needs the delete permission.
    #[must_use]
    pub fn is_deletable(&self) -> bool {
        self.writable && !self.in_use && self.permissions.may(&format!("delete_{}", self.command_name()))
    }

    fn command_name(&self) -> &'static str {
        match self.entity_type {
            EntityType::ScanConfig | EntityType::Policy => "config",
            EntityType::Host | EntityType::OperatingSystem => "asset",
            other if other.is_info() => "info",
            other => other.name(),
        }
    }

    #[must_use]
    pub const fn as_cve(&self) -> Option<&CveDetails> {
        match &self.details {
            EntityDetails::Cve(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_cpe(&self) -> Option<&CpeDetails> {
        match &self.details {
            EntityDetails::Cpe(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_nvt(&self) -> Option<&NvtDetails> {
        match &self.details {
            EntityDetails::Nvt(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_scan_config(&self) -> Option<&ScanConfigDetails> {
        match &self.details {
            EntityDetails::ScanConfig(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_host(&self) -> Option<&HostDetails> {
        match &self.details {
            EntityDetails::Host(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_report_format(&self) -> Option<&ReportFormatDetails> {
        match &self.details {
            EntityDetails::ReportFormat(d) => Some(d),
            _ => None,
        }
    }
}
