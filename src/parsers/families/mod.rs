//! Per-family normalization steps.
//!
//! Each entity type maps to a [`FamilyDescriptor`]: the extension that takes
//! the family's fields out of the fragment, and the raw-only keys dropped
//! afterwards.

mod advisory;
mod host;
mod info;
mod nvt;
mod report_format;
mod scan_config;
mod scanner;

use super::fragment::Fragment;
use crate::model::{EntityDetails, EntityType};

/// How one entity family is normalized.
#[derive(Clone, Copy)]
pub struct FamilyDescriptor {
    /// Takes the family's fields out of the fragment
    pub extend: fn(&mut Fragment) -> EntityDetails,
    /// Raw-only keys removed after the extension ran
    pub discard: &'static [&'static str],
    /// Field read as the id when the row has no `id` attribute
    pub id_fallback: Option<&'static str>,
}

fn generic(_: &mut Fragment) -> EntityDetails {
    EntityDetails::Generic
}

static GENERIC: FamilyDescriptor = FamilyDescriptor {
    extend: generic,
    discard: &[],
    id_fallback: None,
};

static OPERATING_SYSTEM: FamilyDescriptor = FamilyDescriptor {
    extend: generic,
    discard: &["type"],
    id_fallback: None,
};

static SCAN_CONFIG: FamilyDescriptor = FamilyDescriptor {
    extend: scan_config::extend,
    discard: &[],
    id_fallback: None,
};

static SCANNER: FamilyDescriptor = FamilyDescriptor {
    extend: scanner::extend,
    discard: &[],
    id_fallback: None,
};

static HOST: FamilyDescriptor = FamilyDescriptor {
    extend: host::extend,
    discard: &["type"],
    id_fallback: None,
};

static REPORT_FORMAT: FamilyDescriptor = FamilyDescriptor {
    extend: report_format::extend,
    discard: &["file", "signature"],
    id_fallback: None,
};

static CVE: FamilyDescriptor = FamilyDescriptor {
    extend: info::extend_cve,
    discard: &["raw_data"],
    id_fallback: None,
};

static CPE: FamilyDescriptor = FamilyDescriptor {
    extend: info::extend_cpe,
    discard: &["raw_data"],
    id_fallback: None,
};

static NVT: FamilyDescriptor = FamilyDescriptor {
    extend: nvt::extend,
    discard: &["preference_count"],
    id_fallback: Some("oid"),
};

static OVALDEF: FamilyDescriptor = FamilyDescriptor {
    extend: info::extend_ovaldef,
    discard: &["raw_data"],
    id_fallback: None,
};

static CERT_BUND_ADV: FamilyDescriptor = FamilyDescriptor {
    extend: advisory::extend_cert_bund,
    discard: &["raw_data"],
    id_fallback: None,
};

static DFN_CERT_ADV: FamilyDescriptor = FamilyDescriptor {
    extend: advisory::extend_dfn_cert,
    discard: &["raw_data"],
    id_fallback: None,
};

static ALLINFO: FamilyDescriptor = FamilyDescriptor {
    extend: info::extend_allinfo,
    discard: &[],
    id_fallback: None,
};

/// Descriptor of an entity type.
#[must_use]
pub fn family_descriptor(entity_type: EntityType) -> &'static FamilyDescriptor {
    match entity_type {
        EntityType::Task
        | EntityType::Target
        | EntityType::PortList
        | EntityType::Credential
        | EntityType::Tag
        | EntityType::Filter => &GENERIC,
        EntityType::OperatingSystem => &OPERATING_SYSTEM,
        EntityType::ScanConfig | EntityType::Policy => &SCAN_CONFIG,
        EntityType::Scanner => &SCANNER,
        EntityType::Host => &HOST,
        EntityType::ReportFormat => &REPORT_FORMAT,
        EntityType::Cve => &CVE,
        EntityType::Cpe => &CPE,
        EntityType::Nvt => &NVT,
        EntityType::OvalDef => &OVALDEF,
        EntityType::CertBundAdv => &CERT_BUND_ADV,
        EntityType::DfnCertAdv => &DFN_CERT_ADV,
        EntityType::AllInfo => &ALLINFO,
    }
}
