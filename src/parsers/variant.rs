//! Info-entity variant resolution.
//!
//! The information endpoint returns rows of several kinds under one element
//! name. A row's kind is given only by which discriminator child it carries
//! (`<info id><cve>...</cve></info>`). Resolving a row for a variant hoists
//! that child into the row; rows of other kinds resolve to nothing.

use crate::model::EntityType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kinds of rows served by the information endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfoVariant {
    Cve,
    Cpe,
    Nvt,
    OvalDef,
    CertBundAdv,
    DfnCertAdv,
    AllInfo,
}

impl InfoVariant {
    pub const ALL: [Self; 7] = [
        Self::Cve,
        Self::Cpe,
        Self::Nvt,
        Self::OvalDef,
        Self::CertBundAdv,
        Self::DfnCertAdv,
        Self::AllInfo,
    ];

    /// Name of the discriminator child, also the `info_type` request value.
    #[must_use]
    pub const fn discriminator(&self) -> &'static str {
        match self {
            Self::Cve => "cve",
            Self::Cpe => "cpe",
            Self::Nvt => "nvt",
            Self::OvalDef => "ovaldef",
            Self::CertBundAdv => "cert_bund_adv",
            Self::DfnCertAdv => "dfn_cert_adv",
            Self::AllInfo => "allinfo",
        }
    }

    #[must_use]
    pub const fn entity_type(&self) -> EntityType {
        match self {
            Self::Cve => EntityType::Cve,
            Self::Cpe => EntityType::Cpe,
            Self::Nvt => EntityType::Nvt,
            Self::OvalDef => EntityType::OvalDef,
            Self::CertBundAdv => EntityType::CertBundAdv,
            Self::DfnCertAdv => EntityType::DfnCertAdv,
            Self::AllInfo => EntityType::AllInfo,
        }
    }

    #[must_use]
    pub fn from_entity_type(entity_type: EntityType) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.entity_type() == entity_type)
    }

    /// Whether a row carries this variant's discriminator child.
    #[must_use]
    pub fn matches(&self, row: &Value) -> bool {
        row.as_object()
            .and_then(|map| map.get(self.discriminator()))
            .is_some_and(|child| !child.is_null())
    }

    /// Variant of a row, if it carries any known discriminator.
    #[must_use]
    pub fn detect(row: &Value) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| variant.matches(row))
    }
}

impl std::fmt::Display for InfoVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.discriminator())
    }
}

/// Hoist the variant's discriminator child into the row.
///
/// The child's keys are merged over the row's own keys (the child wins on a
/// collision) and the discriminator key itself is removed. Returns `None`
/// when the row is not of this variant.
#[must_use]
pub fn resolve_info_variant(raw: &Value, variant: InfoVariant) -> Option<Value> {
    if !variant.matches(raw) {
        return None;
    }
    let row = raw.as_object()?;
    let discriminator = variant.discriminator();

    let mut merged: Map<String, Value> = row
        .iter()
        .filter(|(key, _)| key.as_str() != discriminator)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    if let Some(Value::Object(child)) = row.get(discriminator) {
        for (key, value) in child {
            merged.insert(key.clone(), value.clone());
        }
    }
    Some(Value::Object(merged))
}

/// A row that only carries page counts (`<info start="1" max="10"/>`).
#[must_use]
pub fn is_counts_fragment(raw: &Value) -> bool {
    raw.as_object().is_some_and(|row| {
        !row.contains_key("_id")
            && (row.contains_key("_start") || row.contains_key("_max"))
            && InfoVariant::detect(raw).is_none()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_hoists_child() {
        let row = json!({
            "_id": "CVE-2021-1",
            "name": "CVE-2021-1",
            "cve": {"severity": "9.8", "name": "child name"},
        });
        let resolved = resolve_info_variant(&row, InfoVariant::Cve).unwrap();
        assert_eq!(
            resolved,
            json!({"_id": "CVE-2021-1", "name": "child name", "severity": "9.8"})
        );
        assert_eq!(resolve_info_variant(&row, InfoVariant::Cpe), None);
    }

    #[test]
    fn test_predicates() {
        let cve = json!({"_id": "a", "cve": {}});
        let cpe = json!({"_id": "b", "cpe": {"title": "x"}});
        let counts = json!({"_start": "1", "_max": "10"});
        assert!(InfoVariant::Cve.matches(&cve));
        assert!(!InfoVariant::Cve.matches(&cpe));
        assert!(!InfoVariant::Cve.matches(&counts));
        assert_eq!(InfoVariant::detect(&cpe), Some(InfoVariant::Cpe));
        assert!(is_counts_fragment(&counts));
        assert!(!is_counts_fragment(&cve));
    }

    #[test]
    fn test_empty_discriminator_element() {
        // <info id="x"><allinfo/></info>
        let row = json!({"_id": "x", "allinfo": ""});
        assert_eq!(
            resolve_info_variant(&row, InfoVariant::AllInfo),
            Some(json!({"_id": "x"}))
        );
    }

    #[test]
    fn test_entity_type_mapping() {
        for variant in InfoVariant::ALL {
            assert_eq!(InfoVariant::from_entity_type(variant.entity_type()), Some(variant));
            assert!(variant.entity_type().is_info());
        }
        assert_eq!(InfoVariant::from_entity_type(EntityType::Task), None);
    }
}
