//! Scan configs and policies.

use crate::model::{
    ConfigFamily, ConfigPreference, EntityDetails, NvtRef, ScanConfigDetails, ScanConfigType,
    Trend, UsageType,
};
use crate::parsers::fragment::{text, texts, Fragment};
use crate::raw;
use crate::utils::coerce;
use serde_json::Value;

pub(crate) fn extend(fragment: &mut Fragment) -> EntityDetails {
    let (family_count, family_trend) = take_counted(fragment, "family_count");
    let (nvt_count, nvt_trend) = take_counted(fragment, "nvt_count");

    let preferences: Vec<ConfigPreference> = fragment
        .take_list("preferences", "preference")
        .iter()
        .filter_map(preference)
        .collect();
    let (nvt_preferences, scanner_preferences): (Vec<_>, Vec<_>) =
        preferences.into_iter().partition(|p| p.nvt.is_some());

    EntityDetails::ScanConfig(ScanConfigDetails {
        usage_type: fragment
            .take_text("usage_type")
            .and_then(|t| UsageType::from_text(&t)),
        scan_config_type: fragment.take_int("type").map(ScanConfigType::from_code),
        predefined: fragment.take_yes_no("predefined"),
        deprecated: fragment.take_yes_no("deprecated"),
        family_count,
        family_trend,
        nvt_count,
        nvt_trend,
        max_nvt_count: fragment.take_count("max_nvt_count"),
        known_nvt_count: fragment.take_count("known_nvt_count"),
        families: fragment
            .take_list("families", "family")
            .iter()
            .filter_map(family)
            .collect(),
        scanner_preferences,
        nvt_preferences,
        tasks: fragment.take_refs("tasks", "task"),
        scanner: fragment.take_ref("scanner"),
    })
}

/// `<family_count>62<growing>1</growing></family_count>`
fn take_counted(fragment: &mut Fragment, key: &str) -> (Option<usize>, Option<Trend>) {
    let Some(value) = fragment.take(key) else {
        return (None, None);
    };
    let count = coerce::parse_count(raw::text_of(&value).as_deref());
    let trend = raw::child(&value, "growing")
        .and_then(raw::text_of)
        .map(|growing| Trend::from_growing(coerce::parse_yes_no(Some(growing.as_str()))));
    (count, trend)
}

fn family(value: &Value) -> Option<ConfigFamily> {
    Some(ConfigFamily {
        name: text(value, "name")?,
        nvt_count: coerce::parse_count(text(value, "nvt_count").as_deref()).unwrap_or_default(),
        max_nvt_count: coerce::parse_count(text(value, "max_nvt_count").as_deref())
            .unwrap_or_default(),
        trend: Trend::from_growing(coerce::parse_yes_no(text(value, "growing").as_deref())),
    })
}

fn preference(value: &Value) -> Option<ConfigPreference> {
    let name = text(value, "name")?;
    let nvt = raw::child(value, "nvt").and_then(|nvt| {
        let oid = text(nvt, "oid")?;
        Some(NvtRef {
            oid,
            name: text(nvt, "name"),
        })
    });
    Some(ConfigPreference {
        id: text(value, "id"),
        hr_name: text(value, "hr_name").unwrap_or_else(|| name.clone()),
        name,
        preference_type: text(value, "type"),
        value: text(value, "value"),
        default: text(value, "default"),
        alternatives: texts(raw::child(value, "alt")),
        nvt,
    })
}
