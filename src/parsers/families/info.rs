//! CVEs, CPEs, OVAL definitions and `allinfo` rows.
//!
//! These arrive from the information endpoint with the discriminator child
//! already hoisted into the row. Large vendor documents sit under
//! `raw_data`; extensions read from it and the family descriptor drops it.

use crate::model::{
    parse_cvss_vector, AllInfoDetails, CertRef, CpeDetails, CveDetails, CveRef, CveReference,
    EntityDetails, NvtRef, OvalAffected, OvalCriteria, OvalCriterion, OvalDefDetails,
    OvalExtendDefinition, OvalReference, Severity,
};
use crate::parsers::fragment::{text, texts, Fragment};
use crate::raw;
use crate::utils::coerce;
use serde_json::Value;

/// Maximum nesting of OVAL criteria that is followed.
const MAX_CRITERIA_DEPTH: usize = 32;

/// Severity of an info row: `severity` and `cvss_base` are plain scores,
/// `score` is in tenths. All three keys are consumed.
pub(crate) fn take_info_severity(fragment: &mut Fragment) -> Option<Severity> {
    let severity = fragment.take_severity("severity");
    let cvss_base = fragment.take_severity("cvss_base");
    let score = fragment.take_severity_tenths("score");
    severity.or(cvss_base).or(score)
}

/// Number of referenced CVEs.
fn take_cve_ref_count(fragment: &mut Fragment) -> usize {
    fragment.take_count("cve_refs").unwrap_or_default()
}

pub(crate) fn extend_cve(fragment: &mut Fragment) -> EntityDetails {
    let severity = take_info_severity(fragment);
    let cvss_vector = fragment.take_text("cvss_vector");
    let legacy_vector = fragment.take_text("cvss_base_vector");
    let cvss_vector = cvss_vector.or(legacy_vector);
    let entry = fragment
        .get("raw_data")
        .and_then(|raw_data| raw::child(raw_data, "entry"))
        .cloned()
        .unwrap_or(Value::Null);

    let published = fragment
        .take_date("published")
        .or_else(|| coerce::parse_date(text(&entry, "published-datetime").as_deref()));
    let last_modified = fragment
        .take_date("last_modified")
        .or_else(|| coerce::parse_date(text(&entry, "last-modified-datetime").as_deref()));

    EntityDetails::Cve(CveDetails {
        severity,
        cvss_metrics: cvss_vector.as_deref().map(parse_cvss_vector),
        cvss_vector,
        description: fragment
            .take_text("description")
            .or_else(|| text(&entry, "summary")),
        products: fragment
            .take_text("products")
            .map(|products| products.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default(),
        nvts: fragment
            .take_list("nvts", "nvt")
            .iter()
            .filter_map(|nvt| {
                Some(NvtRef {
                    oid: text(nvt, "oid")?,
                    name: text(nvt, "name"),
                })
            })
            .collect(),
        cert_refs: fragment
            .take_list("cert", "cert_ref")
            .iter()
            .filter_map(|cert| {
                Some(CertRef {
                    cert_type: text(cert, "type"),
                    name: text(cert, "name")?,
                    title: text(cert, "title"),
                })
            })
            .collect(),
        published,
        last_modified,
        references: raw::as_list(raw::get_path(&entry, &["references"]))
            .into_iter()
            .map(|reference| CveReference {
                name: raw::child(reference, "reference").and_then(raw::text_of),
                href: raw::child(reference, "reference").and_then(|r| text(r, "href")),
                source: text(reference, "source"),
                reference_type: text(reference, "reference_type"),
            })
            .collect(),
    })
}

pub(crate) fn extend_cpe(fragment: &mut Fragment) -> EntityDetails {
    EntityDetails::Cpe(CpeDetails {
        title: fragment.take_text("title"),
        nvd_id: fragment.take_text("nvd_id"),
        severity: take_info_severity(fragment),
        status: fragment.take_text("status"),
        deprecated_by: fragment.take_text("deprecated_by"),
        cve_ref_count: take_cve_ref_count(fragment),
        cves: fragment
            .take_list("cves", "cve")
            .iter()
            .filter_map(cve_ref)
            .collect(),
    })
}

/// A CVE referenced by a CPE, either `<cve id><severity/></cve>` or the
/// older `<cve><entry id><cvss><base_metrics><score/>...` shape.
fn cve_ref(value: &Value) -> Option<CveRef> {
    let entry = raw::child(value, "entry");
    let id = text(value, "id").or_else(|| entry.and_then(|e| text(e, "id")))?;
    let severity = text(value, "severity").or_else(|| {
        entry
            .and_then(|e| raw::get_path(e, &["cvss", "base_metrics", "score"]))
            .and_then(raw::text_of)
    });
    Some(CveRef {
        id,
        severity: coerce::parse_severity(severity.as_deref()),
    })
}

pub(crate) fn extend_ovaldef(fragment: &mut Fragment) -> EntityDetails {
    let definition = fragment
        .get("raw_data")
        .and_then(|raw_data| raw::child(raw_data, "definition"))
        .cloned()
        .unwrap_or(Value::Null);
    let metadata = raw::child(&definition, "metadata")
        .cloned()
        .unwrap_or(Value::Null);

    let affected = raw::as_list(raw::child(&metadata, "affected"))
        .first()
        .map(|affected| OvalAffected {
            family: text(affected, "family"),
            platforms: texts(raw::child(affected, "platform")),
            products: texts(raw::child(affected, "product")),
        })
        .unwrap_or_default();

    EntityDetails::OvalDef(OvalDefDetails {
        title: fragment
            .take_text("title")
            .or_else(|| text(&metadata, "title")),
        version: fragment.take_text("version"),
        class: fragment.take_text("class"),
        status: fragment.take_text("status"),
        file: fragment.take_text("file"),
        deprecated: fragment.take_yes_no("deprecated"),
        severity: take_info_severity(fragment),
        cve_ref_count: take_cve_ref_count(fragment),
        description: fragment
            .take_text("description")
            .or_else(|| text(&metadata, "description")),
        references: raw::as_list(raw::child(&metadata, "reference"))
            .into_iter()
            .map(|reference| OvalReference {
                source: text(reference, "source"),
                ref_id: text(reference, "ref_id"),
                ref_url: text(reference, "ref_url"),
            })
            .collect(),
        affected,
        criteria: raw::child(&definition, "criteria").map(|c| criteria(c, 0)),
    })
}

fn criteria(value: &Value, depth: usize) -> OvalCriteria {
    let nested = if depth < MAX_CRITERIA_DEPTH {
        raw::as_list(raw::child(value, "criteria"))
            .into_iter()
            .map(|c| criteria(c, depth + 1))
            .collect()
    } else {
        Vec::new()
    };
    OvalCriteria {
        operator: text(value, "operator"),
        comment: text(value, "comment"),
        negate: is_true(text(value, "negate").as_deref()),
        criterions: raw::as_list(raw::child(value, "criterion"))
            .into_iter()
            .map(|c| OvalCriterion {
                comment: text(c, "comment"),
                test_ref: text(c, "test_ref"),
                negate: is_true(text(c, "negate").as_deref()),
            })
            .collect(),
        extend_definitions: raw::as_list(raw::child(value, "extend_definition"))
            .into_iter()
            .map(|d| OvalExtendDefinition {
                comment: text(d, "comment"),
                definition_ref: text(d, "definition_ref"),
                negate: is_true(text(d, "negate").as_deref()),
                applicability_check: is_true(text(d, "applicability_check").as_deref()),
            })
            .collect(),
        criteria: nested,
    }
}

/// OVAL documents spell booleans as `true`/`false`.
fn is_true(text: Option<&str>) -> bool {
    matches!(text, Some("true")) || coerce::parse_yes_no(text)
}

pub(crate) fn extend_allinfo(fragment: &mut Fragment) -> EntityDetails {
    EntityDetails::AllInfo(AllInfoDetails {
        info_type: fragment.take_text("type"),
        extra: fragment.take_text("extra"),
        severity: take_info_severity(fragment),
    })
}
