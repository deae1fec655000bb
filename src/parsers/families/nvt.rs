//! Network vulnerability tests.
//!
//! NVTs come either from the information endpoint (row id is the OID) or
//! from the dedicated NVT command (`<nvt oid="...">`, no id attribute).

use super::info::take_info_severity;
use crate::model::{
    parse_cvss_vector, parse_nvt_tags, EntityDetails, NvtCertRef, NvtDetails, NvtPreference,
    NvtXref, Qod, Solution,
};
use crate::parsers::fragment::{text, texts, Fragment};
use crate::raw;
use crate::utils::coerce;
use serde_json::Value;

const CVSS_VECTOR_TAG: &str = "cvss_base_vector";

pub(crate) fn extend(fragment: &mut Fragment) -> EntityDetails {
    let tags = fragment
        .take_text("tags")
        .map(|tags| parse_nvt_tags(&tags))
        .unwrap_or_default();

    let severities = fragment.take("severities").unwrap_or(Value::Null);
    let severity = take_info_severity(fragment).or_else(|| {
        coerce::parse_severity(text(&severities, "score").as_deref())
    });
    let cvss_vector = raw::as_list(raw::child(&severities, "severity"))
        .first()
        .and_then(|s| text(s, "value"))
        .or_else(|| tags.get(CVSS_VECTOR_TAG).cloned())
        .filter(|v| !v.is_empty());

    let (mut cves, certs, xrefs) = refs(&fragment.take_list("refs", "ref"));
    if let Some(legacy) = fragment.take_text("cve_id") {
        cves.extend(split_ids(&legacy));
    }

    let preferences = fragment.take("preferences").unwrap_or(Value::Null);
    let preference_list: Vec<NvtPreference> = raw::as_list(raw::child(&preferences, "preference"))
        .into_iter()
        .filter_map(preference)
        .collect();
    let timeout = fragment
        .take_int("timeout")
        .or_else(|| coerce::parse_int(text(&preferences, "timeout").as_deref()));
    let default_timeout = fragment
        .take_int("default_timeout")
        .or_else(|| coerce::parse_int(text(&preferences, "default_timeout").as_deref()));

    EntityDetails::Nvt(NvtDetails {
        oid: fragment.take_text("oid"),
        family: fragment.take_text("family"),
        severity,
        cvss_metrics: cvss_vector.as_deref().map(parse_cvss_vector),
        cvss_vector,
        qod: fragment.take("qod").map(|qod| Qod {
            value: coerce::parse_int(text(&qod, "value").as_deref()),
            qod_type: text(&qod, "type"),
        }),
        tags,
        solution: fragment.take("solution").map(|solution| Solution {
            solution_type: text(&solution, "type"),
            method: text(&solution, "method"),
            description: raw::text_of(&solution).filter(|t| !t.is_empty()),
        }),
        cves,
        certs,
        xrefs,
        preferences: preference_list,
        timeout,
        default_timeout,
    })
}

/// Split `<refs><ref type id/></refs>` into CVE ids, CERT advisories and
/// everything else.
fn refs(items: &[Value]) -> (Vec<String>, Vec<NvtCertRef>, Vec<NvtXref>) {
    let mut cves = Vec::new();
    let mut certs = Vec::new();
    let mut xrefs = Vec::new();
    for item in items {
        let (Some(ref_type), Some(id)) = (text(item, "type"), text(item, "id")) else {
            continue;
        };
        match ref_type.to_ascii_lowercase().as_str() {
            "cve" | "cve_id" => cves.push(id),
            "cert-bund" | "dfn-cert" => certs.push(NvtCertRef { id, ref_type }),
            _ => xrefs.push(NvtXref { id, ref_type }),
        }
    }
    (cves, certs, xrefs)
}

/// Legacy comma separated id lists; `NOCVE` marks an empty list.
fn split_ids(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty() && *id != "NOCVE")
        .map(str::to_string)
}

fn preference(value: &Value) -> Option<NvtPreference> {
    let name = text(value, "name")?;
    Some(NvtPreference {
        id: text(value, "id"),
        hr_name: text(value, "hr_name").unwrap_or_else(|| name.clone()),
        name,
        preference_type: text(value, "type"),
        value: text(value, "value"),
        default: text(value, "default"),
        alternatives: texts(raw::child(value, "alt")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CvssMetrics, SeverityBand};
    use serde_json::json;

    #[test]
    fn test_nvt_details() {
        let mut fragment = Fragment::of(&json!({
            "_oid": "1.3.6.1.4.1.25623.1.0.10330",
            "name": "Services",
            "family": "Service detection",
            "severities": {"_score": "7.5", "severity": {"_type": "cvss_base_v3", "value": "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:N/A:N"}},
            "qod": {"value": "80", "type": "remote_banner"},
            "refs": {"ref": [
                {"_type": "cve", "_id": "CVE-2020-1"},
                {"_type": "cert-bund", "_id": "CB-K20/001"},
                {"_type": "url", "_id": "https://example.com"},
            ]},
            "tags": "summary=Detects services|solution_type=VendorFix",
            "solution": {"_type": "VendorFix", "_method": "", "__text": "Update the service."},
            "preferences": {
                "timeout": "",
                "default_timeout": "320",
                "preference": {"id": "1", "name": "Test SSL", "type": "radio", "value": "All", "alt": ["None", "Known SSL ports"]},
            },
        }));
        let EntityDetails::Nvt(details) = extend(&mut fragment) else {
            panic!("expected nvt details");
        };
        assert_eq!(details.oid.as_deref(), Some("1.3.6.1.4.1.25623.1.0.10330"));
        assert_eq!(details.severity.map(|s| s.band()), Some(SeverityBand::Critical));
        assert!(matches!(details.cvss_metrics, Some(CvssMetrics::V3(_))));
        assert_eq!(details.qod.as_ref().and_then(|q| q.value), Some(80));
        assert_eq!(details.tag("solution_type"), Some("VendorFix"));
        assert_eq!(
            details.solution.as_ref().and_then(|s| s.description.as_deref()),
            Some("Update the service.")
        );
        assert_eq!(details.cves, vec!["CVE-2020-1"]);
        assert_eq!(details.certs[0].ref_type, "cert-bund");
        assert_eq!(details.xrefs[0].ref_type, "url");
        assert_eq!(details.preferences[0].alternatives.len(), 2);
        assert_eq!(details.timeout, None);
        assert_eq!(details.default_timeout, Some(320));
        assert_eq!(fragment.keys().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_legacy_nvt_fields() {
        let mut fragment = Fragment::of(&json!({
            "_oid": "1.2.3",
            "cvss_base": "5.0",
            "cve_id": "CVE-2019-1, CVE-2019-2",
            "tags": "cvss_base_vector=AV:N/AC:L/Au:N/C:N/I:N/A:P",
        }));
        let EntityDetails::Nvt(details) = extend(&mut fragment) else {
            panic!("expected nvt details");
        };
        assert_eq!(details.severity.map(|s| s.score()), Some(5.0));
        assert_eq!(details.cves.len(), 2);
        assert_eq!(details.cvss_metrics.and_then(|m| m.base_score()), Some(5.0));
        assert!(details.preferences.is_empty());
    }

    #[test]
    fn test_nocve_marker() {
        assert_eq!(split_ids("NOCVE").count(), 0);
    }
}
