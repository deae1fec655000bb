//! Host assets.
//!
//! Hosts arrive as `<asset>` elements. Identifiers sit at the top level, the
//! severity and the collected details inside a nested `<host>` element.

use crate::model::{AssetSource, EntityDetails, HostDetail, HostDetails, HostIdentifier, OsRef};
use crate::parsers::fragment::{text, Fragment};
use crate::raw;
use crate::utils::coerce;
use indexmap::IndexMap;
use serde_json::Value;

pub(crate) fn extend(fragment: &mut Fragment) -> EntityDetails {
    let identifiers: Vec<HostIdentifier> = fragment
        .take_list("identifiers", "identifier")
        .iter()
        .filter_map(identifier)
        .collect();

    let host = fragment.take("host").unwrap_or(Value::Null);
    let severity = raw::get_path(&host, &["severity", "value"])
        .or_else(|| raw::child(&host, "severity"))
        .and_then(raw::text_of);

    let mut details = IndexMap::new();
    for detail in raw::as_list(raw::child(&host, "detail")) {
        if let Some(name) = text(detail, "name") {
            details.insert(
                name,
                HostDetail {
                    value: text(detail, "value"),
                    source: raw::child(detail, "source").map(source),
                },
            );
        }
    }

    let identifier_value = |name: &str| {
        identifiers
            .iter()
            .find(|i| i.name == name)
            .and_then(|i| i.value.clone())
    };
    let hostname = identifier_value("hostname");
    let ip = identifier_value("ip");
    let detail_value = |name: &str| details.get(name).and_then(|d: &HostDetail| d.value.clone());
    let best_os_cpe = detail_value("best_os_cpe");
    let best_os_txt = detail_value("best_os_txt");

    EntityDetails::Host(HostDetails {
        severity: coerce::parse_severity(severity.as_deref()),
        identifiers,
        details,
        hostname,
        ip,
        best_os_cpe,
        best_os_txt,
    })
}

fn identifier(value: &Value) -> Option<HostIdentifier> {
    Some(HostIdentifier {
        id: text(value, "id"),
        name: text(value, "name")?,
        value: text(value, "value"),
        creation_time: coerce::parse_date(text(value, "creation_time").as_deref()),
        modification_time: coerce::parse_date(text(value, "modification_time").as_deref()),
        source: raw::child(value, "source").map(source),
        os: raw::child(value, "os").and_then(|os| {
            Some(OsRef {
                id: text(os, "id")?,
                title: text(os, "title"),
            })
        }),
    })
}

fn source(value: &Value) -> AssetSource {
    AssetSource {
        id: text(value, "id"),
        source_type: text(value, "type"),
        data: text(value, "data"),
        description: text(value, "description"),
        deleted: coerce::parse_yes_no(text(value, "deleted").as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SeverityBand;
    use serde_json::json;

    #[test]
    fn test_host_details() {
        let mut fragment = Fragment::of(&json!({
            "_id": "h1",
            "name": "192.168.0.10",
            "identifiers": {"identifier": [
                {"_id": "i1", "name": "ip", "value": "192.168.0.10",
                 "source": {"_id": "r1", "type": "Report Host", "deleted": "0"}},
                {"_id": "i2", "name": "hostname", "value": "db.example.com"},
                {"_id": "i3", "name": "OS", "value": "cpe:/o:debian:debian_linux:10",
                 "os": {"_id": "o1", "title": "Debian 10"}},
            ]},
            "type": "host",
            "host": {
                "severity": {"value": "7.5"},
                "detail": [
                    {"name": "best_os_cpe", "value": "cpe:/o:debian:debian_linux:10"},
                    {"name": "best_os_txt", "value": "Debian GNU/Linux 10",
                     "source": {"_id": "r1", "type": "Report", "description": "OS detection"}},
                ],
            },
        }));
        let EntityDetails::Host(details) = extend(&mut fragment) else {
            panic!("expected host details");
        };
        assert_eq!(details.severity.map(|s| s.band()), Some(SeverityBand::Critical));
        assert_eq!(details.hostname.as_deref(), Some("db.example.com"));
        assert_eq!(details.ip.as_deref(), Some("192.168.0.10"));
        assert_eq!(details.best_os_cpe.as_deref(), Some("cpe:/o:debian:debian_linux:10"));
        assert_eq!(details.best_os_txt.as_deref(), Some("Debian GNU/Linux 10"));
        assert_eq!(
            details.identifier("OS").and_then(|i| i.os.as_ref()).map(|os| os.id.as_str()),
            Some("o1")
        );
        assert_eq!(
            details.identifiers[0].source.as_ref().and_then(|s| s.source_type.as_deref()),
            Some("Report Host")
        );
        assert!(!fragment.contains("host"));
    }

    #[test]
    fn test_missing_host_element() {
        let mut fragment = Fragment::of(&json!({"_id": "h1"}));
        let EntityDetails::Host(details) = extend(&mut fragment) else {
            panic!("expected host details");
        };
        assert!(details.identifiers.is_empty());
        assert!(details.details.is_empty());
        assert_eq!(details.severity, None);
    }
}
