//! Scanners.

use crate::model::{CertificateInfo, EntityDetails, ScannerDetails, ScannerType};
use crate::parsers::fragment::{text, Fragment};
use crate::utils::coerce;
use serde_json::Value;

pub(crate) fn extend(fragment: &mut Fragment) -> EntityDetails {
    EntityDetails::Scanner(ScannerDetails {
        scanner_type: fragment.take_int("type").map(ScannerType::from_code),
        host: fragment.take_text("host"),
        port: fragment
            .take_int("port")
            .and_then(|port| u16::try_from(port).ok()),
        credential: fragment.take_ref("credential"),
        ca_pub: fragment.take_text("ca_pub"),
        ca_pub_info: fragment.take("ca_pub_info").as_ref().map(certificate_info),
        tasks: fragment.take_refs("tasks", "task"),
        configs: fragment.take_refs("configs", "config"),
    })
}

fn certificate_info(value: &Value) -> CertificateInfo {
    CertificateInfo {
        time_status: text(value, "time_status"),
        activation_time: coerce::parse_date(text(value, "activation_time").as_deref()),
        expiration_time: coerce::parse_date(text(value, "expiration_time").as_deref()),
        issuer: text(value, "issuer"),
        md5_fingerprint: text(value, "md5_fingerprint"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    #[test]
    fn test_scanner_details() {
        let mut fragment = Fragment::of(&json!({
            "_id": "s1",
            "type": "2",
            "host": "/run/ospd/ospd-openvas.sock",
            "port": "0",
            "credential": {"_id": "", "name": "", "trash": "0"},
            "ca_pub_info": {
                "time_status": "valid",
                "activation_time": "2020-01-01T00:00:00Z",
                "expiration_time": "2030-01-01T00:00:00Z",
                "issuer": "CN=Greenbone",
            },
            "configs": {"config": {"_id": "c1", "name": "Full and fast"}},
        }));
        let EntityDetails::Scanner(details) = extend(&mut fragment) else {
            panic!("expected scanner details");
        };
        assert_eq!(details.scanner_type, Some(ScannerType::OpenVas));
        assert_eq!(details.port, Some(0));
        assert_eq!(details.credential, None);
        let info = details.ca_pub_info.unwrap();
        assert_eq!(info.time_status.as_deref(), Some("valid"));
        assert_eq!(info.expiration_time.map(|t| t.year()), Some(2030));
        assert_eq!(details.configs.len(), 1);
        assert!(details.tasks.is_empty());
    }

    #[test]
    fn test_out_of_range_port_is_dropped() {
        let mut fragment = Fragment::of(&json!({"_id": "s1", "port": "70000"}));
        let EntityDetails::Scanner(details) = extend(&mut fragment) else {
            panic!("expected scanner details");
        };
        assert_eq!(details.port, None);
    }
}
