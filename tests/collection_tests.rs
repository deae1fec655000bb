//! Integration tests for collection and get-one parsing.
//!
//! Responses are loaded from XML fixtures through the XML adapter, the way a
//! transport delivering XML text would hand them over.

mod common;

use common::response;
use gmp_console::commands::{CommandBuilder, FlatParams, Operation};
use gmp_console::config::ParsingConfig;
use gmp_console::model::{EntityType, SeverityBand, Trend, TrustValue, UsageType};
use gmp_console::parsers::{
    parse_collection, parse_entity, CollectionOptions, GmpListAccessor,
};

fn configs() -> gmp_console::model::Collection {
    parse_collection(
        &response("get_configs.xml", "get_configs_response"),
        EntityType::ScanConfig,
        &GmpListAccessor::for_entity_type(EntityType::ScanConfig),
        &CollectionOptions::default(),
    )
    .expect("configs should parse")
}

mod scan_configs {
    use super::*;

    #[test]
    fn test_rows_keep_server_order() {
        let collection = configs();
        let ids: Vec<&str> = collection.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "daba56c8-73ec-11df-a475-002264764cea",
                "085569ce-73ed-11df-83c3-002264764cea"
            ]
        );
    }

    #[test]
    fn test_counts_and_filter() {
        let collection = configs();
        assert_eq!(collection.counts.first, 1);
        assert_eq!(collection.counts.last(), 2);
        assert_eq!(collection.counts.rows, 10);
        assert_eq!(collection.counts.all, 12);
        assert_eq!(collection.counts.filtered, 2);
        assert!(!collection.counts.has_next());
        assert!(collection.cursors.is_empty());

        let filter = collection.filter.expect("filter is echoed");
        assert_eq!(filter.rows(), Some(10));
        assert_eq!(filter.sort_by(), Some("name"));
        assert_eq!(filter.value("min_qod"), Some("70"));
    }

    #[test]
    fn test_common_attributes() {
        let collection = configs();
        let full = &collection.entities[0];
        assert_eq!(full.entity_type, EntityType::ScanConfig);
        assert_eq!(full.name.as_deref(), Some("Full and fast"));
        assert_eq!(full.owner, None);
        assert!(!full.writable);
        assert!(full.in_use);
        assert!(full.permissions.may("get_configs"));
        assert!(full.creation_time.is_some());

        let empty = &collection.entities[1];
        assert_eq!(empty.owner.as_deref(), Some("admin"));
        assert_eq!(empty.comment, None);
        assert_eq!(empty.user_tags.len(), 1);
        assert_eq!(empty.user_tags[0].value.as_deref(), Some("blue"));
        assert!(empty.permissions.is_empty());
    }

    #[test]
    fn test_scan_config_details() {
        let collection = configs();
        let details = collection.entities[0]
            .as_scan_config()
            .expect("scan config details");
        assert_eq!(details.usage_type, Some(UsageType::Scan));
        assert!(details.predefined);
        assert_eq!(details.family_count, Some(62));
        assert_eq!(details.nvt_count, Some(102_431));
        assert_eq!(details.nvt_trend, Some(Trend::Dynamic));
        assert_eq!(details.families.len(), 2);
        assert_eq!(
            details.family("Web application abuses").map(|f| f.trend),
            Some(Trend::Static)
        );
        assert_eq!(details.scanner_preferences.len(), 1);
        assert_eq!(details.scanner_preferences[0].name, "max_checks");
        assert_eq!(details.nvt_preferences.len(), 1);
        assert_eq!(
            details.nvt_preferences[0].nvt.as_ref().and_then(|n| n.name.as_deref()),
            Some("Ping Host")
        );
        assert_eq!(details.tasks[0].name.as_deref(), Some("Weekly DMZ"));
    }

    #[test]
    fn test_everything_is_consumed() {
        let collection = configs();
        for entity in &collection {
            assert!(entity.properties.is_empty(), "{:?}", entity.properties);
        }
    }

    #[test]
    fn test_strict_counts_accept_valid_response() {
        let options = CollectionOptions::default().with_parsing(ParsingConfig {
            strict_counts: true,
            ..ParsingConfig::default()
        });
        let collection = parse_collection(
            &response("get_configs.xml", "get_configs_response"),
            EntityType::ScanConfig,
            &GmpListAccessor::for_entity_type(EntityType::ScanConfig),
            &options,
        );
        assert!(collection.is_ok());
    }
}

mod report_formats {
    use super::*;

    #[test]
    fn test_report_formats() {
        let collection = parse_collection(
            &response("get_report_formats.xml", "get_report_formats_response"),
            EntityType::ReportFormat,
            &GmpListAccessor::for_entity_type(EntityType::ReportFormat),
            &CollectionOptions::default(),
        )
        .unwrap();

        // rows="-1" means unlimited and is widened to the page length
        assert_eq!(collection.counts.rows, 2);

        let pdf = collection.entities[0].as_report_format().unwrap();
        assert!(pdf.is_usable());
        assert!(pdf.trust.time.is_some());
        assert!(pdf.alerts.is_empty());
        assert!(pdf.params.is_empty());
        assert_eq!(collection.entities[0].property("file"), None);

        let svg = collection.entities[1].as_report_format().unwrap();
        assert_eq!(svg.trust.value, Some(TrustValue::Unknown));
        assert_eq!(svg.trust.time, None);
        assert!(!svg.is_usable());
        assert_eq!(svg.params.len(), 2);
        assert_eq!(svg.params[0].options, vec!["circo", "dot", "twopi"]);
        assert_eq!(svg.params[1].param_type.as_deref(), Some("integer"));
        assert_eq!(svg.params[1].max, Some(20));
        assert_eq!(svg.alerts[0].id, "1e3b");
    }
}

mod hosts {
    use super::*;

    #[test]
    fn test_host_assets() {
        let collection = parse_collection(
            &response("get_assets_host.xml", "get_assets_response"),
            EntityType::Host,
            &GmpListAccessor::for_entity_type(EntityType::Host),
            &CollectionOptions::default(),
        )
        .unwrap();

        let filter = collection.filter.as_ref().unwrap();
        assert_eq!(filter.id(), Some("4a2f1a3e-9b1c-4a44-8b2a-7e6b0c5d1e2f"));
        assert!(filter.sort_reverse());
        assert_eq!(collection.counts.all, 40);

        let host = &collection.entities[0];
        let details = host.as_host().unwrap();
        assert_eq!(details.severity.map(|s| s.band()), Some(SeverityBand::Critical));
        assert_eq!(details.ip.as_deref(), Some("192.168.10.12"));
        assert_eq!(details.hostname.as_deref(), Some("db01.example.org"));
        assert_eq!(details.best_os_txt.as_deref(), Some("Debian GNU/Linux 12"));
        assert_eq!(
            details.identifier("OS").and_then(|i| i.os.as_ref()).map(|os| os.id.as_str()),
            Some("8d1c")
        );
        assert_eq!(details.detail_value("traceroute"), Some("192.168.10.1,192.168.10.12"));
        assert_eq!(host.property("type"), None);
    }
}

mod get_one {
    use super::*;

    #[test]
    fn test_request_and_response_agree_on_id() {
        let id = "daba56c8-73ec-11df-a475-002264764cea";
        let request = CommandBuilder::new()
            .build(&Operation::get_one(id), EntityType::ScanConfig, &FlatParams::new())
            .unwrap();
        assert_eq!(request["config_id"], id);

        let entity = parse_entity(
            &response("get_configs.xml", "get_configs_response"),
            EntityType::ScanConfig,
            &GmpListAccessor::for_entity_type(EntityType::ScanConfig),
        )
        .unwrap();
        assert_eq!(entity.id, id);
    }

    #[test]
    fn test_wrong_element_is_malformed() {
        let err = parse_entity(
            &response("get_configs.xml", "get_configs_response"),
            EntityType::Task,
            &GmpListAccessor::for_entity_type(EntityType::Task),
        )
        .unwrap_err();
        assert!(err.is_malformed_input());
    }
}
