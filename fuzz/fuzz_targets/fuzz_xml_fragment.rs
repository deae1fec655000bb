#![no_main]
use gmp_console::model::EntityType;
use gmp_console::parsers::{parse_collection, CollectionOptions, GmpListAccessor};
use gmp_console::raw::xml::from_xml_str;
use libfuzzer_sys::fuzz_target;

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the XML adapter and collection parsing.
///
/// Wraps input in a configs response envelope to exercise row parsing.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = from_xml_str(s);

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(r#"<get_configs_response status="200">{s}</get_configs_response>"#);
            if let Ok(raw) = from_xml_str(&wrapped) {
                let _ = parse_collection(
                    &raw["get_configs_response"],
                    EntityType::ScanConfig,
                    &GmpListAccessor::for_entity_type(EntityType::ScanConfig),
                    &CollectionOptions::default(),
                );
            }
        }
    }
});
