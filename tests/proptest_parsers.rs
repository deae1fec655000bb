//! Property-based tests for the response parsers.
//!
//! Ensures the XML adapter and entity normalization don't panic on arbitrary
//! input, including random strings, XML-like fragments and arbitrary JSON.

use gmp_console::model::EntityType;
use gmp_console::parsers::{normalize, parse_aggregate_groups, parse_collection, CollectionOptions, GmpListAccessor};
use gmp_console::raw::xml::from_xml_str;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z0-9 .:-]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(
                (
                    prop_oneof![
                        Just("_id".to_string()),
                        Just("__text".to_string()),
                        Just("name".to_string()),
                        Just("owner".to_string()),
                        Just("severity".to_string()),
                        Just("cve".to_string()),
                        Just("family".to_string()),
                        "[a-z_]{1,8}",
                    ],
                    inner
                ),
                0..6
            )
            .prop_map(|pairs| Value::Object(pairs.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

proptest! {
    // Parser tests only assert no-panic; random input mostly yields Err.
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn from_xml_str_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = from_xml_str(&s);
    }

    #[test]
    fn xml_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"<[a-z]{1,20}( [a-z]{1,5}="[^"<]{0,10}")?>[^<]{0,200}</[a-z]{1,20}>"#).unwrap()
    ) {
        if let Ok(value) = from_xml_str(&s) {
            prop_assert!(value.is_object());
        }
    }

    #[test]
    fn normalize_doesnt_panic(raw in arb_json(), index in 0..EntityType::ALL.len()) {
        let _ = normalize(&raw, EntityType::ALL[index]);
    }

    #[test]
    fn collection_doesnt_panic(raw in arb_json()) {
        let _ = parse_collection(
            &json!({ "info": raw }),
            EntityType::Cve,
            &GmpListAccessor::new("info"),
            &CollectionOptions::default(),
        );
    }

    #[test]
    fn aggregate_groups_keep_count_order(counts in prop::collection::vec(0u32..1000, 0..20)) {
        let groups: Vec<Value> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| json!({"value": format!("g{i}"), "count": c.to_string()}))
            .collect();
        let parsed = parse_aggregate_groups(&json!({ "group": groups }), &[], &[]);
        prop_assert_eq!(parsed.len(), counts.len());
        let mut running = 0u64;
        for (group, count) in parsed.iter().zip(&counts) {
            running += u64::from(*count);
            prop_assert_eq!(group.count, u64::from(*count));
            prop_assert_eq!(group.cumulative_count, running);
        }
    }
}
