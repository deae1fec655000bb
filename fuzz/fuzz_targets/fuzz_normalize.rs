#![no_main]
use gmp_console::model::EntityType;
use gmp_console::parsers::normalize;
use libfuzzer_sys::fuzz_target;

/// Fuzz entity normalization with arbitrary JSON fragments.
///
/// The first byte picks the entity type.
fuzz_target!(|data: &[u8]| {
    let Some((selector, rest)) = data.split_first() else {
        return;
    };
    let entity_type = EntityType::ALL[usize::from(*selector) % EntityType::ALL.len()];
    if let Ok(raw) = serde_json::from_slice::<serde_json::Value>(rest) {
        let _ = normalize(&raw, entity_type);
    }
});
