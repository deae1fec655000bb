//! Performance benchmarks for collection parsing.
//!
//! Run with: cargo bench --bench parse_collection

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gmp_console::model::EntityType;
use gmp_console::parsers::{parse_collection, CollectionOptions, GmpListAccessor, InfoVariant};
use gmp_console::raw::xml::from_xml_str;
use serde_json::Value;
use std::hint::black_box;

/// Generate a scan configs response with `count` rows.
fn generate_configs(count: usize) -> String {
    let mut xml = String::from(r#"<get_configs_response status="200" status_text="OK">"#);
    for i in 0..count {
        xml.push_str(&format!(
            r#"<config id="cfg-{i}"><owner><name>admin</name></owner><name>Config {i}</name>
<comment>generated</comment><creation_time>2024-01-0{d}T10:00:00Z</creation_time>
<writable>1</writable><in_use>{u}</in_use><family_count>{f}<growing>1</growing></family_count>
<nvt_count>{n}<growing>0</growing></nvt_count><usage_type>scan</usage_type>
<families><family><name>Port scanners</name><nvt_count>12</nvt_count><max_nvt_count>12</max_nvt_count><growing>1</growing></family></families>
</config>"#,
            d = i % 9 + 1,
            u = i % 2,
            f = i % 60,
            n = i * 10,
        ));
    }
    xml.push_str(&format!(
        r#"<configs start="1" max="{count}"/><config_count>{count}<filtered>{count}</filtered><page>{count}</page></config_count></get_configs_response>"#
    ));
    xml
}

/// Generate an info response mixing CVE and CPE rows.
fn generate_info(count: usize) -> String {
    let mut xml = String::from(r#"<get_info_response status="200" status_text="OK">"#);
    for i in 0..count {
        if i % 2 == 0 {
            xml.push_str(&format!(
                r#"<info id="CVE-2024-{i:05}"><name>CVE-2024-{i:05}</name><cve><severity>{s}.5</severity>
<cvss_vector>AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H</cvss_vector><description>generated</description></cve></info>"#,
                s = i % 10,
            ));
        } else {
            xml.push_str(&format!(
                r#"<info id="cpe:/a:vendor:product:{i}"><name>cpe:/a:vendor:product:{i}</name><cpe><title>Product {i}</title><cve_refs>3</cve_refs></cpe></info>"#
            ));
        }
    }
    xml.push_str(&format!(
        r#"<info start="1" max="{count}"/><info_count>{count}<filtered>{count}</filtered><page>{count}</page></info_count></get_info_response>"#
    ));
    xml
}

fn load(xml: &str, root: &str) -> Value {
    let mut raw = from_xml_str(xml).expect("generated response is valid XML");
    raw[root].take()
}

fn bench_configs(c: &mut Criterion) {
    let mut group = c.benchmark_group("configs");
    for size in [100, 1_000, 5_000] {
        let xml = generate_configs(size);
        group.bench_with_input(BenchmarkId::new("from_xml_str", size), &xml, |b, xml| {
            b.iter(|| from_xml_str(black_box(xml)));
        });

        let raw = load(&xml, "get_configs_response");
        let accessor = GmpListAccessor::for_entity_type(EntityType::ScanConfig);
        let options = CollectionOptions::default();
        group.bench_with_input(BenchmarkId::new("parse_collection", size), &raw, |b, raw| {
            b.iter(|| parse_collection(black_box(raw), EntityType::ScanConfig, &accessor, &options));
        });
    }
    group.finish();
}

fn bench_info_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("info");
    for size in [100, 1_000, 5_000] {
        let raw = load(&generate_info(size), "get_info_response");
        let accessor = GmpListAccessor::new("info");
        let options = CollectionOptions::for_variant(InfoVariant::Cve);
        group.bench_with_input(BenchmarkId::new("cve_rows", size), &raw, |b, raw| {
            b.iter(|| parse_collection(black_box(raw), EntityType::Cve, &accessor, &options));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_configs, bench_info_variants);
criterion_main!(benches);
