//! Shared helpers for integration tests.

#![allow(dead_code)]

use gmp_console::raw::xml::from_xml_str;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

/// Load an XML fixture and return the body of its response element.
pub fn response(name: &str, root: &str) -> Value {
    init_tracing();
    let xml = std::fs::read_to_string(fixture_path(name)).expect("fixture should exist");
    let mut raw = from_xml_str(&xml).expect("fixture should be well-formed");
    raw[root].take()
}

/// Route `tracing` output to the test harness; `RUST_LOG` selects levels.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
