//! **Entity command and model-parsing layer for a vulnerability-management console.**
//!
//! `gmp-console` sits between a console's views and the transport speaking the
//! scanner's XML-derived management protocol. It builds flat request
//! parameter maps and normalizes the nested responses the transport hands
//! back into typed entities, paginated collections and grouped aggregates.
//! It performs no I/O of its own.
//!
//! ## Core Concepts & Modules
//!
//! - **[`raw`]**: the raw fragment convention (attributes as `_name`, inline
//!   text as `__text`) and an XML adapter producing it.
//! - **[`model`]**: [`Entity`] with typed per-family details, [`Collection`],
//!   [`Aggregate`], [`Filter`] and the severity and CVSS types.
//! - **[`parsers`]**: one normalization function for every entity type,
//!   info-variant resolution, collection and aggregate parsing.
//! - **[`commands`]**: [`CommandBuilder`] turning an [`Operation`] on an
//!   [`EntityType`] into request parameters.
//! - **[`config`]**: configuration of the builder and parsers, loadable from
//!   `.gmp-console.yaml`.
//!
//! ## Getting Started
//!
//! ```
//! use gmp_console::commands::{CommandBuilder, FlatParams, Operation};
//! use gmp_console::model::{EntityType, Filter};
//! use gmp_console::parsers::{parse_collection, CollectionOptions, GmpListAccessor};
//! use gmp_console::raw::xml::from_xml_str;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = CommandBuilder::new().build(
//!         &Operation::get_list(Some(Filter::parse("sort=name rows=10"))),
//!         EntityType::Target,
//!         &FlatParams::new(),
//!     )?;
//!     assert_eq!(request["cmd"], "get_targets");
//!
//!     // ... the transport sends `request` and receives:
//!     let raw = from_xml_str(
//!         r#"<get_targets_response status="200">
//!              <target id="t1"><name>DMZ</name></target>
//!              <targets start="1" max="10"/>
//!              <target_count>1<filtered>1</filtered><page>1</page></target_count>
//!            </get_targets_response>"#,
//!     )?;
//!     let targets = parse_collection(
//!         &raw["get_targets_response"],
//!         EntityType::Target,
//!         &GmpListAccessor::for_entity_type(EntityType::Target),
//!         &CollectionOptions::default(),
//!     )?;
//!     assert_eq!(targets.entities[0].name.as_deref(), Some("DMZ"));
//!     assert_eq!(targets.counts.filtered, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Information Entities
//!
//! The information endpoint serves CVEs, CPEs, NVTs, OVAL definitions and
//! CERT advisories under a single element name. Rows are told apart by their
//! discriminator child; [`parsers::InfoVariant`] selects one kind:
//!
//! ```
//! use gmp_console::parsers::{parse_info_entity, GmpListAccessor, InfoVariant};
//! use gmp_console::raw::xml::from_xml_str;
//!
//! let raw = from_xml_str(
//!     r#"<get_info_response status="200">
//!          <info id="CVE-2021-44228"><name>CVE-2021-44228</name>
//!            <cve><severity>10.0</severity></cve>
//!          </info>
//!          <info start="1" max="1"/>
//!        </get_info_response>"#,
//! )
//! .unwrap();
//! let cve = parse_info_entity(&raw["get_info_response"], InfoVariant::Cve, &GmpListAccessor::new("info")).unwrap();
//! assert_eq!(cve.id, "CVE-2021-44228");
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (dropped info rows at trace level,
//! collection summaries at debug level, clamped counts at warn level) and
//! installs no subscriber.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Counts arrive as i64 text and are bounded in practice
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    // Variable names like `min`/`max` or `raw`/`row` are clear in context
    clippy::similar_names
)]

pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod parsers;
pub mod raw;
pub mod utils;

// Re-export main types for convenience
pub use commands::{AggregateRequest, CommandBuilder, FlatParams, Operation};
pub use config::{CommandConfig, ConfigPreset, ConsoleConfig, ParsingConfig};
pub use config::{ConfigError, Validatable};
pub use error::{ConsoleError, ErrorContext, Result};
pub use model::{Aggregate, Collection, CollectionCounts, Entity, EntityType, Filter, Severity};
pub use parsers::{
    normalize, parse_aggregate, parse_collection, parse_entity, parse_info_entity,
    CollectionOptions, InfoVariant, ListAccessor,
};
