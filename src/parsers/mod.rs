//! Response parsers.
//!
//! Turns raw protocol fragments (see [`crate::raw`]) into the typed model:
//!
//! - [`normalize`] turns one fragment into an [`Entity`](crate::model::Entity),
//! - [`parse_collection`] turns a list response into a
//!   [`Collection`](crate::model::Collection) using a [`ListAccessor`],
//! - [`parse_aggregate`] turns a grouped-query response into an
//!   [`Aggregate`](crate::model::Aggregate).
//!
//! ## Usage
//!
//! ```no_run
//! use gmp_console::model::EntityType;
//! use gmp_console::parsers::{parse_collection, CollectionOptions, GmpListAccessor};
//! use gmp_console::raw::xml::from_xml_str;
//!
//! let xml = std::fs::read_to_string("get_configs.xml").unwrap();
//! let raw = from_xml_str(&xml).unwrap();
//! let configs = parse_collection(
//!     &raw["get_configs_response"],
//!     EntityType::ScanConfig,
//!     &GmpListAccessor::for_entity_type(EntityType::ScanConfig),
//!     &CollectionOptions::default(),
//! )
//! .unwrap();
//! for config in &configs {
//!     println!("{} {:?}", config.id, config.name);
//! }
//! ```

mod aggregate;
mod collection;
mod entity;
mod families;
mod fragment;
mod variant;

pub use aggregate::{parse_aggregate, parse_aggregate_groups};
pub use collection::{
    parse_collection, parse_entity, parse_info_entity, response_element, CollectionOptions,
    CursorListAccessor, FnListAccessor, GmpListAccessor, ListAccessor,
};
pub use entity::{normalize, normalize_with};
pub use families::{family_descriptor, FamilyDescriptor};
pub use fragment::Fragment;
pub use variant::{is_counts_fragment, resolve_info_variant, InfoVariant};
