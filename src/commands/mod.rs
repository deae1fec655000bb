//! Request building.
//!
//! Requests are flat string maps handed to the transport as-is. A request is
//! described by an [`Operation`] on an [`EntityType`](crate::model::EntityType);
//! [`CommandBuilder`] turns the pair into parameters using static
//! [`CommandDescriptor`] tables.
//!
//! ```
//! use gmp_console::commands::{CommandBuilder, FlatParams, Operation};
//! use gmp_console::model::EntityType;
//!
//! let params = CommandBuilder::new()
//!     .build(&Operation::get_one("CVE-2021-44228"), EntityType::Cve, &FlatParams::new())
//!     .unwrap();
//! assert_eq!(params["cmd"], "get_info");
//! assert_eq!(params["info_type"], "cve");
//! ```

mod builder;
mod descriptor;
mod request;

pub use builder::CommandBuilder;
pub use descriptor::{
    aggregate_type, command_descriptor, CommandDescriptor, StaticParams, AGGREGATE_COMMAND,
};
pub use request::{AggregateRequest, AggregateSort, Operation, OperationKind, SortOrder};

use indexmap::IndexMap;

/// Insertion-ordered request parameters.
pub type FlatParams = IndexMap<String, String>;
