//! Normalized domain model.
//!
//! Every protocol entity is normalized into an [`Entity`]: the attributes all
//! entities share, typed family-specific [`EntityDetails`], and whatever
//! child values no normalization step consumed. Lists of entities become a
//! [`Collection`], grouped queries an [`Aggregate`].
//!
//! All types here are plain values; once produced they are never mutated by
//! this crate and can be shared freely between threads.

mod advisory;
mod aggregate;
mod collection;
mod cvss;
mod entity;
mod filter;
mod host;
mod info;
mod nvt;
mod report_format;
mod scan_config;
mod scanner;
mod severity;

pub use advisory::*;
pub use aggregate::*;
pub use collection::*;
pub use cvss::*;
pub use entity::*;
pub use filter::*;
pub use host::*;
pub use info::*;
pub use nvt::*;
pub use report_format::*;
pub use scan_config::*;
pub use scanner::*;
pub use severity::*;
