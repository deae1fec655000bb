//! Shared utilities.

pub mod coerce;

pub use coerce::{
    parse_count, parse_date, parse_float, parse_int, parse_severity, parse_severity_tenths,
    parse_yes_no,
};
