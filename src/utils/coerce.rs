//! Scalar coercions for protocol text.
//!
//! The protocol sends booleans, counts, severities and timestamps as text.
//! None of these functions fail: malformed input degrades to the documented
//! default (`false` or `None`).

use crate::model::Severity;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// `"1"` is true, anything else (including absence) is false.
#[must_use]
pub fn parse_yes_no(text: Option<&str>) -> bool {
    matches!(text.map(str::trim), Some("1"))
}

/// Parse an integer, tolerating surrounding whitespace and a float rendering.
#[must_use]
pub fn parse_int(text: Option<&str>) -> Option<i64> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<i64>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}

/// Parse a non-negative count; negative or malformed values are `None`.
#[must_use]
pub fn parse_count(text: Option<&str>) -> Option<usize> {
    parse_int(text).and_then(|n| usize::try_from(n).ok())
}

/// Parse a float.
#[must_use]
pub fn parse_float(text: Option<&str>) -> Option<f64> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Parse a severity sent as a plain score (`"7.5"`).
#[must_use]
pub fn parse_severity(text: Option<&str>) -> Option<Severity> {
    parse_float(text).map(Severity::new)
}

/// Parse a severity sent in tenths (`"75"` is `7.5`).
#[must_use]
pub fn parse_severity_tenths(text: Option<&str>) -> Option<Severity> {
    parse_float(text).map(Severity::from_tenths)
}

/// Parse a protocol timestamp.
///
/// Accepts RFC 3339 (`2019-10-10T11:09:23Z`, `2019-10-10T11:09:23+02:00`),
/// a naive `YYYY-MM-DDTHH:MM:SS` taken as UTC, and a bare date taken as
/// midnight UTC. Empty or unrecognized text is `None`.
#[must_use]
pub fn parse_date(text: Option<&str>) -> Option<DateTime<Utc>> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
