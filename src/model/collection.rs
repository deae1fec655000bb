//! Paginated collections of entities.

use super::{Entity, Filter};
use serde::{Deserialize, Serialize};

/// Counts as read from a response, before normalization.
///
/// `start` is the 1-based first row, `rows` the requested page size (`-1`
/// for unlimited), `length` the number of rows on this page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawCounts {
    pub start: Option<i64>,
    pub rows: Option<i64>,
    pub length: Option<i64>,
    pub all: Option<i64>,
    pub filtered: Option<i64>,
}

impl RawCounts {
    /// Describe every way these counts violate the collection invariants.
    #[must_use]
    pub fn violations(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (name, value) in [
            ("start", self.start),
            ("length", self.length),
            ("all", self.all),
            ("filtered", self.filtered),
        ] {
            if let Some(v) = value {
                if v < 0 {
                    problems.push(format!("{name} is negative ({v})"));
                }
            }
        }
        if let (Some(length), Some(rows)) = (self.length, self.rows) {
            if rows > 0 && length > rows {
                problems.push(format!("length {length} exceeds rows {rows}"));
            }
        }
        problems
    }
}

/// Normalized counts of a collection page.
///
/// Invariants: `length <= rows`; `first == offset + 1` when `length > 0`,
/// otherwise `first == 0`. `filtered <= all` is not guaranteed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionCounts {
    /// 1-based index of the first row on this page, 0 for an empty page
    pub first: usize,
    /// Page size cap
    pub rows: usize,
    /// Rows on this page
    pub length: usize,
    /// All entities of this type, ignoring the filter
    pub all: usize,
    /// Entities matching the filter
    pub filtered: usize,
    /// 0-based offset of this page
    pub offset: usize,
}

fn non_negative(value: Option<i64>) -> usize {
    value
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or_default()
}

impl CollectionCounts {
    /// Normalize raw counts: absent or negative values become 0, an
    /// unlimited or undersized page size is widened to the page length.
    #[must_use]
    pub fn from_raw(raw: &RawCounts) -> Self {
        let length = non_negative(raw.length);
        let rows = non_negative(raw.rows).max(length);
        let offset = non_negative(raw.start).saturating_sub(1);
        Self {
            first: if length > 0 { offset + 1 } else { 0 },
            rows,
            length,
            all: non_negative(raw.all),
            filtered: non_negative(raw.filtered),
            offset,
        }
    }

    /// 1-based index of the last row on this page, 0 for an empty page.
    #[must_use]
    pub const fn last(&self) -> usize {
        if self.length > 0 {
            self.offset.saturating_add(self.length)
        } else {
            0
        }
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.offset.saturating_add(self.length) < self.filtered
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.offset > 0
    }

    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.offset == 0
    }

    #[must_use]
    pub const fn is_last(&self) -> bool {
        !self.has_next()
    }
}

/// Opaque cursors of cursor-paginated sources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursors {
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    pub last_page_cursor: Option<String>,
    pub has_next_page: Option<bool>,
    pub has_previous_page: Option<bool>,
}

impl PageCursors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start_cursor.is_none()
            && self.end_cursor.is_none()
            && self.last_page_cursor.is_none()
            && self.has_next_page.is_none()
            && self.has_previous_page.is_none()
    }
}

/// Ordered page of entities in server order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub entities: Vec<Entity>,
    pub counts: CollectionCounts,
    pub cursors: PageCursors,
    /// Filter the server applied, when echoed back
    pub filter: Option<Filter>,
}

impl Collection {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    /// Find an entity by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }
}

impl IntoIterator for Collection {
    type Item = Entity;
    type IntoIter = std::vec::IntoIter<Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_from_raw() {
        let counts = CollectionCounts::from_raw(&RawCounts {
            start: Some(11),
            rows: Some(10),
            length: Some(5),
            all: Some(100),
            filtered: Some(15),
        });
        assert_eq!(counts.offset, 10);
        assert_eq!(counts.first, 11);
        assert_eq!(counts.last(), 15);
        assert!(counts.has_previous());
        assert!(!counts.has_next());
        assert!(counts.is_last());
    }

    #[test]
    fn test_missing_counts_default_to_zero() {
        let counts = CollectionCounts::from_raw(&RawCounts::default());
        assert_eq!(counts, CollectionCounts::default());
        assert_eq!(counts.last(), 0);
        assert!(counts.is_first());
    }

    #[test]
    fn test_empty_page_has_zero_first() {
        let counts = CollectionCounts::from_raw(&RawCounts {
            start: Some(1),
            rows: Some(10),
            length: Some(0),
            ..RawCounts::default()
        });
        assert_eq!(counts.first, 0);
        assert_eq!(counts.rows, 10);
    }

    #[test]
    fn test_unlimited_rows_widened_to_length() {
        let raw = RawCounts {
            start: Some(1),
            rows: Some(-1),
            length: Some(42),
            all: Some(42),
            filtered: Some(42),
        };
        let counts = CollectionCounts::from_raw(&raw);
        assert_eq!(counts.rows, 42);
        assert!(raw.violations().is_empty());
    }

    #[test]
    fn test_violations() {
        let raw = RawCounts {
            start: Some(-3),
            rows: Some(5),
            length: Some(7),
            ..RawCounts::default()
        };
        let problems = raw.violations();
        assert_eq!(problems.len(), 2);
        assert!(problems[1].contains("exceeds rows"));
    }
}
