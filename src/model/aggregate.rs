//! Grouped aggregate statistics.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Statistics of one data column within a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub sum: f64,
    /// Running sum over this and all preceding groups
    pub cumulative_sum: f64,
}

/// One group of an aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateGroup {
    pub value: String,
    pub count: u64,
    /// Running count over this and all preceding groups
    pub cumulative_count: u64,
    /// Statistics per requested data column
    pub stats: IndexMap<String, AggregateStats>,
    /// Text per requested text column
    pub text: IndexMap<String, String>,
}

impl AggregateGroup {
    /// Create a group without statistics.
    #[must_use]
    pub fn new(value: impl Into<String>, count: u64) -> Self {
        Self {
            value: value.into(),
            count,
            cumulative_count: 0,
            stats: IndexMap::new(),
            text: IndexMap::new(),
        }
    }
}

/// Result of a grouped query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub group_column: Option<String>,
    pub data_columns: Vec<String>,
    pub text_columns: Vec<String>,
    pub groups: Vec<AggregateGroup>,
}

impl Aggregate {
    /// Sum of all group counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.groups
            .iter()
            .fold(0_u64, |total, g| total.saturating_add(g.count))
    }

    #[must_use]
    pub fn group(&self, value: &str) -> Option<&AggregateGroup> {
        self.groups.iter().find(|g| g.value == value)
    }
}
