//! Operations a request can be built for.

use crate::model::Filter;
use serde::{Deserialize, Serialize};

/// What a request asks the server for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "operation")]
pub enum Operation {
    /// Fetch one entity by id
    GetOne { id: String },
    /// Fetch a page of entities
    GetList { filter: Option<Filter> },
    /// Fetch grouped statistics
    GetAggregate(AggregateRequest),
}

impl Operation {
    #[must_use]
    pub fn get_one(id: impl Into<String>) -> Self {
        Self::GetOne { id: id.into() }
    }

    #[must_use]
    pub const fn get_list(filter: Option<Filter>) -> Self {
        Self::GetList { filter }
    }

    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::GetOne { .. } => OperationKind::GetOne,
            Self::GetList { .. } => OperationKind::GetList,
            Self::GetAggregate(_) => OperationKind::GetAggregate,
        }
    }
}

/// Operation without its arguments, used to look up command descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    GetOne,
    GetList,
    GetAggregate,
}

impl OperationKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GetOne => "get_one",
            Self::GetList => "get_list",
            Self::GetAggregate => "get_aggregate",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sort direction of an aggregate sort field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

/// One sort criterion of an aggregate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSort {
    pub field: String,
    pub order: SortOrder,
    /// Statistic to sort by (`value`, `count`, `min`, `max`, `mean`, `sum`)
    pub stat: Option<String>,
}

/// Parameters of a grouped query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateRequest {
    /// Overrides the entity type's aggregate type
    pub aggregate_type: Option<String>,
    pub group_column: Option<String>,
    /// Server-side aggregation mode, e.g. `word_counts`
    pub mode: Option<String>,
    /// Numeric columns summarized per group, in order
    pub data_columns: Vec<String>,
    /// Text columns echoed per group, in order
    pub text_columns: Vec<String>,
    pub sort: Vec<AggregateSort>,
    pub first_group: Option<u32>,
    pub max_groups: Option<u32>,
    pub filter: Option<Filter>,
}

impl AggregateRequest {
    /// Request grouped by a column.
    #[must_use]
    pub fn new(group_column: impl Into<String>) -> Self {
        Self {
            group_column: Some(group_column.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn aggregate_type(mut self, aggregate_type: impl Into<String>) -> Self {
        self.aggregate_type = Some(aggregate_type.into());
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    #[must_use]
    pub fn data_column(mut self, column: impl Into<String>) -> Self {
        self.data_columns.push(column.into());
        self
    }

    #[must_use]
    pub fn text_column(mut self, column: impl Into<String>) -> Self {
        self.text_columns.push(column.into());
        self
    }

    #[must_use]
    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder, stat: Option<&str>) -> Self {
        self.sort.push(AggregateSort {
            field: field.into(),
            order,
            stat: stat.map(str::to_string),
        });
        self
    }

    #[must_use]
    pub const fn groups(mut self, first_group: u32, max_groups: u32) -> Self {
        self.first_group = Some(first_group);
        self.max_groups = Some(max_groups);
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }
}
