//! Aggregate response parsing.

use crate::commands::AggregateRequest;
use crate::error::{ConsoleError, Result};
use crate::model::{Aggregate, AggregateGroup, AggregateStats};
use crate::raw;
use crate::utils::coerce;
use serde_json::Value;
use tracing::debug;

/// Parse a grouped-query response.
///
/// Columns come from the request; when the request named none, the columns
/// the server reports are used instead.
///
/// # Errors
///
/// Fails when the response holds no `aggregate` element.
pub fn parse_aggregate(raw: &Value, request: &AggregateRequest) -> Result<Aggregate> {
    let aggregate = raw::child(raw, "aggregate").ok_or_else(|| ConsoleError::no_entity("aggregate"))?;

    let data_columns = columns(aggregate, "data_column", &request.data_columns);
    let text_columns = columns(aggregate, "text_column", &request.text_columns);
    let group_column = raw::field_text(aggregate, "group_column")
        .filter(|c| !c.is_empty())
        .or_else(|| request.group_column.clone());

    let groups = parse_aggregate_groups(aggregate, &data_columns, &text_columns);
    debug!(
        aggregate_type = request.aggregate_type.as_deref().unwrap_or_default(),
        groups = groups.len(),
        "parsed aggregate"
    );

    Ok(Aggregate {
        group_column,
        data_columns,
        text_columns,
        groups,
    })
}

fn columns(aggregate: &Value, element: &str, requested: &[String]) -> Vec<String> {
    if !requested.is_empty() {
        return requested.to_vec();
    }
    raw::as_list(raw::child(aggregate, element))
        .into_iter()
        .filter_map(raw::text_of)
        .filter(|c| !c.is_empty())
        .collect()
}

/// Parse the `group` elements of an aggregate.
///
/// A group missing `c_count` or `c_sum` gets the running total over the
/// groups so far. Columns the group has no statistics for read as zero.
#[must_use]
pub fn parse_aggregate_groups(
    aggregate: &Value,
    data_columns: &[String],
    text_columns: &[String],
) -> Vec<AggregateGroup> {
    let mut running_count = 0_u64;
    let mut running_sums = vec![0.0_f64; data_columns.len()];

    raw::as_list(raw::child(aggregate, "group"))
        .into_iter()
        .map(|group| {
            let value = raw::field_text(group, "value").unwrap_or_default();
            let count = number(group, "count").map_or(0, |c| u64::try_from(c).unwrap_or(0));
            running_count = running_count.saturating_add(count);

            let mut parsed = AggregateGroup::new(value, count);
            parsed.cumulative_count = number(group, "c_count")
                .and_then(|c| u64::try_from(c).ok())
                .unwrap_or(running_count);

            let stats = raw::as_list(raw::child(group, "stats"));
            for (column, running_sum) in data_columns.iter().zip(running_sums.iter_mut()) {
                let entry = stats.iter().copied().find(|s| column_of(s) == Some(column.as_str()));
                let stat = |name: &str| {
                    entry
                        .and_then(|s| coerce::parse_float(raw::field_text(s, name).as_deref()))
                };
                let sum = stat("sum").unwrap_or(0.0);
                *running_sum += sum;
                parsed.stats.insert(
                    column.clone(),
                    AggregateStats {
                        min: stat("min").unwrap_or(0.0),
                        max: stat("max").unwrap_or(0.0),
                        mean: stat("mean").unwrap_or(0.0),
                        sum,
                        cumulative_sum: stat("c_sum").unwrap_or(*running_sum),
                    },
                );
            }

            let texts = raw::as_list(raw::child(group, "text"));
            for column in text_columns {
                if let Some(text) = texts
                    .iter()
                    .find(|t| column_of(t) == Some(column.as_str()))
                    .and_then(|t| raw::text_of(t))
                {
                    parsed.text.insert(column.clone(), text);
                }
            }
            parsed
        })
        .collect()
}

fn column_of(value: &Value) -> Option<&str> {
    raw::attr(value, "column").and_then(Value::as_str)
}

fn number(value: &Value, name: &str) -> Option<i64> {
    coerce::parse_int(raw::field_text(value, name).as_deref())
}
