//! Request parameter assembly.

use super::descriptor::{aggregate_type, command_descriptor, CommandDescriptor};
use super::request::{AggregateRequest, Operation};
use super::FlatParams;
use crate::config::CommandConfig;
use crate::error::{CommandErrorKind, ConsoleError, Result};
use crate::model::{EntityType, Filter, FilterTerm, Relation, ROWS_KEYWORD};
use tracing::trace;

/// Builds flat request parameters from operations.
///
/// Layers are applied lowest to highest:
///
/// 1. descriptor defaults,
/// 2. configured defaults (`commands.extra_defaults` and `commands.info_details`),
/// 3. caller parameters,
/// 4. operation arguments (id, filter, aggregate columns),
/// 5. forced descriptor parameters.
///
/// `cmd` is always the descriptor's command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBuilder {
    config: CommandConfig,
}

impl CommandBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_config(config: CommandConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &CommandConfig {
        &self.config
    }

    /// Build the parameters of an operation on an entity type.
    ///
    /// # Errors
    ///
    /// Fails when the operation is not offered for the entity type or a
    /// get-one id is empty.
    pub fn build(
        &self,
        operation: &Operation,
        entity_type: EntityType,
        params: &FlatParams,
    ) -> Result<FlatParams> {
        let descriptor = command_descriptor(operation.kind(), entity_type)?;
        self.build_with(&descriptor, operation, entity_type, params)
    }

    /// Build parameters from an explicit descriptor.
    ///
    /// # Errors
    ///
    /// Fails when a get-one id is empty.
    pub fn build_with(
        &self,
        descriptor: &CommandDescriptor,
        operation: &Operation,
        entity_type: EntityType,
        params: &FlatParams,
    ) -> Result<FlatParams> {
        let mut out = FlatParams::new();
        out.insert("cmd".to_string(), descriptor.command.to_string());
        extend_static(&mut out, descriptor.defaults);
        self.apply_configured_defaults(&mut out, operation, entity_type);
        out.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));

        match operation {
            Operation::GetOne { id } => {
                let id_param = descriptor.id_param.unwrap_or("id");
                if id.trim().is_empty() {
                    return Err(ConsoleError::command(
                        format!("building {}", descriptor.command),
                        CommandErrorKind::EmptyParameter(id_param.to_string()),
                    ));
                }
                out.insert(id_param.to_string(), id.clone());
            }
            Operation::GetList { filter } => {
                let filter = self.page_filter(filter.as_ref(), params);
                if let Some(filter) = filter {
                    insert_filter(&mut out, &filter);
                }
            }
            Operation::GetAggregate(request) => {
                insert_aggregate(&mut out, request, entity_type);
            }
        }

        extend_static(&mut out, descriptor.forced);
        out.insert("cmd".to_string(), descriptor.command.to_string());

        trace!(
            command = descriptor.command,
            entity_type = %entity_type,
            params = out.len(),
            "built request"
        );
        Ok(out)
    }

    fn apply_configured_defaults(
        &self,
        out: &mut FlatParams,
        operation: &Operation,
        entity_type: EntityType,
    ) {
        if entity_type.is_info() && matches!(operation, Operation::GetOne { .. }) {
            let details = if self.config.info_details { "1" } else { "0" };
            out.insert("details".to_string(), details.to_string());
        }
        if let Some(extra) = self.config.extra_defaults.get(entity_type.name()) {
            out.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }

    /// The operation's filter with the configured page size added, unless a
    /// page size is already given or the caller passed a raw filter string.
    fn page_filter(&self, filter: Option<&Filter>, params: &FlatParams) -> Option<Filter> {
        let Some(rows) = self.config.list_rows else {
            return filter.cloned();
        };
        match filter {
            Some(filter) if filter.has(ROWS_KEYWORD) => Some(filter.clone()),
            Some(filter) => Some(filter.with_term(rows_term(rows))),
            None if params.contains_key("filter") => None,
            None => Some(Filter::from_terms(vec![rows_term(rows)])),
        }
    }
}

fn rows_term(rows: i64) -> FilterTerm {
    FilterTerm::new(ROWS_KEYWORD, Relation::Equal, rows.to_string())
}

fn extend_static(out: &mut FlatParams, params: &[(&str, &str)]) {
    out.extend(params.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())));
}

fn insert_filter(out: &mut FlatParams, filter: &Filter) {
    out.insert("filter".to_string(), filter.to_filter_string());
    if let Some(id) = filter.id() {
        out.insert("filt_id".to_string(), id.to_string());
    }
}

fn insert_aggregate(out: &mut FlatParams, request: &AggregateRequest, entity_type: EntityType) {
    if let Some(kind) = request
        .aggregate_type
        .as_deref()
        .or_else(|| aggregate_type(entity_type))
    {
        out.insert("aggregate_type".to_string(), kind.to_string());
    }
    if let Some(group_column) = &request.group_column {
        out.insert("group_column".to_string(), group_column.clone());
    }
    if let Some(mode) = &request.mode {
        out.insert("aggregate_mode".to_string(), mode.clone());
    }
    for (i, column) in request.data_columns.iter().enumerate() {
        out.insert(format!("data_columns:{i}"), column.clone());
    }
    for (i, column) in request.text_columns.iter().enumerate() {
        out.insert(format!("text_columns:{i}"), column.clone());
    }
    for (i, sort) in request.sort.iter().enumerate() {
        out.insert(format!("sort_fields:{i}"), sort.field.clone());
        out.insert(format!("sort_orders:{i}"), sort.order.as_str().to_string());
        if let Some(stat) = &sort.stat {
            out.insert(format!("sort_stats:{i}"), stat.clone());
        }
    }
    if let Some(first) = request.first_group {
        out.insert("first_group".to_string(), first.to_string());
    }
    if let Some(max) = request.max_groups {
        out.insert("max_groups".to_string(), max.to_string());
    }
    if let Some(filter) = &request.filter {
        insert_filter(out, filter);
    }
}
