//! Collection parsing.
//!
//! Where a list response keeps its rows and counts depends on the command
//! family, so the caller supplies a [`ListAccessor`]. Two shapes ship with
//! the crate:
//!
//! - [`GmpListAccessor`] for protocol responses
//!   (`<config/>...<configs start max/><config_count>...`),
//! - [`CursorListAccessor`] for cursor-paginated sources
//!   (`edges[].node`, `counts`, `pageInfo`).
//!
//! Any closure returning rows can be wrapped in an [`FnListAccessor`].

use super::entity::normalize_with;
use super::variant::{is_counts_fragment, resolve_info_variant, InfoVariant};
use crate::config::ParsingConfig;
use crate::error::{ConsoleError, ErrorContext, Result};
use crate::model::{
    Collection, CollectionCounts, Entity, EntityType, Filter, PageCursors, RawCounts,
};
use crate::raw;
use crate::utils::coerce;
use serde_json::Value;
use tracing::{debug, trace, warn};

/// Locates rows, counts and cursors in a list response.
pub trait ListAccessor {
    /// Rows of the response, in server order.
    fn rows<'a>(&self, raw: &'a Value) -> Vec<&'a Value>;

    /// Counts as sent by the server.
    fn counts(&self, _raw: &Value) -> RawCounts {
        RawCounts::default()
    }

    /// Pagination cursors, for cursor-paginated sources.
    fn cursors(&self, _raw: &Value) -> PageCursors {
        PageCursors::default()
    }

    /// Filter the server applied, when echoed back.
    fn filter(&self, _raw: &Value) -> Option<Filter> {
        None
    }
}

/// Accessor for protocol list responses.
///
/// For an element name `x`, rows are the `<x>` children, the page window is
/// `<xs start max>` and the totals are `<x_count>all<filtered/><page/></x_count>`.
/// The information endpoint sends its page window as a trailing `<info
/// start max>` row instead; that row is recognized as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmpListAccessor {
    element: String,
    page_element: String,
    count_element: String,
}

impl GmpListAccessor {
    #[must_use]
    pub fn new(element: impl Into<String>) -> Self {
        let element = element.into();
        Self {
            page_element: format!("{element}s"),
            count_element: format!("{element}_count"),
            element,
        }
    }

    /// Accessor for an entity type's list response.
    #[must_use]
    pub fn for_entity_type(entity_type: EntityType) -> Self {
        Self::new(response_element(entity_type))
    }

    #[must_use]
    pub fn element(&self) -> &str {
        &self.element
    }

    fn page_window<'a>(&self, raw: &'a Value) -> Option<&'a Value> {
        let explicit = raw::as_list(raw::child(raw, &self.page_element))
            .into_iter()
            .find(|page| raw::attr(page, "start").is_some());
        explicit.or_else(|| {
            raw::as_list(raw::child(raw, &self.element))
                .into_iter()
                .rev()
                .find(|row| is_counts_fragment(row))
        })
    }
}

/// Element name rows of an entity type are sent under.
#[must_use]
pub const fn response_element(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::ScanConfig | EntityType::Policy => "config",
        EntityType::Host | EntityType::OperatingSystem => "asset",
        EntityType::Cve
        | EntityType::Cpe
        | EntityType::Nvt
        | EntityType::OvalDef
        | EntityType::CertBundAdv
        | EntityType::DfnCertAdv
        | EntityType::AllInfo => "info",
        other => other.name(),
    }
}

fn count_text(value: Option<&Value>) -> Option<i64> {
    coerce::parse_int(value.and_then(raw::text_of).as_deref())
}

impl ListAccessor for GmpListAccessor {
    fn rows<'a>(&self, raw: &'a Value) -> Vec<&'a Value> {
        raw::as_list(raw::child(raw, &self.element))
    }

    fn counts(&self, raw: &Value) -> RawCounts {
        let page = self.page_window(raw);
        let totals = raw::child(raw, &self.count_element);
        RawCounts {
            start: count_text(page.and_then(|p| raw::attr(p, "start"))),
            rows: count_text(page.and_then(|p| raw::attr(p, "max"))),
            length: count_text(totals.and_then(|t| raw::child(t, "page"))),
            all: count_text(totals),
            filtered: count_text(totals.and_then(|t| raw::child(t, "filtered"))),
        }
    }

    fn filter(&self, raw: &Value) -> Option<Filter> {
        let echoed = raw::as_list(raw::child(raw, "filters"))
            .into_iter()
            .find(|filters| raw::child(filters, "term").is_some())?;
        let term = raw::child(echoed, "term").and_then(raw::text_of)?;
        Some(match raw::attr(echoed, "id").and_then(raw::text_of) {
            Some(id) if !id.is_empty() && id != "0" => Filter::with_id(id, &term),
            _ => Filter::parse(&term),
        })
    }
}

/// Accessor for cursor-paginated sources.
///
/// Rows are the `node`s of `edges` under an optional path; counts are read
/// from `counts` (`total`, `filtered`, `offset`, `limit`, `length`) and
/// cursors from `pageInfo` (or `page_info`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorListAccessor {
    path: Vec<String>,
}

impl CursorListAccessor {
    /// Accessor for a connection at the given path (`["scanConfigs"]`).
    #[must_use]
    pub fn new<S: Into<String>>(path: impl IntoIterator<Item = S>) -> Self {
        Self {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    fn connection<'a>(&self, raw: &'a Value) -> Option<&'a Value> {
        let path: Vec<&str> = self.path.iter().map(String::as_str).collect();
        raw::get_path(raw, &path)
    }
}

fn cursor_flag(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(flag) => Some(*flag),
        other => raw::text_of(other).map(|t| t == "1" || t.eq_ignore_ascii_case("true")),
    }
}

impl ListAccessor for CursorListAccessor {
    fn rows<'a>(&self, raw: &'a Value) -> Vec<&'a Value> {
        self.connection(raw)
            .map(|connection| {
                raw::as_list(raw::child(connection, "edges"))
                    .into_iter()
                    .filter_map(|edge| raw::child(edge, "node"))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn counts(&self, raw: &Value) -> RawCounts {
        let counts = self
            .connection(raw)
            .and_then(|connection| raw::child(connection, "counts"));
        let field = |name: &str| count_text(counts.and_then(|c| raw::child(c, name)));
        RawCounts {
            start: field("offset").map(|offset| offset.saturating_add(1)),
            rows: field("limit"),
            length: field("length"),
            all: field("total"),
            filtered: field("filtered"),
        }
    }

    fn cursors(&self, raw: &Value) -> PageCursors {
        let info = self.connection(raw).and_then(|connection| {
            raw::child(connection, "pageInfo").or_else(|| raw::child(connection, "page_info"))
        });
        let Some(info) = info else {
            return PageCursors::default();
        };
        let cursor = |name: &str| raw::child(info, name).and_then(raw::text_of);
        PageCursors {
            start_cursor: cursor("startCursor"),
            end_cursor: cursor("endCursor"),
            last_page_cursor: cursor("lastPageCursor"),
            has_next_page: cursor_flag(raw::child(info, "hasNextPage")),
            has_previous_page: cursor_flag(raw::child(info, "hasPreviousPage")),
        }
    }
}

/// Accessor built from a row lookup closure, with optional counts.
pub struct FnListAccessor<F> {
    rows: F,
    counts: Option<fn(&Value) -> RawCounts>,
}

impl<F> FnListAccessor<F>
where
    F: for<'a> Fn(&'a Value) -> Vec<&'a Value>,
{
    pub fn new(rows: F) -> Self {
        Self { rows, counts: None }
    }

    #[must_use]
    pub fn with_counts(mut self, counts: fn(&Value) -> RawCounts) -> Self {
        self.counts = Some(counts);
        self
    }
}

impl<F> ListAccessor for FnListAccessor<F>
where
    F: for<'a> Fn(&'a Value) -> Vec<&'a Value>,
{
    fn rows<'a>(&self, raw: &'a Value) -> Vec<&'a Value> {
        (self.rows)(raw)
    }

    fn counts(&self, raw: &Value) -> RawCounts {
        self.counts.map(|counts| counts(raw)).unwrap_or_default()
    }
}

/// Options of a collection parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionOptions {
    /// Keep only rows of this info variant, hoisting the discriminator child
    pub variant: Option<InfoVariant>,
    pub parsing: ParsingConfig,
}

impl CollectionOptions {
    #[must_use]
    pub fn for_variant(variant: InfoVariant) -> Self {
        Self {
            variant: Some(variant),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_parsing(mut self, parsing: ParsingConfig) -> Self {
        self.parsing = parsing;
        self
    }
}

/// Parse a list response into a collection.
///
/// With a variant, rows not of that variant are dropped and the rest are
/// normalized as the variant's entity type. Info entity types use their own
/// variant when none is given. Entity order follows row order.
///
/// # Errors
///
/// Fails when a kept row has no id, or, with strict counts, when the counts
/// are out of range.
pub fn parse_collection(
    raw: &Value,
    entity_type: EntityType,
    accessor: &dyn ListAccessor,
    options: &CollectionOptions,
) -> Result<Collection> {
    let rows = accessor.rows(raw);
    let mut entities = Vec::with_capacity(rows.len());
    let variant = options
        .variant
        .or_else(|| InfoVariant::from_entity_type(entity_type));

    for (index, row) in rows.into_iter().enumerate() {
        let entity = match variant {
            Some(variant) => {
                let Some(resolved) = resolve_info_variant(row, variant) else {
                    trace!(index, variant = %variant, "dropping row of another info variant");
                    continue;
                };
                normalize_with(&resolved, variant.entity_type(), &options.parsing)
            }
            None => normalize_with(row, entity_type, &options.parsing),
        }
        .with_context(|| format!("row {index}"))?;
        entities.push(entity);
    }

    let raw_counts = accessor.counts(raw);
    let violations = raw_counts.violations();
    if !violations.is_empty() {
        if options.parsing.strict_counts {
            return Err(ConsoleError::invalid_value("counts", violations.join("; ")));
        }
        warn!(entity_type = %entity_type, problems = ?violations, "clamping out-of-range collection counts");
    }
    let counts = CollectionCounts::from_raw(&raw_counts);

    debug!(
        entity_type = %entity_type,
        entities = entities.len(),
        first = counts.first,
        filtered = counts.filtered,
        all = counts.all,
        "parsed collection"
    );

    Ok(Collection {
        entities,
        counts,
        cursors: accessor.cursors(raw),
        filter: accessor.filter(raw),
    })
}

/// Parse a get-one response.
///
/// # Errors
///
/// Fails when the response has no row or the row has no id.
pub fn parse_entity(
    raw: &Value,
    entity_type: EntityType,
    accessor: &dyn ListAccessor,
) -> Result<Entity> {
    let row = accessor
        .rows(raw)
        .into_iter()
        .next()
        .ok_or_else(|| ConsoleError::no_entity(entity_type.name()))?;
    normalize_with(row, entity_type, &ParsingConfig::default())
}

/// Parse a get-one response of the information endpoint.
///
/// The trailing counts-only row the endpoint appends is discarded; the first
/// row of the requested variant is normalized.
///
/// # Errors
///
/// Fails when no row of the variant is present or that row has no id.
pub fn parse_info_entity(
    raw: &Value,
    variant: InfoVariant,
    accessor: &dyn ListAccessor,
) -> Result<Entity> {
    let mut rows = accessor.rows(raw);
    if rows.last().is_some_and(|row| is_counts_fragment(row)) {
        rows.pop();
    }
    let resolved = rows
        .into_iter()
        .find_map(|row| resolve_info_variant(row, variant))
        .ok_or_else(|| ConsoleError::no_entity(variant.discriminator()))?;
    normalize_with(&resolved, variant.entity_type(), &ParsingConfig::default())
}
