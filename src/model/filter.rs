//! Filter expressions.
//!
//! A filter is an immutable list of terms such as
//! `name~"web server" severity>7.0 first=1 rows=10 sort-reverse=severity`.
//! Terms are kept verbatim so that rendering a parsed filter gives back an
//! equivalent expression.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Keyword of the first-row term (1-based).
pub const FIRST_KEYWORD: &str = "first";
/// Keyword of the page-size term.
pub const ROWS_KEYWORD: &str = "rows";
/// Keyword of the ascending sort term.
pub const SORT_KEYWORD: &str = "sort";
/// Keyword of the descending sort term.
pub const SORT_REVERSE_KEYWORD: &str = "sort-reverse";

/// Relation between keyword and value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// `=` exact match
    Equal,
    /// `~` contains, case-insensitive
    Approx,
    /// `:` contains, case-sensitive
    Contains,
    /// `<`
    Below,
    /// `>`
    Above,
}

impl Relation {
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Approx => "~",
            Self::Contains => ":",
            Self::Below => "<",
            Self::Above => ">",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Self::Equal),
            "~" => Some(Self::Approx),
            ":" => Some(Self::Contains),
            "<" => Some(Self::Below),
            ">" => Some(Self::Above),
            _ => None,
        }
    }
}

/// Single term of a filter expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterTerm {
    pub keyword: Option<String>,
    pub relation: Option<Relation>,
    pub value: String,
}

impl FilterTerm {
    /// Create a `keyword<relation>value` term.
    #[must_use]
    pub fn new(keyword: impl Into<String>, relation: Relation, value: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            relation: Some(relation),
            value: value.into(),
        }
    }

    /// Parse a single whitespace-free (or quoted) token.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        term_regex().captures(token).map_or_else(
            || Self {
                keyword: None,
                relation: None,
                value: token.to_string(),
            },
            |caps| {
                let keyword = caps.name("keyword").map(|m| m.as_str()).unwrap_or_default();
                Self {
                    keyword: (!keyword.is_empty()).then(|| keyword.to_string()),
                    relation: caps
                        .name("relation")
                        .and_then(|m| Relation::from_symbol(m.as_str())),
                    value: caps
                        .name("value")
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default(),
                }
            },
        )
    }

    /// Value with surrounding double quotes removed.
    #[must_use]
    pub fn unquoted_value(&self) -> &str {
        self.value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(&self.value)
    }
}

impl std::fmt::Display for FilterTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(keyword) = &self.keyword {
            f.write_str(keyword)?;
        }
        if let Some(relation) = &self.relation {
            f.write_str(relation.symbol())?;
        }
        f.write_str(&self.value)
    }
}

fn term_regex() -> &'static Regex {
    static TERM: OnceLock<Regex> = OnceLock::new();
    TERM.get_or_init(|| {
        Regex::new(r#"^(?P<keyword>[\w.\-]*)(?P<relation>[=~:<>])(?P<value>.*)$"#)
            .expect("filter term pattern is valid")
    })
}

/// Split an expression on whitespace, keeping double-quoted runs together.
fn tokenize(expression: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in expression.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                current.push(c);
            }
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Immutable filter expression, optionally backed by a saved filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    id: Option<String>,
    terms: Vec<FilterTerm>,
}

impl Filter {
    /// Parse a filter expression.
    #[must_use]
    pub fn parse(expression: &str) -> Self {
        Self {
            id: None,
            terms: tokenize(expression)
                .iter()
                .map(|token| FilterTerm::parse(token))
                .collect(),
        }
    }

    /// Parse a filter expression belonging to a saved filter.
    #[must_use]
    pub fn with_id(id: impl Into<String>, expression: &str) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::parse(expression)
        }
    }

    #[must_use]
    pub fn from_terms(terms: Vec<FilterTerm>) -> Self {
        Self { id: None, terms }
    }

    /// Id of the saved filter this expression belongs to.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn terms(&self) -> &[FilterTerm] {
        &self.terms
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Last term with the given keyword.
    #[must_use]
    pub fn get(&self, keyword: &str) -> Option<&FilterTerm> {
        self.terms
            .iter()
            .rev()
            .find(|t| t.keyword.as_deref() == Some(keyword))
    }

    #[must_use]
    pub fn has(&self, keyword: &str) -> bool {
        self.get(keyword).is_some()
    }

    /// Value of the last term with the given keyword.
    #[must_use]
    pub fn value(&self, keyword: &str) -> Option<&str> {
        self.get(keyword).map(FilterTerm::unquoted_value)
    }

    /// First row to return (1-based).
    #[must_use]
    pub fn first(&self) -> Option<i64> {
        self.value(FIRST_KEYWORD).and_then(|v| v.parse().ok())
    }

    /// Page size; `-1` requests all rows.
    #[must_use]
    pub fn rows(&self) -> Option<i64> {
        self.value(ROWS_KEYWORD).and_then(|v| v.parse().ok())
    }

    /// Column the result is sorted by, in either direction.
    #[must_use]
    pub fn sort_by(&self) -> Option<&str> {
        self.terms
            .iter()
            .rev()
            .find(|t| {
                matches!(
                    t.keyword.as_deref(),
                    Some(SORT_KEYWORD | SORT_REVERSE_KEYWORD)
                )
            })
            .map(FilterTerm::unquoted_value)
    }

    /// Whether the effective sort term sorts descending.
    #[must_use]
    pub fn sort_reverse(&self) -> bool {
        self.terms
            .iter()
            .rev()
            .find_map(|t| match t.keyword.as_deref() {
                Some(SORT_REVERSE_KEYWORD) => Some(true),
                Some(SORT_KEYWORD) => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Combine with `other`; terms of `self` win on keyword collision.
    ///
    /// Keyword-less terms of both filters are kept. `sort` and `sort-reverse`
    /// count as one keyword. The saved-filter id of `self` is kept.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let claims = |term: &FilterTerm| -> bool {
            match term.keyword.as_deref() {
                None => false,
                Some(SORT_KEYWORD | SORT_REVERSE_KEYWORD) => {
                    self.has(SORT_KEYWORD) || self.has(SORT_REVERSE_KEYWORD)
                }
                Some(keyword) => self.has(keyword),
            }
        };
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().filter(|t| !claims(t)).cloned());
        Self {
            id: self.id.clone(),
            terms,
        }
    }

    /// New filter with `term` appended, replacing terms of the same keyword.
    #[must_use]
    pub fn with_term(&self, term: FilterTerm) -> Self {
        let mut terms: Vec<FilterTerm> = self
            .terms
            .iter()
            .filter(|t| term.keyword.is_none() || t.keyword != term.keyword)
            .cloned()
            .collect();
        terms.push(term);
        Self {
            id: self.id.clone(),
            terms,
        }
    }

    /// Render the expression.
    #[must_use]
    pub fn to_filter_string(&self) -> String {
        self.terms
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_filter_string())
    }
}

impl From<&str> for Filter {
    fn from(expression: &str) -> Self {
        Self::parse(expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_terms() {
        let filter = Filter::parse(r#"name~"web server" severity>7.0 apache first=1 rows=10"#);
        assert_eq!(filter.terms().len(), 5);
        assert_eq!(filter.value("name"), Some("web server"));
        assert_eq!(filter.get("severity").and_then(|t| t.relation), Some(Relation::Above));
        assert_eq!(filter.terms()[2].keyword, None);
        assert_eq!(filter.first(), Some(1));
        assert_eq!(filter.rows(), Some(10));
    }

    #[test]
    fn test_render_round_trip() {
        let expression = r#"name~"web server" severity>7.0 sort-reverse=severity"#;
        assert_eq!(Filter::parse(expression).to_filter_string(), expression);
        assert_eq!(Filter::parse("  a=1   b=2 ").to_string(), "a=1 b=2");
    }

    #[test]
    fn test_sort() {
        let filter = Filter::parse("sort=name sort-reverse=severity");
        assert_eq!(filter.sort_by(), Some("severity"));
        assert!(filter.sort_reverse());

        let filter = Filter::parse("sort=name");
        assert_eq!(filter.sort_by(), Some("name"));
        assert!(!filter.sort_reverse());
        assert!(!Filter::default().sort_reverse());
    }

    #[test]
    fn test_merge_prefers_own_terms() {
        let caller = Filter::with_id("f1", "rows=25 sort=name apache");
        let defaults = Filter::parse("first=1 rows=10 sort-reverse=severity nginx");
        let merged = caller.merge(&defaults);
        assert_eq!(merged.to_filter_string(), "rows=25 sort=name apache first=1 nginx");
        assert_eq!(merged.id(), Some("f1"));
        assert_eq!(merged.rows(), Some(25));
    }

    #[test]
    fn test_with_term_replaces_keyword() {
        let filter = Filter::parse("rows=10 name=x");
        let changed = filter.with_term(FilterTerm::new("rows", Relation::Equal, "50"));
        assert_eq!(changed.to_filter_string(), "name=x rows=50");
        assert_eq!(filter.rows(), Some(10));
    }
}
