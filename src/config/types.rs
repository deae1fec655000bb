//! Configuration types for gmp-console.
//!
//! Provides structured configuration for request building and response
//! parsing.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Unified Console Configuration
// ============================================================================

/// Top-level configuration, loadable from a `.gmp-console.yaml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Request building
    pub commands: CommandConfig,
    /// Response parsing
    pub parsing: ParsingConfig,
}

impl ConsoleConfig {
    /// Create a `ConsoleConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `ConsoleConfig` builder.
    pub fn builder() -> ConsoleConfigBuilder {
        ConsoleConfigBuilder::default()
    }
}

// ============================================================================
// Command Configuration
// ============================================================================

/// Configured defaults of the command builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CommandConfig {
    /// Page size added as a `rows=` filter term to list requests without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_rows: Option<i64>,
    /// Ask for details when fetching a single info entity
    pub info_details: bool,
    /// Extra default parameters per entity type name (`task`, `cve`, ...)
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra_defaults: IndexMap<String, IndexMap<String, String>>,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            list_rows: None,
            info_details: true,
            extra_defaults: IndexMap::new(),
        }
    }
}

// ============================================================================
// Parsing Configuration
// ============================================================================

/// Options of response normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ParsingConfig {
    /// Keep fields no family consumed in `Entity::properties`
    pub retain_properties: bool,
    /// Reject responses with out-of-range counts instead of clamping them
    pub strict_counts: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            retain_properties: true,
            strict_counts: false,
        }
    }
}

// ============================================================================
// Builder for ConsoleConfig
// ============================================================================

/// Builder for constructing `ConsoleConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct ConsoleConfigBuilder {
    config: ConsoleConfig,
}

impl ConsoleConfigBuilder {
    /// Set the page size of list requests.
    pub const fn list_rows(mut self, rows: i64) -> Self {
        self.config.commands.list_rows = Some(rows);
        self
    }

    /// Ask for details on get-one info requests.
    pub const fn info_details(mut self, details: bool) -> Self {
        self.config.commands.info_details = details;
        self
    }

    /// Add a default parameter for an entity type.
    pub fn extra_default(
        mut self,
        entity_type: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.config
            .commands
            .extra_defaults
            .entry(entity_type.into())
            .or_default()
            .insert(name.into(), value.into());
        self
    }

    /// Keep unconsumed fields as entity properties.
    pub const fn retain_properties(mut self, retain: bool) -> Self {
        self.config.parsing.retain_properties = retain;
        self
    }

    /// Reject out-of-range counts.
    pub const fn strict_counts(mut self, strict: bool) -> Self {
        self.config.parsing.strict_counts = strict;
        self
    }

    /// Build the `ConsoleConfig`.
    #[must_use]
    pub fn build(self) -> ConsoleConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ConsoleConfig::builder()
            .list_rows(25)
            .info_details(false)
            .extra_default("task", "ignore_pagination", "1")
            .strict_counts(true)
            .build();
        assert_eq!(config.commands.list_rows, Some(25));
        assert!(!config.commands.info_details);
        assert_eq!(config.commands.extra_defaults["task"]["ignore_pagination"], "1");
        assert!(config.parsing.retain_properties);
        assert!(config.parsing.strict_counts);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: ConsoleConfig = serde_yaml::from_str("parsing:\n  strict_counts: true\n").unwrap();
        assert!(config.parsing.strict_counts);
        assert!(config.parsing.retain_properties);
        assert!(config.commands.info_details);
    }
}
