//! Configuration validation for gmp-console.

use super::types::{CommandConfig, ConsoleConfig, ParsingConfig};
use crate::model::EntityType;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for ConsoleConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.commands.validate();
        errors.extend(self.parsing.validate());
        errors
    }
}

/// Parameters the builder always sets itself.
const RESERVED_PARAMS: &[&str] = &["cmd"];

impl Validatable for CommandConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(rows) = self.list_rows {
            // -1 asks the server for all rows
            if rows == 0 || rows < -1 {
                errors.push(ConfigError {
                    field: "commands.list_rows".to_string(),
                    message: format!("Page size must be positive or -1, got {rows}"),
                });
            }
        }

        for (entity_type, params) in &self.extra_defaults {
            if EntityType::from_name(entity_type).is_none() {
                errors.push(ConfigError {
                    field: format!("commands.extra_defaults.{entity_type}"),
                    message: format!("Unknown entity type '{entity_type}'"),
                });
            }
            for name in params.keys() {
                if name.is_empty() || RESERVED_PARAMS.contains(&name.as_str()) {
                    errors.push(ConfigError {
                        field: format!("commands.extra_defaults.{entity_type}"),
                        message: format!("Parameter '{name}' cannot be configured"),
                    });
                }
            }
        }

        errors
    }
}

impl Validatable for ParsingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConsoleConfig::default().is_valid());
    }

    #[test]
    fn test_invalid_page_size() {
        for rows in [0, -2] {
            let config = CommandConfig {
                list_rows: Some(rows),
                ..CommandConfig::default()
            };
            let errors = config.validate();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "commands.list_rows");
        }
        let unlimited = CommandConfig {
            list_rows: Some(-1),
            ..CommandConfig::default()
        };
        assert!(unlimited.is_valid());
    }

    #[test]
    fn test_extra_defaults_checked() {
        let mut params = IndexMap::new();
        params.insert("cmd".to_string(), "delete_task".to_string());
        let mut extra = IndexMap::new();
        extra.insert("task".to_string(), params.clone());
        extra.insert("widget".to_string(), IndexMap::new());
        let config = CommandConfig {
            extra_defaults: extra,
            ..CommandConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.message.contains("widget")));
        assert!(errors.iter().any(|e| e.message.contains("'cmd'")));
    }
}
