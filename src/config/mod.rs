//! Configuration module for gmp-console.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets
//! - YAML config file loading and discovery
//!
//! # Quick Start
//!
//! ```rust
//! use gmp_console::config::{ConfigPreset, ConsoleConfig};
//!
//! // Use defaults
//! let config = ConsoleConfig::default();
//!
//! // Use a preset
//! let config = ConsoleConfig::from_preset(ConfigPreset::Verbose);
//!
//! // Use builder
//! let config = ConsoleConfig::builder()
//!     .list_rows(50)
//!     .strict_counts(true)
//!     .build();
//! ```
//!
//! # Configuration File
//!
//! Place a `.gmp-console.yaml` file in your project root or
//! `~/.config/gmp-console/`:
//!
//! ```yaml
//! commands:
//!   list_rows: 50
//!   info_details: true
//!   extra_defaults:
//!     task:
//!       ignore_pagination: '0'
//! parsing:
//!   retain_properties: true
//!   strict_counts: false
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_LIST_ROWS};
pub use types::{CommandConfig, ConsoleConfig, ConsoleConfigBuilder, ParsingConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `.gmp-console.yaml` configuration format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(ConsoleConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_names_sections() {
        let schema = generate_json_schema();
        assert!(schema.contains("\"commands\""));
        assert!(schema.contains("strict_counts"));
    }
}
