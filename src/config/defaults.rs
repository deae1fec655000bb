//! Default configurations and presets for gmp-console.

use super::types::{CommandConfig, ConsoleConfig, ParsingConfig};

/// Page size used by the `verbose` preset.
pub const DEFAULT_LIST_ROWS: i64 = 100;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Server page size, details on get-one info requests, lenient counts
    Default,
    /// No details, no leftover properties
    Minimal,
    /// Fixed page size, details, strict counts
    Verbose,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Minimal => "minimal",
            Self::Verbose => "verbose",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "minimal" | "lean" => Some(Self::Minimal),
            "verbose" | "full" => Some(Self::Verbose),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Server page size, detailed info entities, lenient counts",
            Self::Minimal => "Small requests and entities without unparsed properties",
            Self::Verbose => "Fixed page size, detailed info entities, strict counts",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Minimal, Self::Verbose]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl ConsoleConfig {
    /// Create a `ConsoleConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Minimal => Self::minimal_preset(),
            ConfigPreset::Verbose => Self::verbose_preset(),
        }
    }

    /// Minimal preset.
    ///
    /// - Get-one info requests skip details
    /// - Unconsumed fields are dropped
    #[must_use]
    pub fn minimal_preset() -> Self {
        Self {
            commands: CommandConfig {
                info_details: false,
                ..CommandConfig::default()
            },
            parsing: ParsingConfig {
                retain_properties: false,
                strict_counts: false,
            },
        }
    }

    /// Verbose preset.
    #[must_use]
    pub fn verbose_preset() -> Self {
        Self {
            commands: CommandConfig {
                list_rows: Some(DEFAULT_LIST_ROWS),
                ..CommandConfig::default()
            },
            parsing: ParsingConfig {
                retain_properties: true,
                strict_counts: true,
            },
        }
    }
}
