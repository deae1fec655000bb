//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::{CommandConfig, ConsoleConfig, ParsingConfig};
use super::validation::Validatable;
use crate::error::{ConsoleError, ErrorContext};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".gmp-console.yaml",
    ".gmp-console.yml",
    "gmp-console.yaml",
    "gmp-console.yml",
];

/// Directory under the user config dir holding the global config file.
const CONFIG_DIR_NAME: &str = "gmp-console";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/gmp-console/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    let cwd = std::env::current_dir().ok();
    if let Some(path) = cwd.as_deref().and_then(find_config_in_dir) {
        return Some(path);
    }

    if let Some(path) = cwd
        .as_deref()
        .and_then(find_git_root)
        .and_then(|root| find_config_in_dir(&root))
    {
        return Some(path);
    }

    if let Some(path) =
        dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join(CONFIG_DIR_NAME)))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up from `start`.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(PathBuf, std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(path, e) => {
                write!(f, "Failed to read config file {}: {e}", path.display())
            }
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(_, e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<ConfigFileError> for ConsoleError {
    fn from(err: ConfigFileError) -> Self {
        match err {
            ConfigFileError::Io(path, source) => Self::io(path, source),
            other => Self::config(other.to_string()),
        }
    }
}

/// Load a `ConsoleConfig` from a YAML file.
///
/// # Errors
///
/// Fails when the file does not exist, cannot be read or is not valid YAML
/// for the configuration format.
pub fn load_config_file(path: &Path) -> Result<ConsoleConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io(path.to_path_buf(), e))?;
    let config: ConsoleConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

impl ConsoleConfig {
    /// Load a configuration file and validate it.
    ///
    /// # Errors
    ///
    /// Fails with [`ConsoleError::Io`] when the file cannot be read,
    /// [`ConsoleError::Config`] when it is missing or not a valid
    /// configuration, and [`ConsoleError::Validation`] when a value is out of
    /// range.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let config =
            load_config_file(path).with_context(|| format!("loading {}", path.display()))?;
        let problems = config.validate();
        if !problems.is_empty() {
            let message = problems
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ConsoleError::validation(message))
                .context(format!("loading {}", path.display()));
        }
        Ok(config)
    }
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (ConsoleConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (ConsoleConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                (ConsoleConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl ConsoleConfig {
    /// Merge another config into this one, with `other` taking precedence
    /// wherever it differs from the defaults.
    pub fn merge(&mut self, other: &Self) {
        let command_defaults = CommandConfig::default();
        if other.commands.list_rows.is_some() {
            self.commands.list_rows = other.commands.list_rows;
        }
        if other.commands.info_details != command_defaults.info_details {
            self.commands.info_details = other.commands.info_details;
        }
        for (entity_type, params) in &other.commands.extra_defaults {
            let target = self
                .commands
                .extra_defaults
                .entry(entity_type.clone())
                .or_default();
            target.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let parsing_defaults = ParsingConfig::default();
        if other.parsing.retain_properties != parsing_defaults.retain_properties {
            self.parsing.retain_properties = other.parsing.retain_properties;
        }
        if other.parsing.strict_counts != parsing_defaults.strict_counts {
            self.parsing.strict_counts = other.parsing.strict_counts;
        }
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = ConsoleConfig::default();
    format!(
        r"# gmp-console configuration
# Place this file at .gmp-console.yaml in your project root or ~/.config/gmp-console/

{}
# Example:
#
# commands:
#   list_rows: 50
#   extra_defaults:
#     task:
#       ignore_pagination: '0'
# parsing:
#   strict_counts: true
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".gmp-console.yaml");
        std::fs::write(&config_path, "commands:\n  list_rows: 10\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_find_git_root() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_git_root(&nested).as_deref(), Some(tmp.path()));
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
commands:
  list_rows: 25
  info_details: false
  extra_defaults:
    nvt:
      details: '1'
parsing:
  retain_properties: false
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.commands.list_rows, Some(25));
        assert!(!config.commands.info_details);
        assert_eq!(config.commands.extra_defaults["nvt"]["details"], "1");
        assert!(!config.parsing.retain_properties);
        assert!(!config.parsing.strict_counts);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "commands: 42\n").unwrap();

        assert!(matches!(load_config_file(&config_path), Err(ConfigFileError::Parse(_))));

        let (config, loaded_from) = load_or_default(Some(&config_path));
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(loaded_from, None);
    }

    #[test]
    fn test_load_validates() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".gmp-console.yaml");
        std::fs::write(&config_path, "commands:\n  list_rows: 50\n").unwrap();
        assert_eq!(ConsoleConfig::load(&config_path).unwrap().commands.list_rows, Some(50));

        std::fs::write(&config_path, "commands:\n  list_rows: 0\n").unwrap();
        let err = ConsoleConfig::load(&config_path).unwrap_err();
        assert!(matches!(err, ConsoleError::Validation(_)));
        assert!(err.to_string().contains("list_rows"));
    }

    #[test]
    fn test_load_reports_file_errors() {
        let tmp = TempDir::new().unwrap();
        let missing = ConsoleConfig::load(&tmp.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(missing, ConsoleError::Config(_)));

        // a directory exists but cannot be read as a file
        let err = ConsoleConfig::load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConsoleError::Io { .. }));
        assert!(!err.is_malformed_input());
    }

    #[test]
    fn test_config_merge() {
        let mut base = ConsoleConfig::builder()
            .list_rows(10)
            .extra_default("task", "a", "1")
            .build();
        let overrides = ConsoleConfig::builder()
            .extra_default("task", "b", "2")
            .strict_counts(true)
            .build();

        base.merge(&overrides);

        assert_eq!(base.commands.list_rows, Some(10));
        assert_eq!(base.commands.extra_defaults["task"].len(), 2);
        assert!(base.parsing.strict_counts);
        assert!(base.parsing.retain_properties);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("commands:"));
        assert!(example.contains("info_details"));
        let parsed: ConsoleConfig = serde_yaml::from_str(&example).unwrap();
        assert_eq!(parsed, ConsoleConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom.yaml");
        std::fs::write(&config_path, "parsing:\n  strict_counts: true\n").unwrap();

        let (config, loaded_from) = load_or_default(Some(&config_path));
        assert!(config.parsing.strict_counts);
        assert_eq!(loaded_from, Some(config_path));
    }
}
