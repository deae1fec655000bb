//! Unified error types for gmp-console.
//!
//! Only a small set of conditions is ever surfaced from a protocol response:
//! a fragment that should describe an addressable entity but carries no id,
//! a get-one response that contains no entity at all, and input the XML
//! adapter cannot read. Every other irregularity degrades to a documented
//! default. Configuration files fail with `Io`, `Config` or `Validation`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gmp-console operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConsoleError {
    /// Errors while normalizing a protocol response
    #[error("Failed to parse response: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors while building a request
    #[error("Failed to build command: {context}")]
    Command {
        context: String,
        #[source]
        source: CommandErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("No {entity} element in response")]
    NoEntity { entity: String },

    #[error("Invalid field value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("Invalid XML structure: {0}")]
    InvalidXml(String),
}

/// Specific command error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CommandErrorKind {
    #[error("Operation {operation} is not available for {entity}")]
    Unsupported { operation: String, entity: String },

    #[error("Empty value for required parameter '{0}'")]
    EmptyParameter(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for gmp-console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ConsoleError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for a missing mandatory field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::parse(
            "malformed input",
            ParseErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create a parse error for a response that holds no entity
    pub fn no_entity(entity: impl Into<String>) -> Self {
        Self::parse(
            "malformed input",
            ParseErrorKind::NoEntity {
                entity: entity.into(),
            },
        )
    }

    /// Create a parse error for an out-of-range value
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::parse(
            "invalid value",
            ParseErrorKind::InvalidValue {
                field: field.into(),
                message: message.into(),
            },
        )
    }

    /// Create a command error with context
    pub fn command(context: impl Into<String>, source: CommandErrorKind) -> Self {
        Self::Command {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error signals input of the wrong shape (a caller error).
    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::Parse {
                source: ParseErrorKind::MissingField { .. } | ParseErrorKind::NoEntity { .. },
                ..
            }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<quick_xml::Error> for ConsoleError {
    fn from(err: quick_xml::Error) -> Self {
        Self::parse("XML deserialization", ParseErrorKind::InvalidXml(err.to_string()))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context, so a
/// failure deep inside a collection parse reads like
/// `"parsing get_info_response: row 3: malformed input"`.
///
/// ```ignore
/// use gmp_console::error::ErrorContext;
///
/// let entity = normalize(&row, EntityType::Cve)
///     .with_context(|| format!("row {index}"))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ConsoleError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: ConsoleError, new_ctx: &str) -> ConsoleError {
    match err {
        ConsoleError::Parse {
            context: existing,
            source,
        } => ConsoleError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ConsoleError::Command {
            context: existing,
            source,
        } => ConsoleError::Command {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ConsoleError::Io {
            path,
            message,
            source,
        } => ConsoleError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ConsoleError::Config(msg) => ConsoleError::Config(chain_context(new_ctx, &msg)),
        ConsoleError::Validation(msg) => ConsoleError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConsoleError::missing_field("id", "cve");
        let display = err.to_string();
        assert!(
            display.contains("malformed input"),
            "Error message should mention malformed input: {}",
            display
        );

        let err = ConsoleError::no_entity("config");
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_malformed_input_classification() {
        assert!(ConsoleError::missing_field("id", "task").is_malformed_input());
        assert!(ConsoleError::no_entity("info").is_malformed_input());
        assert!(!ConsoleError::invalid_value("rows", "negative").is_malformed_input());
        assert!(!ConsoleError::config("bad").is_malformed_input());
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ConsoleError::io("/path/to/response.xml", io_err);

        assert!(err.to_string().contains("/path/to/response.xml"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(ConsoleError::missing_field("id", "cve"))
        }

        fn middle() -> Result<()> {
            inner().context("row 2")
        }

        fn outer() -> Result<()> {
            middle().context("get_info_response")
        }

        match outer() {
            Err(ConsoleError::Parse { context, source }) => {
                assert_eq!(context, "get_info_response: row 2: malformed input");
                assert!(matches!(source, ParseErrorKind::MissingField { .. }));
            }
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(ConsoleError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
