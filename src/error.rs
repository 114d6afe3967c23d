//! Error types for `monocle-sanitizer`
//!
//! Errors are split by stage: schema construction, configuration loading and
//! sanitizing, and the top-level aggregate used by the CLI to pick an exit
//! code.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::value::ValueType;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, wrong option type, missing option)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for sanitizer operations.
///
/// Aggregates the domain errors and maps each one to an exit code.
#[derive(Debug, Error)]
pub enum SanitizerError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Option table is malformed
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Invalid command-line usage
    #[error("usage error: {0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SanitizerError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(ConfigError::MissingFile { .. }) | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
            Self::Schema(_) | Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading, sanitizing and access errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Configuration file not found or unreadable
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Configuration file exceeds the size limit
    #[error("{path} is {size} bytes, limit is {limit} bytes")]
    FileTooLarge {
        /// Path to the configuration file
        path: PathBuf,
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// A value in the raw configuration has no option representation
    #[error("unsupported value for '{option}': {reason}")]
    UnsupportedValue {
        /// Option (or nested location) holding the value
        option: String,
        /// Why the value was rejected
        reason: String,
    },

    /// One or more options were supplied with the wrong type
    #[error("{}", render_mismatches(.mismatches))]
    InvalidTypes {
        /// Every mismatch found in the sanitizing pass
        mismatches: Vec<TypeMismatch>,
    },

    /// An option without a default was read but never supplied
    #[error("{option} not in config, and no default has been set.")]
    MissingRequired {
        /// Name of the option
        option: String,
    },

    /// Code asked for an option the schema does not declare
    #[error("{option} is not a declared config option{}", suggestion_suffix(.suggestion.as_deref()))]
    UndeclaredOption {
        /// Name that was requested
        option: String,
        /// Closest declared option name, if any
        suggestion: Option<String>,
    },

    /// A typed accessor was used on an option holding another type
    #[error("{option} holds a {actual} value, cannot read it as {requested}")]
    WrongAccessor {
        /// Name of the option
        option: String,
        /// Type the caller asked for
        requested: &'static str,
        /// Type actually stored
        actual: ValueType,
    },

    /// Strict mode rejected a configuration that only had warnings
    #[error("{count} warning(s) treated as errors in strict mode")]
    StrictWarnings {
        /// Number of warnings
        count: usize,
    },
}

impl ConfigError {
    /// Returns the option names involved in this error.
    #[must_use]
    pub fn options(&self) -> Vec<&str> {
        match self {
            Self::InvalidTypes { mismatches } => {
                mismatches.iter().map(|m| m.option.as_str()).collect()
            }
            Self::MissingRequired { option }
            | Self::UndeclaredOption { option, .. }
            | Self::WrongAccessor { option, .. }
            | Self::UnsupportedValue { option, .. } => vec![option.as_str()],
            _ => Vec::new(),
        }
    }
}

fn render_mismatches(mismatches: &[TypeMismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn suggestion_suffix(suggestion: Option<&str>) -> String {
    suggestion.map_or_else(String::new, |s| format!(" (did you mean {s}?)"))
}

// ============================================================================
// Type Mismatch
// ============================================================================

/// An option supplied with a value whose type the schema does not accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatch {
    /// Name of the option
    pub option: String,
    /// Names of the accepted types
    pub expected: Vec<&'static str>,
    /// Type of the supplied value
    pub actual: ValueType,
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expected.as_slice() {
            [single] => write!(
                f,
                "{} must be {}. Yours is: {}.",
                self.option, single, self.actual
            ),
            many => write!(
                f,
                "{} must be one of {}. Yours is: {}.",
                self.option,
                many.join(", "),
                self.actual
            ),
        }
    }
}

// ============================================================================
// Warnings
// ============================================================================

/// A non-fatal issue found while sanitizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Raw key the warning is about
    pub option: String,
    /// Description of the issue
    pub message: String,
    /// Closest declared option name, if any
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning: {}", self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean {suggestion}?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Schema Errors
// ============================================================================

/// Errors in the option table itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// The same option was declared twice
    #[error("option {0} is declared more than once")]
    DuplicateOption(String),

    /// The same option was given two defaults
    #[error("option {0} has more than one default")]
    DuplicateDefault(String),

    /// A default was registered for an option with no type entry
    #[error("default registered for undeclared option {0}")]
    OrphanDefault(String),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for sanitizer operations.
pub type Result<T> = std::result::Result<T, SanitizerError>;

// ============================================================================
// Tests
// ============================================================================
