//! Error types for viewport unit conversion.

use std::path::PathBuf;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the converter.
///
/// Usage problems found inside a stylesheet (such as a misplaced ignore
/// comment) are not errors; they are reported as
/// [`Warning`](crate::processor::Warning)s on the processing result.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// CSS parsing error.
    #[error("CSS parse error at line {line}, column {column}: {message}")]
    Parse {
        message: String,
        line: u32,
        column: u32,
    },

    /// File I/O error.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An include/exclude filter has the wrong shape.
    #[error("options.{option} should be RegExp or Array of RegExp: {message}")]
    InvalidFilter { option: String, message: String },

    /// A regular expression failed to compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Malformed configuration document.
    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl Error {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a filter shape error.
    pub fn invalid_filter(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            option: option.into(),
            message: message.into(),
        }
    }

    /// Create a pattern compilation error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
