//! Error types for trueno-eda operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading data, planning figures or writing output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration file could not be parsed.
    #[error("Config parse error at line {line}: {message}")]
    ConfigParse {
        /// Line of the offending YAML (0 if unknown).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// Invalid dimensions for a framebuffer or figure.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Scale domain error (e.g., zero-width or non-finite extent).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Grid layout asked to divide by a zero column budget.
    #[error("Division by zero: columns per row must be at least 1")]
    DivisionByZero,

    /// A column declared numeric holds values that are not numbers.
    #[error("Column '{column}' is declared numeric but holds non-numeric values")]
    TypeInspection {
        /// Offending column.
        column: String,
    },

    /// A column with this name already exists in the dataset.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// No column with this name exists in the dataset.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Output path has an extension we cannot encode.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Logger construction failed.
    #[error("Logging error: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_type_inspection_names_column() {
        let err = Error::TypeInspection {
            column: "age".to_string(),
        };
        assert!(err.to_string().contains("'age'"));
    }

    #[test]
    fn test_config_parse_line() {
        let err = Error::ConfigParse {
            line: 7,
            message: "bad indent".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains("bad indent"));
    }

    #[test]
    fn test_io_from() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
