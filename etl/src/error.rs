//! Error types for the shelter outcomes ETL pipeline.
//!
//! One error enum per stage, wrapped by a top-level pipeline error:
//!
//! - [`ExtractError`] - Fetching and parsing the source CSV
//! - [`TransformError`] - Building the star schema
//! - [`ConfigError`] - Reading warehouse credentials
//! - [`LoadError`] - Writing tables to the warehouse
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across stage boundaries.

use thiserror::Error;

// =============================================================================
// Extraction Errors
// =============================================================================

/// Errors while fetching or parsing the source table.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Failed to read a local source file.
    #[error("Failed to read source: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed (connection, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Source returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Malformed CSV content.
    #[error("Invalid CSV at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Source contained no bytes at all.
    #[error("Source is empty")]
    EmptySource,

    /// Header row is missing or blank.
    #[error("No headers found in source")]
    NoHeaders,
}

impl From<csv::Error> for ExtractError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        ExtractError::Parse {
            line,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors while reshaping the raw table into a star schema.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A required source column is absent from the header.
    #[error("Missing source column: {0}")]
    MissingColumn(String),

    /// A timestamp cell could not be parsed.
    #[error("Row {row}: cannot parse timestamp '{value}'")]
    InvalidTimestamp { row: usize, value: String },
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while reading warehouse configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable not set.
    #[error("Missing environment variable {0}")]
    MissingVar(&'static str),

    /// Port is not a valid TCP port number.
    #[error("Invalid port '{0}': expected a number between 0 and 65535")]
    InvalidPort(String),
}

// =============================================================================
// Load Errors
// =============================================================================

/// Errors while writing tables to the warehouse.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Database driver error (connectivity, DDL, type mismatch).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row does not match the table's column definitions.
    #[error("Table {table}: row {row} has {found} cells, expected {expected}")]
    RowShape {
        table: String,
        row: usize,
        found: usize,
        expected: usize,
    },

    /// A cell's type does not match its column.
    #[error("Table {table}: row {row} has a mistyped value in column {column}")]
    CellType {
        table: String,
        row: usize,
        column: String,
    },

    /// The warehouse refused the table.
    #[error("Table {0} rejected by warehouse")]
    Rejected(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the error type returned by [`crate::pipeline::run`]. The first
/// failing stage aborts the run and its error is wrapped here.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Extraction error.
    #[error("Extract error: {0}")]
    Extract(#[from] ExtractError),

    /// Transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Load error.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Writing exported tables failed.
    #[error("Export error: {0}")]
    Export(#[from] csv::Error),

    /// Export directory I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for extraction.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Result type for transformation.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // ExtractError -> PipelineError
        let err: PipelineError = ExtractError::EmptySource.into();
        assert!(err.to_string().contains("empty"));

        // TransformError -> PipelineError
        let err: PipelineError = TransformError::MissingColumn("Breed".into()).into();
        assert!(err.to_string().contains("Breed"));

        // ConfigError -> PipelineError
        let err: PipelineError = ConfigError::MissingVar("WAREHOUSE_HOST").into();
        assert!(err.to_string().contains("WAREHOUSE_HOST"));
    }

    #[test]
    fn test_invalid_timestamp_format() {
        let err = TransformError::InvalidTimestamp {
            row: 7,
            value: "not a date".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Row 7"));
        assert!(msg.contains("not a date"));
    }

    #[test]
    fn test_row_shape_format() {
        let err = LoadError::RowShape {
            table: "BREED".into(),
            row: 3,
            found: 1,
            expected: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("BREED"));
        assert!(msg.contains("expected 2"));
    }
}
