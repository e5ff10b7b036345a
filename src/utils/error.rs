//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading the student dataset
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("CSV parsing failed: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Required column missing from header row: {0}")]
    MissingColumn(String),

    #[error("Malformed record at row {row}: unexpected outcome value {value:?}")]
    MalformedRecord { row: usize, value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Hierarchy is empty, nothing to draw")]
    EmptyHierarchy,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
