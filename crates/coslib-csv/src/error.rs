//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV operations
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Row selection that can never match (rows are 1-based)
    #[error("Invalid start row {0}: rows start at 1")]
    InvalidStartRow(usize),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] coslib_core::Error),
}
