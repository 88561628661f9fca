//! Error types for coslib-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in coslib-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Index ranges are 1-based; 0 is never valid
    #[error("Invalid index {0}: indices start at 1")]
    InvalidIndex(usize),

    /// Row index out of bounds (1-based index, grid row count)
    #[error("Row index {index} out of bounds (rows: {len})")]
    RowOutOfBounds { index: usize, len: usize },

    /// Column index out of bounds (1-based index, grid column count)
    #[error("Column index {index} out of bounds (columns: {len})")]
    ColumnOutOfBounds { index: usize, len: usize },

    /// A row of a grid has a different length than the first row
    #[error("Row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A cell could not be coerced to a number (1-based position)
    #[error("Cell at row {row}, column {col} is not numeric: '{text}'")]
    NotNumeric { row: usize, col: usize, text: String },

    /// Matrix data does not match its declared shape
    #[error("Matrix shape {rows}x{cols} does not match {len} values")]
    MatrixShape { rows: usize, cols: usize, len: usize },
}
