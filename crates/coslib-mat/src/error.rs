//! MAT error types

use thiserror::Error;

/// Result type for MAT operations
pub type MatResult<T> = std::result::Result<T, MatError>;

/// Errors that can occur during MAT reading/writing
#[derive(Debug, Error)]
pub enum MatError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid file format
    #[error("Invalid MAT format: {0}")]
    InvalidFormat(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// No variable with the requested name
    #[error("Variable not found: '{0}'")]
    VariableNotFound(String),

    /// Variable or file feature this reader does not handle
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Variable name that cannot be written
    #[error("Invalid variable name: '{0}'")]
    InvalidName(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] coslib_core::Error),
}
