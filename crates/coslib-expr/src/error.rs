//! Expression error types

use thiserror::Error;

/// Result type for expression operations
pub type ExprResult<T> = std::result::Result<T, ExprError>;

/// Errors that can occur while compiling an expression
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExprError {
    /// The text has no `@(var)` prefix
    #[error("Missing '@(var)' prefix in '{0}'")]
    MissingPrefix(String),

    /// The number of `@(var)` prefixes does not fit the sub-expressions
    #[error("Found {prefixes} variable prefixes for {expressions} expressions")]
    PrefixCount { prefixes: usize, expressions: usize },

    /// The bound variable is not a valid identifier
    #[error("Invalid variable name '{0}'")]
    InvalidVariable(String),

    /// Expression parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Identifier that is neither the bound variable, a constant nor a function
    #[error("Unknown identifier '{name}' (bound variable is '{variable}')")]
    UnknownIdentifier { name: String, variable: String },

    /// Unknown function
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
}
