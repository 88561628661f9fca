//! Error type shared by every coslib operation

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading simulation data
#[derive(Debug, Error)]
pub enum Error {
    /// A requested sheet, variable or parameter is not present
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// Two inputs that must agree in size do not
    #[error("Shape mismatch in {context}: {expected} vs {actual}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Expression text could not be compiled
    #[error("Compile error: {0}")]
    Compile(#[from] coslib_expr::ExprError),

    /// No time window matches the requested time
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed file or cell contents
    #[error("Format error: {0}")]
    Format(String),

    /// Row, column or sample index out of range
    #[error("Index error: {0}")]
    Index(String),

    /// Invalid parameter layout
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn shape(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Error::ShapeMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}

impl From<coslib_core::Error> for Error {
    fn from(err: coslib_core::Error) -> Self {
        use coslib_core::Error as CoreError;
        match err {
            CoreError::InvalidIndex(_)
            | CoreError::RowOutOfBounds { .. }
            | CoreError::ColumnOutOfBounds { .. } => Error::Index(err.to_string()),
            CoreError::MatrixShape { rows, cols, len } => {
                Error::shape(format!("{}x{} matrix", rows, cols), rows * cols, len)
            }
            CoreError::InvalidAddress(_)
            | CoreError::RaggedRow { .. }
            | CoreError::NotNumeric { .. } => Error::Format(err.to_string()),
        }
    }
}

impl From<coslib_csv::CsvError> for Error {
    fn from(err: coslib_csv::CsvError) -> Self {
        use coslib_csv::CsvError;
        match err {
            CsvError::Io(e) => Error::Io(e),
            CsvError::Core(e) => e.into(),
            CsvError::InvalidStartRow(_) => Error::Index(err.to_string()),
            CsvError::Csv(_) => Error::Format(err.to_string()),
        }
    }
}

impl From<coslib_xlsx::XlsxError> for Error {
    fn from(err: coslib_xlsx::XlsxError) -> Self {
        use coslib_xlsx::XlsxError;
        match err {
            XlsxError::Io(e) => Error::Io(e),
            XlsxError::Core(e) => e.into(),
            XlsxError::SheetNotFound(_) | XlsxError::SheetIndexOutOfRange { .. } => {
                Error::Lookup(err.to_string())
            }
            XlsxError::Zip(_)
            | XlsxError::Xml(_)
            | XlsxError::InvalidFormat(_)
            | XlsxError::MissingPart(_)
            | XlsxError::Parse(_) => Error::Format(err.to_string()),
        }
    }
}

#[cfg(feature = "mat")]
impl From<coslib_mat::MatError> for Error {
    fn from(err: coslib_mat::MatError) -> Self {
        use coslib_mat::MatError;
        match err {
            MatError::Io(e) => Error::Io(e),
            MatError::Core(e) => e.into(),
            MatError::VariableNotFound(_) => Error::Lookup(err.to_string()),
            MatError::InvalidFormat(_)
            | MatError::Parse(_)
            | MatError::Unsupported(_)
            | MatError::InvalidName(_) => Error::Format(err.to_string()),
        }
    }
}
