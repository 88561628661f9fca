//! CSV options

use coslib_core::CellKind;

/// Options for reading delimited text into a grid
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// First row to keep (1-based, inclusive; default: 1)
    pub start_row: usize,
    /// Last row to keep (1-based, inclusive; default: last row)
    pub stop_row: Option<usize>,
    /// Kind given to every cell, since delimited text carries no typing
    pub assumed_kind: CellKind,
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Lines starting with this byte are skipped before row counting
    pub comment: Option<u8>,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            start_row: 1,
            stop_row: None,
            assumed_kind: CellKind::Text,
            delimiter: b',',
            quote: b'"',
            comment: None,
        }
    }
}

impl CsvReadOptions {
    /// Default options with every cell assumed numeric
    pub fn numeric() -> Self {
        Self {
            assumed_kind: CellKind::Number,
            ..Self::default()
        }
    }

    /// Keep rows from `start_row` on
    pub fn start_row(mut self, start_row: usize) -> Self {
        self.start_row = start_row;
        self
    }

    /// Keep rows up to and including `stop_row`
    pub fn stop_row(mut self, stop_row: usize) -> Self {
        self.stop_row = Some(stop_row);
        self
    }

    /// Skip lines starting with `comment`
    pub fn comment(mut self, comment: u8) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Tag every cell with `kind`
    pub fn assumed_kind(mut self, kind: CellKind) -> Self {
        self.assumed_kind = kind;
        self
    }

    /// Split fields on `delimiter`
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Options for writing CSV files
#[derive(Debug, Clone)]
pub struct CsvWriteOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Line terminator
    pub line_terminator: LineTerminator,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            line_terminator: LineTerminator::LF,
        }
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
}
