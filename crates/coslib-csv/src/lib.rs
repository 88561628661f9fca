//! # coslib-csv
//!
//! Delimited-text reader and writer for coslib grids.
//!
//! Delimited text carries no typing, so every cell read is tagged with the
//! kind given in [`CsvReadOptions::assumed_kind`].

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
