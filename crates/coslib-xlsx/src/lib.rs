//! # coslib-xlsx
//!
//! XLSX (Office Open XML) sheet reader for coslib.
//!
//! Only cell values and their kinds are read; formulas contribute their
//! cached value and all formatting is ignored except for recognising dates.

pub mod error;
pub mod reader;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use reader::{SheetSelector, XlsxReader};
