//! Cell-related types
//!
//! This module contains:
//! - [`Cell`] - A typed value read from a tabular source
//! - [`CellKind`] - The closed set of cell kinds
//! - [`CellValue`] - The raw value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")

mod address;
mod value;

pub use address::CellAddress;
pub use value::{datetime_to_serial, serial_to_datetime, Cell, CellKind, CellValue};
