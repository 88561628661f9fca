//! # coslib-core
//!
//! Core data structures for the coslib data-preparation library.
//!
//! This crate provides the fundamental types used throughout coslib:
//! - [`Cell`], [`CellKind`], [`CellValue`] - Typed values read from tabular sources
//! - [`TabularGrid`] - A rectangular grid of cells
//! - [`IndexRange`] - 1-based row/column selections
//! - [`Matrix`] - Dense numeric arrays
//! - [`extract_section`] and friends - Rectangular sub-selections of a grid
//!
//! ## Example
//!
//! ```rust
//! use coslib_core::{extract_cells, Cell, IndexRange, TabularGrid};
//!
//! let grid = TabularGrid::new(vec![
//!     vec![Cell::text("L"), Cell::number(1e-4)],
//!     vec![Cell::text("eps"), Cell::number(0.3)],
//! ])
//! .unwrap();
//!
//! // Ranges are 1-based
//! let cols = IndexRange::new(vec![2]).unwrap();
//! let values = extract_cells(&grid, None, Some(&cols)).unwrap();
//! assert_eq!(values[1][0].as_number(), Some(0.3));
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod matrix;
pub mod range;
pub mod section;

// Re-exports for convenience
pub use cell::{datetime_to_serial, serial_to_datetime, Cell, CellAddress, CellKind, CellValue};
pub use error::{Error, Result};
pub use grid::TabularGrid;
pub use matrix::Matrix;
pub use range::IndexRange;
pub use section::{extract_cells, extract_numbers, extract_section, Section};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: usize = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: usize = 16_384;
