//! # coslib
//!
//! Data ingestion for lithium-ion cell model simulations.
//!
//! coslib reads cell parameters and reference simulation output from the
//! formats a modelling workflow accumulates (XLSX workbooks, delimited text,
//! MAT files) into one cell model, and turns them into the pieces a solver
//! needs.
//!
//! ## Features
//!
//! - Read XLSX sheets, delimited text and MAT level-5 variables
//! - Extract rectangular sections as typed cells or numeric matrices
//! - Compile `@(x) ...` anonymous-function parameters into callables
//! - Load named parameter groups, optionally from a JSON layout
//! - Window concatenated time-series output by time step
//! - Partition a cell mesh into electrode and separator regions
//! - Evaluate Butler-Volmer molar flux from loaded parameters
//! - Bundle delimited reference output into MAT fixtures (`mat` feature)
//!
//! ## Example
//!
//! ```rust
//! use coslib::prelude::*;
//!
//! let grid = TabularGrid::new(vec![
//!     vec![Cell::text("a"), Cell::number(1.0)],
//!     vec![Cell::text("b"), Cell::text("@(x) sin(x)")],
//!     vec![Cell::text("c"), Cell::number(2.0)],
//! ])?;
//!
//! let rows = IndexRange::span(1, 3)?;
//! let params = load_parameters(
//!     &grid,
//!     &rows,
//!     &IndexRange::new(vec![1])?,
//!     &rows,
//!     &IndexRange::new(vec![2])?,
//! )?;
//!
//! assert_eq!(params.scalar("a")?, 1.0);
//! assert_eq!(params.function("b")?.call(0.0), 0.0);
//! # Ok::<(), coslib::Error>(())
//! ```

pub mod error;
pub mod flux;
pub mod mesh;
pub mod params;
pub mod prelude;
pub mod source;
pub mod timeseries;

#[cfg(feature = "mat")]
pub mod convert;

// Re-export core types
pub use coslib_core::{
    datetime_to_serial, extract_cells, extract_numbers, extract_section, serial_to_datetime, Cell,
    CellAddress, CellKind, CellValue, IndexRange, Matrix, Section, TabularGrid,
};

// Re-export expression types
pub use coslib_expr::{compile, CompiledExpression, ExprError};

pub use coslib_xlsx::SheetSelector;

pub use error::{Error, Result};
pub use flux::{nice_abs, FluxConstants, FluxModel, FluxState};
pub use mesh::{partition, partition_with, region_range, MeshRegions, MeshThresholds, Region};
pub use params::{
    load_parameter_groups, load_parameter_workbook, load_parameters, GroupLayout, ParameterLayout,
    ParameterMap, ParameterValue, RangeSpec, SectionLayout, SheetRef,
};
pub use source::{
    read_delimited, read_sheet, read_workbook, sheet_names, write_delimited,
    write_delimited_grid, DelimitedOptions, WorkbookContents,
};
pub use timeseries::{
    read_series_window, SeriesFileOptions, TimeSeries, TimeWindow, WindowOptions,
};

#[cfg(feature = "mat")]
pub use convert::{convert_csv_to_mat, read_commented_matrix};
#[cfg(feature = "mat")]
pub use source::{matrix_names, read_matrix, write_matrices};
