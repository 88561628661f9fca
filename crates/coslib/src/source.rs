//! Tabular source adapters
//!
//! One entry point per source format, all producing the shared grid and
//! matrix types. Workbooks and delimited text yield a [`TabularGrid`]; MAT
//! files yield a [`Matrix`] per variable.

use std::path::Path;

use coslib_core::{Matrix, TabularGrid};
use coslib_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
use coslib_xlsx::{SheetSelector, XlsxReader};

use crate::error::Result;

/// Options for reading delimited text
///
/// `start_row`/`stop_row` are 1-based and inclusive; every cell is tagged with
/// `assumed_kind` (default [`CellKind::Text`](coslib_core::CellKind::Text)).
pub type DelimitedOptions = CsvReadOptions;

/// What [`read_workbook`] returns, depending on whether a sheet was selected
#[derive(Debug, Clone, PartialEq)]
pub enum WorkbookContents {
    /// Sheet names in tab order (no sheet selected)
    SheetNames(Vec<String>),
    /// Contents of the selected sheet
    Grid(TabularGrid),
}

impl WorkbookContents {
    pub fn into_grid(self) -> Option<TabularGrid> {
        match self {
            WorkbookContents::Grid(grid) => Some(grid),
            WorkbookContents::SheetNames(_) => None,
        }
    }

    pub fn into_sheet_names(self) -> Option<Vec<String>> {
        match self {
            WorkbookContents::SheetNames(names) => Some(names),
            WorkbookContents::Grid(_) => None,
        }
    }
}

/// Read a workbook: the sheet names without a selector, else one sheet
///
/// # Example
/// ```rust,no_run
/// use coslib::{read_workbook, SheetSelector, WorkbookContents};
///
/// if let WorkbookContents::SheetNames(names) = read_workbook("params.xlsx", None)? {
///     println!("{:?}", names);
/// }
/// let grid = read_workbook("params.xlsx", Some(SheetSelector::Index(0)))?.into_grid();
/// # Ok::<(), coslib::Error>(())
/// ```
pub fn read_workbook<P: AsRef<Path>>(
    path: P,
    selector: Option<SheetSelector>,
) -> Result<WorkbookContents> {
    match selector {
        None => sheet_names(path).map(WorkbookContents::SheetNames),
        Some(selector) => read_sheet(path, selector).map(WorkbookContents::Grid),
    }
}

/// Sheet names of a workbook, in tab order
pub fn sheet_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    Ok(XlsxReader::sheet_names_file(path)?)
}

/// Read one sheet of a workbook, by name or zero-based index
pub fn read_sheet<P: AsRef<Path>>(path: P, selector: impl Into<SheetSelector>) -> Result<TabularGrid> {
    Ok(XlsxReader::read_sheet_file(path, &selector.into())?)
}

/// Read delimited text into a grid
///
/// Rows are filtered by position only; there is no header handling.
pub fn read_delimited<P: AsRef<Path>>(path: P, options: &DelimitedOptions) -> Result<TabularGrid> {
    Ok(CsvReader::read_file(path, options)?)
}

/// Write a numeric matrix as comma-separated text
pub fn write_delimited<P: AsRef<Path>>(path: P, matrix: &Matrix) -> Result<()> {
    Ok(CsvWriter::write_matrix_file(
        matrix,
        path,
        &CsvWriteOptions::default(),
    )?)
}

/// Write a grid's values as comma-separated text
pub fn write_delimited_grid<P: AsRef<Path>>(path: P, grid: &TabularGrid) -> Result<()> {
    Ok(CsvWriter::write_grid_file(grid, path, &CsvWriteOptions::default())?)
}

/// Read one variable of a MAT file as a matrix
#[cfg(feature = "mat")]
pub fn read_matrix<P: AsRef<Path>>(path: P, variable: &str) -> Result<Matrix> {
    Ok(coslib_mat::MatReader::read_variable(path, variable)?)
}

/// Variable names of a MAT file, in file order
#[cfg(feature = "mat")]
pub fn matrix_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    Ok(coslib_mat::MatReader::variable_names(path)?)
}

/// Write named matrices to an uncompressed MAT file
#[cfg(feature = "mat")]
pub fn write_matrices<P: AsRef<Path>>(path: P, variables: &[(&str, &Matrix)]) -> Result<()> {
    Ok(coslib_mat::MatWriter::write_file(
        path,
        variables,
        &coslib_mat::MatWriteOptions::default(),
    )?)
}
