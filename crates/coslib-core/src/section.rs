//! Rectangular sections of a grid
//!
//! A section is the intersection of a set of rows and a set of columns. Both
//! sets are 1-based [`IndexRange`]s and default to the full extent of the
//! grid. Entry `[i][j]` of a section is the grid cell at row `rows[i]` and
//! column `cols[j]`.

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::grid::TabularGrid;
use crate::matrix::Matrix;
use crate::range::IndexRange;
use crate::CellKind;

/// A section read from a grid: raw cells, or numbers when the grid assumes
/// every cell is numeric
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    /// Cells, addressed `[row][col]`; `cols` is kept so an empty row
    /// selection still reports its width
    Cells { cells: Vec<Vec<Cell>>, cols: usize },
    /// Numeric values of the same shape
    Numbers(Matrix),
}

impl Section {
    /// `(rows, columns)` of the section
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Section::Cells { cells, cols } => (cells.len(), *cols),
            Section::Numbers(m) => m.shape(),
        }
    }

    /// Borrow the cells, if this is a cell section
    pub fn as_cells(&self) -> Option<&[Vec<Cell>]> {
        match self {
            Section::Cells { cells, .. } => Some(cells),
            Section::Numbers(_) => None,
        }
    }

    /// Borrow the numbers, if this is a numeric section
    pub fn as_numbers(&self) -> Option<&Matrix> {
        match self {
            Section::Numbers(m) => Some(m),
            Section::Cells { .. } => None,
        }
    }

    /// Consume into the numeric matrix, if this is a numeric section
    pub fn into_numbers(self) -> Option<Matrix> {
        match self {
            Section::Numbers(m) => Some(m),
            Section::Cells { .. } => None,
        }
    }
}

/// Extract a section as cells
pub fn extract_cells(
    grid: &TabularGrid,
    rows: Option<&IndexRange>,
    cols: Option<&IndexRange>,
) -> Result<Vec<Vec<Cell>>> {
    let (rows, cols) = resolve(grid, rows, cols)?;
    Ok(rows
        .iter()
        .map(|&r| {
            cols.iter()
                .map(|&c| grid.cell_at(r - 1, c - 1).cloned().unwrap_or_default())
                .collect()
        })
        .collect())
}

/// Extract a section as numbers
///
/// Every selected cell must coerce to a number (numeric value, or text that
/// parses as one).
pub fn extract_numbers(
    grid: &TabularGrid,
    rows: Option<&IndexRange>,
    cols: Option<&IndexRange>,
) -> Result<Matrix> {
    let (rows, cols) = resolve(grid, rows, cols)?;
    let mut data = Vec::with_capacity(rows.len() * cols.len());
    for &r in &rows {
        for &c in &cols {
            let cell = grid.cell_at(r - 1, c - 1);
            let n = cell.and_then(Cell::as_number).ok_or_else(|| Error::NotNumeric {
                row: r,
                col: c,
                text: cell.map(|c| c.to_string()).unwrap_or_default(),
            })?;
            data.push(n);
        }
    }
    Matrix::new(rows.len(), cols.len(), data)
}

/// Extract a section, numeric when the grid assumes [`CellKind::Number`]
pub fn extract_section(
    grid: &TabularGrid,
    rows: Option<&IndexRange>,
    cols: Option<&IndexRange>,
) -> Result<Section> {
    if grid.assumed_kind() == Some(CellKind::Number) {
        extract_numbers(grid, rows, cols).map(Section::Numbers)
    } else {
        let (_, ncols) = grid.size();
        let cols_len = cols.map_or(ncols, IndexRange::len);
        extract_cells(grid, rows, cols).map(|cells| Section::Cells {
            cells,
            cols: cols_len,
        })
    }
}

/// Resolve optional ranges against the grid and bounds-check them
fn resolve(
    grid: &TabularGrid,
    rows: Option<&IndexRange>,
    cols: Option<&IndexRange>,
) -> Result<(Vec<usize>, Vec<usize>)> {
    let (nrows, ncols) = grid.size();
    let rows = rows.cloned().unwrap_or_else(|| IndexRange::full(nrows));
    let cols = cols.cloned().unwrap_or_else(|| IndexRange::full(ncols));

    if let Some(index) = rows.iter().find(|&r| r > nrows) {
        return Err(Error::RowOutOfBounds { index, len: nrows });
    }
    if let Some(index) = cols.iter().find(|&c| c > ncols) {
        return Err(Error::ColumnOutOfBounds { index, len: ncols });
    }

    Ok((rows.into(), cols.into()))
}
