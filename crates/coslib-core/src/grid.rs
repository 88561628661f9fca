//! Rectangular grid of cells

use crate::cell::{Cell, CellKind, CellValue};
use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// A rectangular grid of cells read from a tabular source
///
/// Every row has the same number of cells; this is checked when the grid is
/// built. Sources without native typing (delimited text) record the kind they
/// assumed for every cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabularGrid {
    rows: Vec<Vec<Cell>>,
    cols: usize,
    assumed_kind: Option<CellKind>,
}

impl TabularGrid {
    /// Build a grid from rows of cells
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::RaggedRow {
                    row: idx + 1,
                    expected: cols,
                    actual: row.len(),
                });
            }
        }
        Ok(Self {
            rows,
            cols,
            assumed_kind: None,
        })
    }

    /// Build a grid from raw values, tagging every cell with `kind`
    ///
    /// The grid records `kind` as its assumed kind.
    pub fn from_values<V>(values: Vec<Vec<V>>, kind: CellKind) -> Result<Self>
    where
        V: Into<CellValue>,
    {
        let rows = values
            .into_iter()
            .map(|row| row.into_iter().map(|v| Cell::new(kind, v)).collect())
            .collect();
        Ok(Self::new(rows)?.with_assumed_kind(kind))
    }

    /// Build a numeric grid from a matrix
    pub fn from_matrix(matrix: &Matrix) -> Self {
        let rows = (0..matrix.rows())
            .map(|r| matrix.row(r).iter().map(|&v| Cell::number(v)).collect())
            .collect();
        Self {
            rows,
            cols: matrix.cols(),
            assumed_kind: Some(CellKind::Number),
        }
    }

    /// Record a uniform kind assumption for this grid
    pub fn with_assumed_kind(mut self, kind: CellKind) -> Self {
        self.assumed_kind = Some(kind);
        self
    }

    /// The uniform kind assumption, if any
    pub fn assumed_kind(&self) -> Option<CellKind> {
        self.assumed_kind
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn col_count(&self) -> usize {
        self.cols
    }

    /// `(rows, columns)`
    pub fn size(&self) -> (usize, usize) {
        (self.rows.len(), self.cols)
    }

    /// Check if the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols == 0
    }

    /// Get a cell by 0-based row and column
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Get a row by 0-based index
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rectangular() {
        let grid = TabularGrid::new(vec![
            vec![Cell::text("a"), Cell::number(1.0)],
            vec![Cell::text("b"), Cell::number(2.0)],
        ])
        .unwrap();

        assert_eq!(grid.size(), (2, 2));
        assert_eq!(grid.assumed_kind(), None);
        assert_eq!(grid.cell_at(1, 1), Some(&Cell::number(2.0)));
        assert_eq!(grid.cell_at(2, 0), None);
    }

    #[test]
    fn test_new_ragged() {
        let err = TabularGrid::new(vec![
            vec![Cell::number(1.0), Cell::number(2.0)],
            vec![Cell::number(3.0)],
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            Error::RaggedRow {
                row: 2,
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_from_values() {
        let grid =
            TabularGrid::from_values(vec![vec!["1", "2"], vec!["3", "4"]], CellKind::Number)
                .unwrap();

        assert_eq!(grid.assumed_kind(), Some(CellKind::Number));
        let cell = grid.cell_at(0, 1).unwrap();
        assert_eq!(cell.kind(), CellKind::Number);
        assert_eq!(cell.as_text(), Some("2"));
    }

    #[test]
    fn test_empty() {
        let grid = TabularGrid::new(Vec::new()).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.size(), (0, 0));
    }
}
