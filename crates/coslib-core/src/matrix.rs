//! Dense numeric matrix

use std::ops::Index;

use crate::error::{Error, Result};

/// A dense, row-major matrix of `f64`
///
/// This is the numeric view of a grid section and the value type of
/// matrix-file variables.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a matrix from row-major data
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if rows * cols != data.len() {
            return Err(Error::MatrixShape {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a matrix filled with zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create a matrix from a list of rows
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::RaggedRow {
                    row: idx + 1,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Create a matrix from column-major data
    pub fn from_column_major(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if rows * cols != data.len() {
            return Err(Error::MatrixShape {
                rows,
                cols,
                len: data.len(),
            });
        }
        let mut out = Vec::with_capacity(data.len());
        for r in 0..rows {
            for c in 0..cols {
                out.push(data[c * rows + r]);
            }
        }
        Ok(Self {
            rows,
            cols,
            data: out,
        })
    }

    /// An `n x 1` matrix
    pub fn column_vector(values: Vec<f64>) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values,
        }
    }

    /// A `1 x n` matrix
    pub fn row_vector(values: Vec<f64>) -> Self {
        Self {
            rows: 1,
            cols: values.len(),
            data: values,
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of values
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the matrix holds no values
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a value by 0-based row and column
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Borrow a row
    ///
    /// # Panics
    /// If `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Copy a column out
    ///
    /// # Panics
    /// If `col` is out of bounds.
    pub fn column(&self, col: usize) -> Vec<f64> {
        assert!(col < self.cols, "column {} out of bounds", col);
        (0..self.rows).map(|r| self.data[r * self.cols + col]).collect()
    }

    /// Row-major values
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consume into row-major values
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Values in column-major order
    pub fn to_column_major(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                out.push(self.data[r * self.cols + c]);
            }
        }
        out
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}
