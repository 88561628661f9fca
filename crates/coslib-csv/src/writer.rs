//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use coslib_core::{Matrix, TabularGrid};

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a numeric matrix to a CSV file
    ///
    /// Numbers use the shortest representation that reads back to the same
    /// `f64`.
    pub fn write_matrix_file<P: AsRef<Path>>(
        matrix: &Matrix,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write_matrix(matrix, file, options)
    }

    /// Write a numeric matrix to a writer
    pub fn write_matrix<W: Write>(
        matrix: &Matrix,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let mut csv_writer = Self::builder(options).from_writer(writer);

        for row in 0..matrix.rows() {
            let record: Vec<String> = matrix.row(row).iter().map(|v| v.to_string()).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write a grid's cell values to a CSV file
    pub fn write_grid_file<P: AsRef<Path>>(
        grid: &TabularGrid,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write_grid(grid, file, options)
    }

    /// Write a grid's cell values to a writer
    pub fn write_grid<W: Write>(
        grid: &TabularGrid,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let mut csv_writer = Self::builder(options).from_writer(writer);

        for row in grid.rows() {
            let record: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    fn builder(options: &CsvWriteOptions) -> csv::WriterBuilder {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator);
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CsvReadOptions, CsvReader};
    use coslib_core::{extract_numbers, Cell};

    #[test]
    fn test_write_matrix() {
        let m = Matrix::from_rows(vec![vec![1.0, 0.1], vec![-2.5, 1e-12]]).unwrap();
        let mut out = Vec::new();
        CsvWriter::write_matrix(&m, &mut out, &CsvWriteOptions::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1,0.1\n-2.5,0.000000000001\n");
    }

    #[test]
    fn test_matrix_round_trip() {
        let m = Matrix::from_rows(vec![
            vec![0.0, 1.0 / 3.0, std::f64::consts::PI],
            vec![6.02214076e23, -1.5e-9, 42.0],
        ])
        .unwrap();

        let mut out = Vec::new();
        CsvWriter::write_matrix(&m, &mut out, &CsvWriteOptions::default()).unwrap();

        let grid = CsvReader::read(out.as_slice(), &CsvReadOptions::numeric()).unwrap();
        assert_eq!(extract_numbers(&grid, None, None).unwrap(), m);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        let m = Matrix::from_rows(vec![vec![0.0, 10.0], vec![0.5, 20.25]]).unwrap();

        CsvWriter::write_matrix_file(&m, &path, &CsvWriteOptions::default()).unwrap();
        let grid = CsvReader::read_file(&path, &CsvReadOptions::numeric()).unwrap();

        assert_eq!(extract_numbers(&grid, None, None).unwrap(), m);
    }

    #[test]
    fn test_write_grid_quotes_fields() {
        let grid = TabularGrid::new(vec![vec![Cell::text("@(x) x, 2*x"), Cell::number(3.0)]])
            .unwrap();
        let mut out = Vec::new();
        CsvWriter::write_grid(&grid, &mut out, &CsvWriteOptions::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\"@(x) x, 2*x\",3\n");
    }
}
