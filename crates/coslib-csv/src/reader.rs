//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use coslib_core::{Cell, CellValue, TabularGrid};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a grid
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<TabularGrid> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let grid = Self::read(file, options)?;
        log::debug!(
            "read {}x{} grid from {}",
            grid.row_count(),
            grid.col_count(),
            path.display()
        );
        Ok(grid)
    }

    /// Read CSV from a reader into a grid
    ///
    /// Rows are selected purely by position. Only the kept rows must have
    /// equal lengths, so header blocks of a different width can be skipped
    /// with `start_row`.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<TabularGrid> {
        if options.start_row == 0 {
            return Err(CsvError::InvalidStartRow(0));
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .comment(options.comment)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row_num = Self::row_number(&record, idx, options);
            if options.stop_row.map_or(false, |stop| row_num > stop) {
                break;
            }
            if row_num < options.start_row {
                continue;
            }

            rows.push(
                record
                    .iter()
                    .map(|field| Cell::new(options.assumed_kind, CellValue::text(field)))
                    .collect(),
            );
        }

        Ok(TabularGrid::new(rows)?.with_assumed_kind(options.assumed_kind))
    }

    /// 1-based row number of a record
    ///
    /// Without a comment byte this is the file line, so blank lines (which
    /// the parser drops) still count toward `start_row`/`stop_row`. With
    /// comments enabled, rows are counted over the records that remain.
    fn row_number(record: &csv::StringRecord, idx: usize, options: &CsvReadOptions) -> usize {
        match (options.comment, record.position()) {
            (None, Some(pos)) => pos.line() as usize,
            _ => idx + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coslib_core::{extract_numbers, CellKind};
    use pretty_assertions::assert_eq;

    const DATA: &str = "header one\nheader,two\n1,2\n3,4\n5,6\n";

    #[test]
    fn test_read_defaults_to_text() {
        let grid = CsvReader::read("a,b\nc,d\n".as_bytes(), &CsvReadOptions::default()).unwrap();
        assert_eq!(grid.size(), (2, 2));
        assert_eq!(grid.assumed_kind(), Some(CellKind::Text));
        assert_eq!(grid.cell_at(1, 0), Some(&Cell::text("c")));
    }

    #[test]
    fn test_start_and_stop_rows() {
        let options = CsvReadOptions::numeric().start_row(3).stop_row(4);
        let grid = CsvReader::read(DATA.as_bytes(), &options).unwrap();
        assert_eq!(grid.size(), (2, 2));

        let cell = grid.cell_at(0, 0).unwrap();
        assert_eq!(cell.kind(), CellKind::Number);
        // Raw text is kept; coercion happens on extraction
        assert_eq!(cell.as_text(), Some("1"));

        let m = extract_numbers(&grid, None, None).unwrap();
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_stop_past_end_is_clamped() {
        let options = CsvReadOptions::numeric().start_row(3).stop_row(100);
        let grid = CsvReader::read(DATA.as_bytes(), &options).unwrap();
        assert_eq!(grid.row_count(), 3);
    }

    #[test]
    fn test_start_past_end_is_empty() {
        let options = CsvReadOptions::default().start_row(10);
        let grid = CsvReader::read(DATA.as_bytes(), &options).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_ragged_kept_rows() {
        let err = CsvReader::read(DATA.as_bytes(), &CsvReadOptions::default()).unwrap_err();
        assert!(matches!(err, CsvError::Core(coslib_core::Error::RaggedRow { .. })));
    }

    #[test]
    fn test_blank_lines_count_as_rows() {
        let options = CsvReadOptions::numeric().start_row(4);
        let grid = CsvReader::read("h1\n\nh3\n1,2\n".as_bytes(), &options).unwrap();
        assert_eq!(grid.size(), (1, 2));
        assert_eq!(extract_numbers(&grid, None, None).unwrap().as_slice(), &[1.0, 2.0]);

        let options = CsvReadOptions::numeric().start_row(2).stop_row(3);
        let grid = CsvReader::read("1,2\n\n3,4\n5,6\n".as_bytes(), &options).unwrap();
        assert_eq!(extract_numbers(&grid, None, None).unwrap().as_slice(), &[3.0, 4.0]);
    }

    #[test]
    fn test_comment_lines() {
        let data = "% generated\n1,2\n% note\n3,4\n";
        let options = CsvReadOptions::numeric().comment(b'%');
        let grid = CsvReader::read(data.as_bytes(), &options).unwrap();
        assert_eq!(grid.size(), (2, 2));
    }

    #[test]
    fn test_zero_start_row() {
        let options = CsvReadOptions::default().start_row(0);
        assert!(matches!(
            CsvReader::read(DATA.as_bytes(), &options),
            Err(CsvError::InvalidStartRow(0))
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let err = CsvReader::read_file("/nonexistent/params.csv", &CsvReadOptions::default())
            .unwrap_err();
        assert!(matches!(err, CsvError::Io(_)));
    }
}
