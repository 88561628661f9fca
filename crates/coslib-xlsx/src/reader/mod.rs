//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::read_date_styles;
use coslib_core::{datetime_to_serial, Cell, CellAddress, CellKind, CellValue, TabularGrid};

/// Which sheet of a workbook to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelector {
    /// Sheet by its tab name
    Name(String),
    /// Sheet by zero-based position
    Index(usize),
}

impl From<&str> for SheetSelector {
    fn from(name: &str) -> Self {
        SheetSelector::Name(name.to_string())
    }
}

impl From<usize> for SheetSelector {
    fn from(index: usize) -> Self {
        SheetSelector::Index(index)
    }
}

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// `_x000d_` is CR, `_x000a_` LF, `_x005f_` an escaped underscore.
fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];

        // `_x` + 4 hex digits + `_`
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .filter(|_| candidate.get(6..7) == Some("_"))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    result.push_str(rest);

    result
}

/// Raw state of one `<c>` element while it is being read
#[derive(Debug, Default)]
struct PendingCell {
    address: Option<CellAddress>,
    cell_type: Option<String>,
    style: Option<usize>,
    value: Option<String>,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// List the sheet names of a workbook file, in tab order
    pub fn sheet_names_file<P: AsRef<Path>>(path: P) -> XlsxResult<Vec<String>> {
        let file = File::open(path)?;
        Self::sheet_names(file)
    }

    /// List the sheet names of a workbook, in tab order
    pub fn sheet_names<R: Read + Seek>(reader: R) -> XlsxResult<Vec<String>> {
        let mut archive = Self::open_archive(reader)?;
        let sheets = Self::read_workbook_xml(&mut archive)?;
        Ok(sheets.into_iter().map(|(name, _)| name).collect())
    }

    /// Read one sheet of a workbook file into a grid
    pub fn read_sheet_file<P: AsRef<Path>>(
        path: P,
        selector: &SheetSelector,
    ) -> XlsxResult<TabularGrid> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let grid = Self::read_sheet(file, selector)?;
        log::debug!(
            "read {}x{} grid from sheet {:?} of {}",
            grid.row_count(),
            grid.col_count(),
            selector,
            path.display()
        );
        Ok(grid)
    }

    /// Read one sheet of a workbook into a grid
    ///
    /// The grid spans from A1 to the last used row and column; positions with
    /// no `<c>` element are [`CellKind::Empty`].
    pub fn read_sheet<R: Read + Seek>(
        reader: R,
        selector: &SheetSelector,
    ) -> XlsxResult<TabularGrid> {
        let mut archive = Self::open_archive(reader)?;

        let sheets = Self::read_workbook_xml(&mut archive)?;
        let (name, r_id) = Self::select_sheet(&sheets, selector)?;

        let sheet_paths = Self::read_workbook_rels(&mut archive)?;
        let path = sheet_paths.get(r_id).ok_or_else(|| {
            XlsxError::MissingPart(format!("worksheet relationship {} for '{}'", r_id, name))
        })?;
        log::debug!("sheet '{}' resolved to {}", name, path);

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let date_styles = Self::read_styles(&mut archive)?;

        let cells = Self::read_worksheet(&mut archive, path, &shared_strings, &date_styles)?;
        Ok(Self::build_grid(cells)?)
    }

    fn open_archive<R: Read + Seek>(reader: R) -> XlsxResult<zip::ZipArchive<R>> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        Ok(archive)
    }

    fn select_sheet<'a>(
        sheets: &'a [(String, String)],
        selector: &SheetSelector,
    ) -> XlsxResult<&'a (String, String)> {
        match selector {
            SheetSelector::Name(name) => sheets
                .iter()
                .find(|(sheet, _)| sheet == name)
                .ok_or_else(|| XlsxError::SheetNotFound(name.clone())),
            SheetSelector::Index(index) => {
                sheets
                    .get(*index)
                    .ok_or(XlsxError::SheetIndexOutOfRange {
                        index: *index,
                        count: sheets.len(),
                    })
            }
        }
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"t" if in_si => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        current_string.clear();
                        in_si = false;
                    }
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    current_string.push_str(&e.unescape()?);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    fn read_styles<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<Vec<bool>> {
        match archive.by_name("xl/styles.xml") {
            Ok(file) => read_date_styles(file),
            Err(_) => Ok(Vec::new()),
        }
    }

    /// Read workbook.xml to get sheet names and rIds
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    let mut name = None;
                    let mut r_id = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"name" => name = Some(attr.unescape_value()?.to_string()),
                            b"r:id" => r_id = Some(attr.unescape_value()?.to_string()),
                            _ => {}
                        }
                    }

                    match (name, r_id) {
                        (Some(name), Some(r_id)) => sheets.push((name, r_id)),
                        (name, _) => log::warn!("skipping incomplete sheet entry {:?}", name),
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get sheet file paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => id = Some(attr.unescape_value()?.to_string()),
                            b"Target" => target = Some(attr.unescape_value()?.to_string()),
                            b"Type" => rel_type = Some(attr.unescape_value()?.to_string()),
                            _ => {}
                        }
                    }

                    // Only worksheet relationships matter
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to the xl/ folder unless absolute
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read every `<c>` element of a worksheet
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        shared_strings: &[String],
        date_styles: &[bool],
    ) -> XlsxResult<Vec<(CellAddress, Cell)>> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut cells = Vec::new();

        // Rows and cells may omit their `r` attribute; positions then follow on
        let mut current_row = 0usize;
        let mut next_row = 0usize;
        let mut next_col = 0usize;

        let mut pending: Option<PendingCell> = None;
        let mut in_value = false;
        let mut in_inline_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"row" => {
                        current_row = Self::row_number(&e)?.unwrap_or(next_row);
                        next_row = current_row + 1;
                        next_col = 0;
                    }
                    b"c" => {
                        let cell = Self::start_cell(&e, current_row, next_col)?;
                        pending = Some(cell);
                    }
                    b"v" if pending.is_some() => in_value = true,
                    b"t" if pending.is_some() => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"row" => {
                        current_row = Self::row_number(&e)?.unwrap_or(next_row);
                        next_row = current_row + 1;
                        next_col = 0;
                    }
                    b"c" => {
                        // A self-closing cell carries formatting only
                        let cell = Self::start_cell(&e, current_row, next_col)?;
                        if let Some(address) = cell.address {
                            next_col = address.col + 1;
                            cells.push((address, Cell::blank()));
                        }
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) if in_value || in_inline_text => {
                    if let Some(cell) = pending.as_mut() {
                        cell.value
                            .get_or_insert_with(String::new)
                            .push_str(&e.unescape()?);
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"c" => {
                        if let Some(cell) = pending.take() {
                            if let Some(address) = cell.address {
                                next_col = address.col + 1;
                                let value =
                                    Self::process_cell(&cell, shared_strings, date_styles)?;
                                cells.push((address, value));
                            }
                        }
                    }
                    b"v" => in_value = false,
                    b"t" => in_inline_text = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(cells)
    }

    /// Zero-based row index from a `<row r="...">` element
    fn row_number(e: &BytesStart<'_>) -> XlsxResult<Option<usize>> {
        for attr in e.attributes().flatten() {
            if attr.key.as_ref() == b"r" {
                let value = attr.unescape_value()?;
                let row: usize = value
                    .parse()
                    .map_err(|_| XlsxError::Parse(format!("Invalid row number '{}'", value)))?;
                if row == 0 {
                    return Err(XlsxError::Parse("Row number 0".into()));
                }
                return Ok(Some(row - 1));
            }
        }
        Ok(None)
    }

    fn start_cell(e: &BytesStart<'_>, row: usize, col: usize) -> XlsxResult<PendingCell> {
        let mut cell = PendingCell {
            address: Some(CellAddress::new(row, col)),
            ..PendingCell::default()
        };

        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => {
                    let reference = attr.unescape_value()?;
                    let address = CellAddress::parse(&reference).map_err(|e| {
                        XlsxError::Parse(format!("Invalid cell reference '{}': {}", reference, e))
                    })?;
                    cell.address = Some(address);
                }
                b"t" => cell.cell_type = Some(attr.unescape_value()?.to_string()),
                b"s" => cell.style = attr.unescape_value()?.parse::<usize>().ok(),
                _ => {}
            }
        }

        Ok(cell)
    }

    /// Turn a finished `<c>` element into a typed cell
    fn process_cell(
        cell: &PendingCell,
        shared_strings: &[String],
        date_styles: &[bool],
    ) -> XlsxResult<Cell> {
        let value = match cell.value.as_deref() {
            Some(value) => value,
            // Formatting or a formula without a cached result
            None => return Ok(Cell::blank()),
        };

        let typed = match cell.cell_type.as_deref() {
            // Shared string
            Some("s") => {
                let idx: usize = value.trim().parse().map_err(|_| {
                    XlsxError::Parse(format!("Invalid shared string index: {}", value))
                })?;
                let s = shared_strings.get(idx).ok_or_else(|| {
                    XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
                })?;
                Cell::text(s.clone())
            }

            // Inline or formula string
            Some("inlineStr") | Some("str") => Cell::text(decode_excel_escapes(value)),

            // Boolean, read as 1/0
            Some("b") => {
                let truthy = value == "1" || value.eq_ignore_ascii_case("true");
                Cell::number(if truthy { 1.0 } else { 0.0 })
            }

            // Error literal such as #DIV/0!
            Some("e") => Cell::new(CellKind::Error, CellValue::text(value)),

            // ISO 8601 date
            Some("d") => match parse_iso_datetime(value).and_then(datetime_to_serial) {
                Some(serial) => Cell::date(serial),
                None => {
                    log::warn!("unparseable ISO date '{}', keeping text", value);
                    Cell::text(value)
                }
            },

            // Number (default type or explicit "n")
            None | Some("n") => match value.trim().parse::<f64>() {
                Ok(n) => {
                    let is_date = cell
                        .style
                        .and_then(|idx| date_styles.get(idx).copied())
                        .unwrap_or(false);
                    if is_date {
                        Cell::date(n)
                    } else {
                        Cell::number(n)
                    }
                }
                Err(_) => Cell::text(value),
            },

            Some(other) => {
                log::warn!("unknown cell type '{}', keeping value as text", other);
                Cell::text(value)
            }
        };

        Ok(typed)
    }

    /// Lay cells out on a dense grid spanning A1 to the last used position
    fn build_grid(cells: Vec<(CellAddress, Cell)>) -> coslib_core::Result<TabularGrid> {
        let rows = cells.iter().map(|(a, _)| a.row + 1).max().unwrap_or(0);
        let cols = cells.iter().map(|(a, _)| a.col + 1).max().unwrap_or(0);

        let mut grid = vec![vec![Cell::empty(); cols]; rows];
        for (address, cell) in cells {
            grid[address.row][address.col] = cell;
        }

        TabularGrid::new(grid)
    }
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim().trim_end_matches('Z');
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
</Types>"#;

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
          xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="params" sheetId="1" r:id="rId1"/>
    <sheet name="data" sheetId="2" r:id="rId2"/>
  </sheets>
</workbook>"#;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="/xl/worksheets/sheet2.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

    const SHARED_STRINGS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="4" uniqueCount="4">
  <si><t>a</t></si>
  <si><t>b</t></si>
  <si><t>@(x) sin(x)</t></si>
  <si><r><t>rich</t></r><r><t>text</t></r></si>
</sst>"#;

    const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <cellXfs count="3">
    <xf numFmtId="0"/>
    <xf numFmtId="14" applyNumberFormat="1"/>
    <xf numFmtId="2" applyNumberFormat="1"/>
  </cellXfs>
</styleSheet>"#;

    const SHEET1: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1">
      <c r="A1" t="s"><v>0</v></c>
      <c r="B1" t="s"><v>1</v></c>
      <c r="C1" t="inlineStr"><is><t>c</t></is></c>
    </row>
    <row r="2">
      <c r="A2"><v>1</v></c>
      <c r="B2" t="s"><v>2</v></c>
      <c r="C2" s="2"><f>1+1</f><v>2</v></c>
    </row>
    <row r="4">
      <c r="A4" s="1"><v>45000</v></c>
      <c r="B4" t="b"><v>1</v></c>
      <c r="C4" t="e"><v>#DIV/0!</v></c>
      <c r="E4" s="2"/>
      <c r="F4" t="s"><v>3</v></c>
    </row>
  </sheetData>
</worksheet>"#;

    const SHEET2: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row><c><v>0.5</v></c><c><v>10</v></c></row>
    <row><c><v>1.5</v></c><c t="d"><v>2023-03-15T12:00:00</v></c></row>
  </sheetData>
</worksheet>"#;

    fn build_workbook() -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buffer);
            let options = SimpleFileOptions::default();

            let parts = [
                ("[Content_Types].xml", CONTENT_TYPES),
                ("xl/workbook.xml", WORKBOOK),
                ("xl/_rels/workbook.xml.rels", RELS),
                ("xl/sharedStrings.xml", SHARED_STRINGS),
                ("xl/styles.xml", STYLES),
                ("xl/worksheets/sheet1.xml", SHEET1),
                ("xl/worksheets/sheet2.xml", SHEET2),
            ];
            for (name, content) in parts {
                zip.start_file(name, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buffer.into_inner()
    }

    fn read(selector: SheetSelector) -> XlsxResult<TabularGrid> {
        XlsxReader::read_sheet(Cursor::new(build_workbook()), &selector)
    }

    #[test]
    fn test_sheet_names() {
        let names = XlsxReader::sheet_names(Cursor::new(build_workbook())).unwrap();
        assert_eq!(names, vec!["params".to_string(), "data".to_string()]);
    }

    #[test]
    fn test_read_by_name() {
        let grid = read(SheetSelector::from("params")).unwrap();
        assert_eq!(grid.size(), (4, 6));

        assert_eq!(grid.cell_at(0, 0), Some(&Cell::text("a")));
        assert_eq!(grid.cell_at(0, 2), Some(&Cell::text("c")));
        assert_eq!(grid.cell_at(1, 0), Some(&Cell::number(1.0)));
        assert_eq!(grid.cell_at(1, 1), Some(&Cell::text("@(x) sin(x)")));
        // Formula cells contribute their cached value
        assert_eq!(grid.cell_at(1, 2), Some(&Cell::number(2.0)));
    }

    #[test]
    fn test_cell_kinds() {
        let grid = read(SheetSelector::Index(0)).unwrap();

        assert_eq!(grid.cell_at(3, 0), Some(&Cell::date(45000.0)));
        assert_eq!(grid.cell_at(3, 1), Some(&Cell::number(1.0)));
        assert_eq!(
            grid.cell_at(3, 2),
            Some(&Cell::new(CellKind::Error, "#DIV/0!"))
        );
        assert_eq!(grid.cell_at(3, 3).map(Cell::kind), Some(CellKind::Empty));
        assert_eq!(grid.cell_at(3, 4).map(Cell::kind), Some(CellKind::Blank));
        assert_eq!(grid.cell_at(3, 5), Some(&Cell::text("richtext")));

        // Row 3 is missing from the sheet entirely
        assert!(grid.row(2).unwrap().iter().all(|c| c.kind() == CellKind::Empty));
    }

    #[test]
    fn test_positions_without_references() {
        let grid = read(SheetSelector::from("data")).unwrap();
        assert_eq!(grid.size(), (2, 2));
        assert_eq!(grid.cell_at(1, 0), Some(&Cell::number(1.5)));
        assert_eq!(grid.cell_at(1, 1), Some(&Cell::date(45000.5)));
    }

    #[test]
    fn test_missing_sheet() {
        assert!(matches!(
            read(SheetSelector::from("nope")),
            Err(XlsxError::SheetNotFound(name)) if name == "nope"
        ));
        assert!(matches!(
            read(SheetSelector::Index(2)),
            Err(XlsxError::SheetIndexOutOfRange { index: 2, count: 2 })
        ));
    }

    #[test]
    fn test_not_a_workbook() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buffer);
            zip.start_file("readme.txt", SimpleFileOptions::default())
                .unwrap();
            zip.write_all(b"hello").unwrap();
            zip.finish().unwrap();
        }
        buffer.set_position(0);
        assert!(matches!(
            XlsxReader::sheet_names(buffer),
            Err(XlsxError::InvalidFormat(_))
        ));

        assert!(matches!(
            XlsxReader::sheet_names(Cursor::new(b"plain text".to_vec())),
            Err(XlsxError::Zip(_))
        ));
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.xlsx");
        std::fs::write(&path, build_workbook()).unwrap();

        assert_eq!(XlsxReader::sheet_names_file(&path).unwrap().len(), 2);
        let grid = XlsxReader::read_sheet_file(&path, &SheetSelector::Index(1)).unwrap();
        assert_eq!(grid.row_count(), 2);
    }

    #[test]
    fn test_decode_excel_escapes() {
        assert_eq!(decode_excel_escapes("a_x000a_b"), "a\nb");
        assert_eq!(decode_excel_escapes("snake_x005f_case"), "snake_case");
        assert_eq!(decode_excel_escapes("_xyz_"), "_xyz_");
        assert_eq!(decode_excel_escapes("tail_x00"), "tail_x00");
    }
}
