//! Styles parsing
//!
//! Only the number format of each cell style matters here: it decides
//! whether a numeric cell is a date.

use std::collections::HashMap;
use std::io::{BufReader, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};

/// Number format referenced by a cell style
#[derive(Debug, Clone, PartialEq)]
enum NumberFormat {
    BuiltIn(u32),
    Custom(String),
}

impl NumberFormat {
    fn is_date_format(&self) -> bool {
        match self {
            // 14-22 are the built-in date/time formats, 45-47 the elapsed-time ones
            NumberFormat::BuiltIn(id) => matches!(id, 14..=22 | 45..=47),
            NumberFormat::Custom(code) => is_date_code(code),
        }
    }
}

/// Heuristic for custom format codes
///
/// Bracketed sections (`[Red]`, `[$-409]`) and quoted literals are ignored;
/// what remains is a date if it contains a date or time token.
fn is_date_code(code: &str) -> bool {
    let mut stripped = String::with_capacity(code.len());
    let mut in_bracket = false;
    let mut in_quote = false;
    let mut escaped = false;

    for c in code.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if !in_quote => escaped = true,
            '"' => in_quote = !in_quote,
            '[' if !in_quote => in_bracket = true,
            ']' if !in_quote => in_bracket = false,
            _ if in_quote || in_bracket => {}
            _ => stripped.push(c.to_ascii_lowercase()),
        }
    }

    stripped
        .chars()
        .any(|c| matches!(c, 'y' | 'm' | 'd' | 'h' | 's'))
}

/// Read styles.xml and return, per cell style index, whether it formats dates
pub(crate) fn read_date_styles<R: Read>(reader: R) -> XlsxResult<Vec<bool>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut custom_formats: HashMap<u32, String> = HashMap::new();
    let mut xf_formats: Vec<u32> = Vec::new();
    let mut in_cell_xfs = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"cellXfs" => in_cell_xfs = true,
                b"numFmt" => read_num_fmt(&e, &mut custom_formats)?,
                b"xf" if in_cell_xfs => xf_formats.push(read_xf_num_fmt_id(&e)),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"numFmt" => read_num_fmt(&e, &mut custom_formats)?,
                b"xf" if in_cell_xfs => xf_formats.push(read_xf_num_fmt_id(&e)),
                _ => {}
            },
            Ok(Event::End(e)) if e.name().as_ref() == b"cellXfs" => in_cell_xfs = false,
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(xf_formats
        .into_iter()
        .map(|id| match custom_formats.get(&id) {
            Some(code) => NumberFormat::Custom(code.clone()),
            None => NumberFormat::BuiltIn(id),
        })
        .map(|format| format.is_date_format())
        .collect())
}

fn read_num_fmt(e: &BytesStart<'_>, formats: &mut HashMap<u32, String>) -> XlsxResult<()> {
    let mut id = None;
    let mut code = None;

    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"numFmtId" => {
                let value = attr.unescape_value()?;
                id = Some(value.parse::<u32>().map_err(|_| {
                    XlsxError::Parse(format!("Invalid numFmtId: {}", value))
                })?);
            }
            b"formatCode" => code = Some(attr.unescape_value()?.to_string()),
            _ => {}
        }
    }

    if let (Some(id), Some(code)) = (id, code) {
        formats.insert(id, code);
    }
    Ok(())
}

fn read_xf_num_fmt_id(e: &BytesStart<'_>) -> u32 {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"numFmtId")
        .and_then(|attr| attr.unescape_value().ok().and_then(|v| v.parse().ok()))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_formats() {
        assert!(NumberFormat::BuiltIn(14).is_date_format());
        assert!(NumberFormat::BuiltIn(22).is_date_format());
        assert!(NumberFormat::BuiltIn(46).is_date_format());
        assert!(!NumberFormat::BuiltIn(0).is_date_format());
        assert!(!NumberFormat::BuiltIn(2).is_date_format());
    }

    #[test]
    fn test_custom_formats() {
        assert!(is_date_code("yyyy-mm-dd"));
        assert!(is_date_code("[$-409]d-mmm-yy;@"));
        assert!(is_date_code("hh:mm:ss"));
        assert!(!is_date_code("0.00"));
        assert!(!is_date_code("[Red]0.00"));
        assert!(!is_date_code("0.0\" days\""));
        assert!(!is_date_code("General"));
    }

    #[test]
    fn test_read_date_styles() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <numFmts count="2">
    <numFmt numFmtId="164" formatCode="yyyy\-mm\-dd"/>
    <numFmt numFmtId="165" formatCode="0.000"/>
  </numFmts>
  <cellStyleXfs count="1"><xf numFmtId="0"/></cellStyleXfs>
  <cellXfs count="5">
    <xf numFmtId="0" fontId="0"/>
    <xf numFmtId="14" fontId="0" applyNumberFormat="1"/>
    <xf numFmtId="164" fontId="0" applyNumberFormat="1"/>
    <xf numFmtId="165" fontId="0" applyNumberFormat="1"/>
    <xf fontId="0"><alignment horizontal="left"/></xf>
  </cellXfs>
</styleSheet>"#;

        let styles = read_date_styles(xml.as_bytes()).unwrap();
        assert_eq!(styles, vec![false, true, true, false, false]);
    }
}
