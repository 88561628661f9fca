//! Cell kinds, values and the [`Cell`] pair

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// The kind of a cell, following the classic spreadsheet cell taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellKind {
    /// No cell at this position
    Empty,
    /// Text value
    Text,
    /// Numeric value
    Number,
    /// Date stored as a spreadsheet serial number
    Date,
    /// Error value (#DIV/0!, #N/A, ...)
    Error,
    /// A cell that exists (e.g. carries formatting) but holds no value
    Blank,
}

impl CellKind {
    /// All kinds, in code order
    pub const ALL: [CellKind; 6] = [
        CellKind::Empty,
        CellKind::Text,
        CellKind::Number,
        CellKind::Date,
        CellKind::Error,
        CellKind::Blank,
    ];

    /// Legacy integer code of this kind
    ///
    /// Code 4 (boolean) of the legacy taxonomy has no kind here; booleans are
    /// read as numbers.
    pub fn code(&self) -> u8 {
        match self {
            CellKind::Empty => 0,
            CellKind::Text => 1,
            CellKind::Number => 2,
            CellKind::Date => 3,
            CellKind::Error => 5,
            CellKind::Blank => 6,
        }
    }

    /// Look up a kind by its legacy integer code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.code() == code)
    }

    /// Get the kind name for error messages
    pub fn name(&self) -> &'static str {
        match self {
            CellKind::Empty => "empty",
            CellKind::Text => "text",
            CellKind::Number => "number",
            CellKind::Date => "date",
            CellKind::Error => "error",
            CellKind::Blank => "blank",
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The raw value held by a cell
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// No value
    #[default]
    Empty,
    /// Numeric value (dates are serial numbers)
    Number(f64),
    /// Text value (also used for error literals such as `#N/A`)
    Text(String),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Try to get the value as a number
    ///
    /// Text is parsed after trimming surrounding whitespace.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Empty => None,
        }
    }

    /// Try to get the value as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// A single typed cell
///
/// The kind decides how consumers interpret the value. The pair is not
/// validated: a delimited-text cell tagged [`CellKind::Number`] still holds
/// its raw text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    kind: CellKind,
    value: CellValue,
}

impl Cell {
    /// Create a cell from a kind and a value
    pub fn new(kind: CellKind, value: impl Into<CellValue>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// A numeric cell
    pub fn number(n: f64) -> Self {
        Self::new(CellKind::Number, n)
    }

    /// A text cell
    pub fn text<S: Into<String>>(s: S) -> Self {
        Self::new(CellKind::Text, CellValue::Text(s.into()))
    }

    /// A date cell holding a spreadsheet serial number
    pub fn date(serial: f64) -> Self {
        Self::new(CellKind::Date, serial)
    }

    /// An empty cell
    pub fn empty() -> Self {
        Self::new(CellKind::Empty, CellValue::Empty)
    }

    /// A blank (present but valueless) cell
    pub fn blank() -> Self {
        Self::new(CellKind::Blank, CellValue::Empty)
    }

    /// The cell kind
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// The raw value
    pub fn value(&self) -> &CellValue {
        &self.value
    }

    /// Consume the cell, returning its value
    pub fn into_value(self) -> CellValue {
        self.value
    }

    /// Same value re-tagged with another kind
    pub fn with_kind(&self, kind: CellKind) -> Self {
        Self {
            kind,
            value: self.value.clone(),
        }
    }

    /// Try to read the value as a number (see [`CellValue::as_number`])
    pub fn as_number(&self) -> Option<f64> {
        self.value.as_number()
    }

    /// Try to read the value as text
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }

    /// Convert a date cell to a calendar date-time
    ///
    /// Returns `None` unless the kind is [`CellKind::Date`] and the serial is a
    /// representable 1900-system date.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        if self.kind != CellKind::Date {
            return None;
        }
        serial_to_datetime(self.value.as_number()?)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::empty()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Convert a 1900-system spreadsheet serial number to a date-time
///
/// Serial 60 is the nonexistent 1900-02-29 and has no date.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 1.0 || (60.0..61.0).contains(&serial) {
        return None;
    }
    // Serials before the phantom leap day are offset by one
    let epoch = if serial < 60.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::milliseconds(millis))
}

/// Convert a date-time to a 1900-system spreadsheet serial number
pub fn datetime_to_serial(dt: NaiveDateTime) -> Option<f64> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let serial = (dt - epoch).num_milliseconds() as f64 / 86_400_000.0;
    if serial < 61.0 {
        // Before the phantom 1900-02-29 the serials are one higher
        let shifted = serial - 1.0;
        return (shifted >= 1.0).then_some(shifted);
    }
    Some(serial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_kind_codes() {
        for kind in CellKind::ALL {
            assert_eq!(CellKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(CellKind::from_code(4), None);
        assert_eq!(CellKind::Number.code(), 2);
    }

    #[test]
    fn test_value_as_number() {
        assert_eq!(CellValue::Number(42.0).as_number(), Some(42.0));
        assert_eq!(CellValue::text(" 1.5e3 ").as_number(), Some(1500.0));
        assert_eq!(CellValue::text("abc").as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn test_kind_value_not_validated() {
        let cell = Cell::new(CellKind::Number, "not a number");
        assert_eq!(cell.kind(), CellKind::Number);
        assert_eq!(cell.as_text(), Some("not a number"));
        assert_eq!(cell.as_number(), None);
    }

    #[test]
    fn test_with_kind() {
        let cell = Cell::text("2.5").with_kind(CellKind::Number);
        assert_eq!(cell.kind(), CellKind::Number);
        assert_eq!(cell.as_number(), Some(2.5));
    }

    #[test]
    fn test_date_conversion() {
        let dt = Cell::date(45000.5).as_datetime().unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 3, 15));
        assert_eq!(dt.hour(), 12);

        let early = Cell::date(1.0).as_datetime().unwrap();
        assert_eq!((early.year(), early.month(), early.day()), (1900, 1, 1));

        assert!(Cell::date(60.0).as_datetime().is_none());

        assert_eq!(datetime_to_serial(dt), Some(45000.5));
        assert_eq!(datetime_to_serial(early), Some(1.0));
        assert!(Cell::number(45000.0).as_datetime().is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::number(3.0).to_string(), "3");
        assert_eq!(Cell::text("abc").to_string(), "abc");
        assert_eq!(Cell::blank().to_string(), "");
    }
}
