//! Parameter loading
//!
//! Parameter sheets hold a block of names next to a block of values. Numeric
//! values become scalars and text values are compiled as anonymous-function
//! expressions; anything else is recorded as absent.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use coslib_core::{extract_cells, Cell, CellKind, CellValue, IndexRange, TabularGrid};
use coslib_expr::{compile, CompiledExpression};
use coslib_xlsx::SheetSelector;

use crate::error::{Error, Result};
use crate::source::read_sheet;

/// A loaded parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// Numeric cell
    Scalar(f64),
    /// Text cell compiled into one callable per sub-expression
    Functions(Vec<CompiledExpression>),
    /// Empty, blank, date or error cell
    Absent,
}

impl ParameterValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            ParameterValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_functions(&self) -> Option<&[CompiledExpression]> {
        match self {
            ParameterValue::Functions(fs) => Some(fs),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ParameterValue::Absent)
    }
}

/// Parameter name to value mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterMap {
    values: AHashMap<String, ParameterValue>,
}

impl ParameterMap {
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// A scalar parameter, or a lookup error if it is missing or not numeric
    pub fn scalar(&self, name: &str) -> Result<f64> {
        match self.values.get(name) {
            Some(ParameterValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(Error::Lookup(format!("parameter '{}' is not a scalar", name))),
            None => Err(Error::Lookup(format!("parameter '{}' not found", name))),
        }
    }

    /// All callables of a function parameter
    pub fn functions(&self, name: &str) -> Result<&[CompiledExpression]> {
        match self.values.get(name) {
            Some(ParameterValue::Functions(fs)) => Ok(fs),
            Some(_) => Err(Error::Lookup(format!(
                "parameter '{}' is not a function",
                name
            ))),
            None => Err(Error::Lookup(format!("parameter '{}' not found", name))),
        }
    }

    /// The first callable of a function parameter
    pub fn function(&self, name: &str) -> Result<&CompiledExpression> {
        self.functions(name)?
            .first()
            .ok_or_else(|| Error::Lookup(format!("parameter '{}' has no expressions", name)))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parameter names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<(String, ParameterValue)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (String, ParameterValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Load parameters from a names section and a values section of a grid
///
/// Both sections are flattened row-major and zipped; they must hold the same
/// number of cells. A name appearing twice keeps the later value.
///
/// # Example
/// ```rust
/// use coslib::{load_parameters, Cell, IndexRange, TabularGrid};
///
/// let grid = TabularGrid::new(vec![
///     vec![Cell::text("a"), Cell::number(1.0)],
///     vec![Cell::text("b"), Cell::text("@(x) 2.*x")],
/// ])?;
/// let rows = IndexRange::span(1, 2)?;
/// let params = load_parameters(
///     &grid,
///     &rows,
///     &IndexRange::new(vec![1])?,
///     &rows,
///     &IndexRange::new(vec![2])?,
/// )?;
/// assert_eq!(params.scalar("a")?, 1.0);
/// assert_eq!(params.function("b")?.call(3.0), 6.0);
/// # Ok::<(), coslib::Error>(())
/// ```
pub fn load_parameters(
    grid: &TabularGrid,
    name_rows: &IndexRange,
    name_cols: &IndexRange,
    value_rows: &IndexRange,
    value_cols: &IndexRange,
) -> Result<ParameterMap> {
    let names = extract_cells(grid, Some(name_rows), Some(name_cols))?;
    let values = extract_cells(grid, Some(value_rows), Some(value_cols))?;

    let name_count = names.iter().map(Vec::len).sum::<usize>();
    let value_count = values.iter().map(Vec::len).sum::<usize>();
    if name_count != value_count {
        return Err(Error::shape("parameter names vs values", name_count, value_count));
    }

    let mut map = AHashMap::with_capacity(name_count);
    for (name, value) in names.iter().flatten().zip(values.iter().flatten()) {
        let key = parameter_name(name);
        let value = parameter_value(&key, value)?;
        if map.insert(key.clone(), value).is_some() {
            log::debug!("parameter '{}' defined more than once, keeping the last", key);
        }
    }

    log::debug!("loaded {} parameters", map.len());
    Ok(ParameterMap { values: map })
}

fn parameter_name(cell: &Cell) -> String {
    match (cell.kind(), cell.value()) {
        (CellKind::Text | CellKind::Number, CellValue::Text(s)) => s.clone(),
        (CellKind::Text | CellKind::Number, CellValue::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn parameter_value(name: &str, cell: &Cell) -> Result<ParameterValue> {
    match cell.kind() {
        CellKind::Text => Ok(ParameterValue::Functions(compile(&cell.to_string())?)),
        CellKind::Number => cell.as_number().map(ParameterValue::Scalar).ok_or_else(|| {
            Error::Format(format!("parameter '{}' value '{}' is not numeric", name, cell))
        }),
        _ => Ok(ParameterValue::Absent),
    }
}

/// A row or column selection in a layout file
///
/// Either an inclusive 1-based span `{ "start": 55, "stop": 75 }` or an
/// explicit index list `[1, 3, 5]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeSpec {
    Span { start: usize, stop: usize },
    Indices(Vec<usize>),
}

impl RangeSpec {
    pub fn to_index_range(&self) -> Result<IndexRange> {
        let range = match self {
            RangeSpec::Span { start, stop } => IndexRange::span(*start, *stop),
            RangeSpec::Indices(indices) => IndexRange::new(indices.clone()),
        };
        range.map_err(|e| Error::Config(e.to_string()))
    }
}

/// Rows and columns of one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionLayout {
    pub rows: RangeSpec,
    pub cols: RangeSpec,
}

/// Where the names and values of one parameter group live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupLayout {
    pub names: SectionLayout,
    pub values: SectionLayout,
}

/// Sheet reference in a layout file: a name or a zero-based index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetRef {
    Index(usize),
    Name(String),
}

impl From<&SheetRef> for SheetSelector {
    fn from(sheet: &SheetRef) -> Self {
        match sheet {
            SheetRef::Index(index) => SheetSelector::Index(*index),
            SheetRef::Name(name) => SheetSelector::Name(name.clone()),
        }
    }
}

/// Layout of a parameter sheet: named groups of name/value sections
///
/// ```json
/// {
///   "sheet": "Parameters",
///   "groups": {
///     "neg": {
///       "names":  { "rows": { "start": 10, "stop": 30 }, "cols": [2] },
///       "values": { "rows": { "start": 10, "stop": 30 }, "cols": [3] }
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterLayout {
    /// Workbook sheet holding the parameters (default: first sheet)
    #[serde(default)]
    pub sheet: Option<SheetRef>,
    pub groups: BTreeMap<String, GroupLayout>,
}

impl ParameterLayout {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Sheet to read, defaulting to the first one
    pub fn sheet_selector(&self) -> SheetSelector {
        self.sheet
            .as_ref()
            .map_or(SheetSelector::Index(0), SheetSelector::from)
    }
}

/// Load every group of a layout from one grid
pub fn load_parameter_groups(
    grid: &TabularGrid,
    layout: &ParameterLayout,
) -> Result<BTreeMap<String, ParameterMap>> {
    layout
        .groups
        .iter()
        .map(|(group, section)| {
            let params = load_parameters(
                grid,
                &section.names.rows.to_index_range()?,
                &section.names.cols.to_index_range()?,
                &section.values.rows.to_index_range()?,
                &section.values.cols.to_index_range()?,
            )?;
            log::debug!("group '{}': {} parameters", group, params.len());
            Ok((group.clone(), params))
        })
        .collect()
}

/// Read the layout's sheet from a workbook and load every group
pub fn load_parameter_workbook<P: AsRef<Path>>(
    path: P,
    layout: &ParameterLayout,
) -> Result<BTreeMap<String, ParameterMap>> {
    let grid = read_sheet(path, layout.sheet_selector())?;
    load_parameter_groups(&grid, layout)
}
