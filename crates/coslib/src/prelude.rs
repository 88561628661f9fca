//! Prelude module - common imports for coslib users
//!
//! ```rust
//! use coslib::prelude::*;
//! ```

pub use crate::{
    // Cell model
    Cell,
    CellKind,
    CellValue,
    IndexRange,
    Matrix,
    Section,
    TabularGrid,
    // Sections
    extract_cells,
    extract_numbers,
    extract_section,
    // Sources
    read_delimited,
    read_sheet,
    read_workbook,
    DelimitedOptions,
    SheetSelector,
    WorkbookContents,
    // Parameters
    compile,
    load_parameters,
    CompiledExpression,
    ParameterMap,
    ParameterValue,
    // Analysis
    partition,
    FluxConstants,
    FluxModel,
    MeshRegions,
    Region,
    TimeSeries,
    WindowOptions,
    // Errors
    Error,
    Result,
};
