//! `gridexport_core` v1:
//! Layout and style-resolution engine for multi-sheet grid exports.
//!
//! Modules:
//! - `conf`     : constants and default presets
//! - `spec`     : values/formats/options/columns/models
//! - `util`     : coordinate mapping and range resolution
//! - `registry` : style operation registry
//! - `render`   : column/row renderer execution
//! - `sheet`    : sheet model and per-sheet build pipeline
//! - `document` : built multi-sheet document
//! - `source`   : data source contract
//! - `export`   : document build orchestration
//! - `error`    : configuration errors
pub mod conf;
pub mod document;
pub mod error;
pub mod export;
pub mod registry;
pub mod render;
pub mod sheet;
pub mod source;
pub mod spec;
pub mod util;

pub use conf::{
    C_SHEET_TITLE_PREFIX, EnumColumnIdentifier, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX,
    N_NROWS_EXCEL_MAX, N_ROWS_HEADER, TUP_EXCEL_ILLEGAL,
};
pub use document::GridDocument;
pub use error::{ConfigError, Result};
pub use export::{build_document, derive_sheet_titles, validate_export_options};
pub use registry::{EnumStyleKind, SpecStylePlan, StyleRegistry, TUP_STYLE_KINDS};
pub use render::{SpecSheetContext, apply_column_renderer, apply_row_renderer};
pub use sheet::{GridSheet, SpecSheetScopes, build_sheet};
pub use source::{DataSource, InMemorySource};
pub use spec::{
    ColumnRendererFn, EnumCellValue, EnumColumnWidth, EnumRenderResult, EnumStyleValue,
    RowRendererFn, SpecCell, SpecCellFormat, SpecColumn, SpecGridExportOptions, SpecModel,
    SpecStyleOptions,
};
pub use util::{
    RangeResolver, SpecCellRange, cell_coordinate, column_label, range_coordinate,
    validate_sheet_titles,
};
