//! `gridexport_xlsx` v1:
//! XLSX output for grid documents built by `gridexport_core`.
//!
//! Modules:
//! - `conf`   : constants and default presets
//! - `spec`   : targets/policies/reports
//! - `util`   : pure helper functions
//! - `writer` : `rust_xlsxwriter` writer kernel
//! - `frame`  : polars data source
//! - `export` : build-and-write entry point
//! - `error`  : writer/export errors
pub mod conf;
pub mod error;
pub mod export;
pub mod frame;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_CONTENT_TYPE_XLSX, C_FILE_FORMAT_DEFAULT, C_FILE_NAME_DEFAULT, N_WIDTH_COLUMN_MAX,
    TUP_FILE_FORMATS_XLSX, derive_default_autofit_policy, derive_default_export_target,
};
pub use error::XlsxExportError;
pub use export::export_grid;
pub use frame::DataFrameSource;
pub use spec::{
    EnumExportFormat, EnumExportOutput, EnumExportTarget, SpecAutofitCellsPolicy,
    SpecSheetReport, SpecXlsxExportResult, SpecXlsxExportTarget, SpecXlsxReport,
};
pub use util::{
    derive_attachment_headers, derive_autofit_width, derive_export_target,
    estimate_unicode_string_width, estimate_width_len, validate_export_target,
    validate_policy_autofit,
};
pub use writer::XlsxWriter;
