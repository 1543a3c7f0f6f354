//! XLSX output constants and default preset factories.

use crate::spec::{SpecAutofitCellsPolicy, SpecXlsxExportTarget};

/// Default output file name.
pub const C_FILE_NAME_DEFAULT: &str = "export.xlsx";
/// Default output format label.
pub const C_FILE_FORMAT_DEFAULT: &str = "Excel2007";
/// Format labels accepted for workbook output (compared case-insensitively).
pub const TUP_FILE_FORMATS_XLSX: [&str; 3] = ["Excel2007", "xlsx", "xlsxwriter"];
/// MIME type of an OOXML workbook.
pub const C_CONTENT_TYPE_XLSX: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
/// Widest column the spreadsheet format accepts, in character units.
pub const N_WIDTH_COLUMN_MAX: f64 = 255.0;

/// Build the default export target: buffered `export.xlsx`, sent as attachment.
pub fn derive_default_export_target() -> SpecXlsxExportTarget {
    SpecXlsxExportTarget::default()
}

/// Build the default autofit policy for `"auto"` column widths.
pub fn derive_default_autofit_policy() -> SpecAutofitCellsPolicy {
    SpecAutofitCellsPolicy::default()
}
