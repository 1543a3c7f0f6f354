//! Grid export constants and default preset factories.

use crate::spec::SpecGridExportOptions;

/// Spreadsheet maximum row count (header included).
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Spreadsheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Sheet title maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet titles.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Number of header rows on every sheet; data starts right below.
pub const N_ROWS_HEADER: usize = 1;
/// Prefix of auto-generated sheet titles (`Table 1`, `Table 2`, ...).
pub const C_SHEET_TITLE_PREFIX: &str = "Table";

/// Column selector reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumColumnIdentifier {
    /// Select by model attribute name.
    Name(String),
    /// Select by zero-based column index.
    Index(usize),
}

/// Build default export options (attribute mode on, no sheets configured).
pub fn derive_default_export_options() -> SpecGridExportOptions {
    SpecGridExportOptions::default()
}

/// Create the auto-generated title for a zero-based sheet index.
pub fn create_default_sheet_title(sheet_idx: usize) -> String {
    format!("{C_SHEET_TITLE_PREFIX} {}", sheet_idx + 1)
}
