//! XLSX output targets, policies and reports.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::conf::{C_FILE_FORMAT_DEFAULT, C_FILE_NAME_DEFAULT, TUP_FILE_FORMATS_XLSX};
use crate::error::XlsxExportError;

////////////////////////////////////////////////////////////////////////////////
// #region OutputSpecification

/// Workbook serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumExportFormat {
    /// Office Open XML workbook.
    #[default]
    Xlsx,
}

impl FromStr for EnumExportFormat {
    type Err = XlsxExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c_format = s.trim();
        if TUP_FILE_FORMATS_XLSX
            .iter()
            .any(|name| name.eq_ignore_ascii_case(c_format))
        {
            Ok(Self::Xlsx)
        } else {
            Err(XlsxExportError::UnsupportedFormat(s.to_string()))
        }
    }
}

impl fmt::Display for EnumExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xlsx => f.write_str("xlsx"),
        }
    }
}

/// Where a written workbook goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumExportTarget {
    /// Save to this file path.
    File(PathBuf),
    /// Keep the workbook bytes in memory.
    Buffer,
}

/// Result of a workbook write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumExportOutput {
    /// Workbook was saved at this path.
    File(PathBuf),
    /// Serialized workbook bytes.
    Bytes(Vec<u8>),
}

impl EnumExportOutput {
    /// Workbook bytes, when the output was buffered.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::File(_) => None,
        }
    }

    /// Saved file path, when the output went to disk.
    pub fn as_path(&self) -> Option<&PathBuf> {
        match self {
            Self::File(path) => Some(path),
            Self::Bytes(_) => None,
        }
    }
}

/// Output destination settings of one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxExportTarget {
    /// Output file name; also used in attachment headers.
    pub file_name: String,
    /// Format label, one of [`TUP_FILE_FORMATS_XLSX`].
    pub file_format: String,
    /// Directory to save into; `None` buffers the workbook in memory.
    pub save_path: Option<PathBuf>,
    /// Return download headers alongside the output.
    pub if_as_attachment: bool,
    /// Sizing policy for `"auto"` column widths.
    pub policy_autofit: SpecAutofitCellsPolicy,
}

impl Default for SpecXlsxExportTarget {
    fn default() -> Self {
        Self {
            file_name: C_FILE_NAME_DEFAULT.to_string(),
            file_format: C_FILE_FORMAT_DEFAULT.to_string(),
            save_path: None,
            if_as_attachment: true,
            policy_autofit: SpecAutofitCellsPolicy::default(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region AutofitPolicy

/// Width inference policy for columns sized `"auto"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Max body rows scanned per column; `None` scans all rows.
    pub height_body_inferred_max: Option<usize>,
    /// Minimum column width.
    pub width_cell_min: usize,
    /// Maximum column width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            height_body_inferred_max: Some(20_000),
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Summary of one written sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSheetReport {
    /// Worksheet name.
    pub title: String,
    /// Data rows written below the header.
    pub n_rows: usize,
    /// Column count.
    pub n_cols: usize,
    /// Final widths of sized columns, by zero-based column index.
    pub widths: Vec<(usize, f64)>,
}

/// Per-write call report.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecXlsxReport {
    /// Sheets in workbook order.
    pub sheets: Vec<SpecSheetReport>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

/// Everything one export call hands back.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecXlsxExportResult {
    /// File path or workbook bytes.
    pub output: EnumExportOutput,
    /// Download headers; empty unless the target asked for an attachment.
    pub headers: Vec<(String, String)>,
    /// Write report.
    pub report: SpecXlsxReport,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
