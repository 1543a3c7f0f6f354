//! Pure helpers for output targets, download headers and width estimation.

use std::path::Path;

use gridexport_core::{EnumCellValue, GridSheet};

use crate::conf::C_CONTENT_TYPE_XLSX;
use crate::error::XlsxExportError;
use crate::spec::{
    EnumExportFormat, EnumExportTarget, SpecAutofitCellsPolicy, SpecXlsxExportTarget,
};

/// Check name and format of an export target and parse its format.
pub fn validate_export_target(
    target: &SpecXlsxExportTarget,
) -> Result<EnumExportFormat, XlsxExportError> {
    let c_file_name = target.file_name.trim();
    if c_file_name.is_empty() {
        return Err(XlsxExportError::InvalidTarget(
            "file_name must not be empty".to_string(),
        ));
    }
    if c_file_name.contains(['/', '\\']) {
        return Err(XlsxExportError::InvalidTarget(format!(
            "file_name must not contain path separators: {c_file_name:?}"
        )));
    }
    if target.file_format.trim().is_empty() {
        return Err(XlsxExportError::InvalidTarget(
            "file_format must not be empty".to_string(),
        ));
    }
    target.file_format.parse()
}

/// Resolve where a target writes: `save_path/file_name`, or memory.
pub fn derive_export_target(target: &SpecXlsxExportTarget) -> EnumExportTarget {
    match &target.save_path {
        Some(dir) => EnumExportTarget::File(dir.join(target.file_name.trim())),
        None => EnumExportTarget::Buffer,
    }
}

/// Download headers for serving a workbook named `file_name`.
pub fn derive_attachment_headers(file_name: &str) -> Vec<(String, String)> {
    let c_file_name = Path::new(file_name)
        .file_name()
        .map(|name| name.to_string_lossy().replace('"', "'"))
        .unwrap_or_else(|| file_name.to_string());

    vec![
        ("Content-Type".to_string(), C_CONTENT_TYPE_XLSX.to_string()),
        (
            "Content-Disposition".to_string(),
            format!("attachment;filename=\"{c_file_name}\""),
        ),
        ("Cache-Control".to_string(), "max-age=0".to_string()),
    ]
}

/// Estimate displayed width units for one cell value.
pub fn estimate_width_len(value: &EnumCellValue) -> usize {
    match value {
        EnumCellValue::None => 0,
        EnumCellValue::String(s) => estimate_unicode_string_width(s),
        other => other.to_display_text().len(),
    }
}

/// Width of `s`, counting wide (non-ASCII) characters as 1.6 units.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

/// Infer the width of column `col_idx` from its header and body values.
///
/// The widest value plus padding is clamped into the policy bounds.
pub fn derive_autofit_width(
    sheet: &GridSheet,
    col_idx: usize,
    policy: &SpecAutofitCellsPolicy,
) -> usize {
    let n_rows_scanned = policy
        .height_body_inferred_max
        .map_or(sheet.n_rows(), |n_max| n_max.min(sheet.n_rows()));

    let n_width_content = (0..=n_rows_scanned)
        .filter_map(|row_idx| sheet.cell(row_idx, col_idx))
        .map(|cell| estimate_width_len(&cell.value))
        .max()
        .unwrap_or(0);

    (n_width_content + policy.width_cell_padding)
        .clamp(policy.width_cell_min, policy.width_cell_max)
}

/// Check autofit bounds before they are used for sizing.
pub fn validate_policy_autofit(policy: &SpecAutofitCellsPolicy) -> Result<(), XlsxExportError> {
    if policy.width_cell_min == 0 {
        return Err(XlsxExportError::InvalidPolicy(
            "width_cell_min must be >= 1".to_string(),
        ));
    }
    if policy.width_cell_max < policy.width_cell_min {
        return Err(XlsxExportError::InvalidPolicy(
            "width_cell_max must be >= width_cell_min".to_string(),
        ));
    }
    Ok(())
}
