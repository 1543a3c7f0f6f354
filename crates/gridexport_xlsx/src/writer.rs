//! XLSX writer kernel that serializes a built grid document.

use log::{debug, info};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet};

use gridexport_core::{EnumCellValue, EnumColumnWidth, GridDocument, GridSheet, SpecCellFormat};

use crate::conf::N_WIDTH_COLUMN_MAX;
use crate::error::XlsxExportError;
use crate::spec::{
    EnumExportFormat, EnumExportOutput, EnumExportTarget, SpecAutofitCellsPolicy,
    SpecSheetReport, SpecXlsxReport,
};
use crate::util::{derive_autofit_width, validate_policy_autofit};

/// One-shot workbook writer.
///
/// A writer is bound to one target and writes exactly one document; later
/// calls fail with [`XlsxExportError::WriterClosed`].
pub struct XlsxWriter {
    target: EnumExportTarget,
    policy_autofit: SpecAutofitCellsPolicy,
    report: Option<SpecXlsxReport>,
    if_closed: bool,
}

impl XlsxWriter {
    pub fn new(target: EnumExportTarget, policy_autofit: SpecAutofitCellsPolicy) -> Self {
        Self {
            target,
            policy_autofit,
            report: None,
            if_closed: false,
        }
    }

    /// Report of the completed write, if any.
    pub fn report(&self) -> Option<&SpecXlsxReport> {
        self.report.as_ref()
    }

    /// Serialize `document` to the bound target.
    ///
    /// The writer is closed afterwards, also when the write fails.
    pub fn write(
        &mut self,
        document: &GridDocument,
        format: EnumExportFormat,
    ) -> Result<EnumExportOutput, XlsxExportError> {
        if self.if_closed {
            return Err(XlsxExportError::WriterClosed);
        }
        self.if_closed = true;

        validate_policy_autofit(&self.policy_autofit)?;
        if document.is_empty() {
            return Err(XlsxExportError::EmptyDocument);
        }
        let EnumExportFormat::Xlsx = format;

        let mut workbook = Workbook::new();
        let mut report = SpecXlsxReport::default();
        for sheet in document.sheets() {
            write_sheet(&mut workbook, sheet, &self.policy_autofit, &mut report)?;
        }

        let output = match &self.target {
            EnumExportTarget::File(path) => {
                workbook.save(path)?;
                EnumExportOutput::File(path.clone())
            }
            EnumExportTarget::Buffer => EnumExportOutput::Bytes(workbook.save_to_buffer()?),
        };

        info!(
            "wrote {format} workbook: {} sheets, {} warnings",
            report.sheets.len(),
            report.warnings.len()
        );
        self.report = Some(report);
        Ok(output)
    }
}

fn write_sheet(
    workbook: &mut Workbook,
    sheet: &GridSheet,
    policy_autofit: &SpecAutofitCellsPolicy,
    report: &mut SpecXlsxReport,
) -> Result<(), XlsxExportError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet.title())?;

    for ((row_idx, col_idx), cell) in sheet.iter_cells() {
        if cell.value.is_none() && cell.format.is_empty() {
            continue;
        }
        let format = derive_rust_xlsx_format(&cell.format);
        write_cell_with_format(worksheet, row_idx, col_idx, &cell.value, &format)?;
    }

    let mut l_widths = Vec::with_capacity(sheet.column_widths().len());
    for (&col_idx, width) in sheet.column_widths() {
        let n_width = match width {
            EnumColumnWidth::Fixed(val) if *val > N_WIDTH_COLUMN_MAX => {
                report.warn(format!(
                    "sheet {:?} column {col_idx}: width {val} clamped to {N_WIDTH_COLUMN_MAX}",
                    sheet.title()
                ));
                N_WIDTH_COLUMN_MAX
            }
            EnumColumnWidth::Fixed(val) => *val,
            EnumColumnWidth::Auto => derive_autofit_width(sheet, col_idx, policy_autofit) as f64,
        };
        debug!("sheet {:?} column {col_idx}: width {n_width}", sheet.title());
        worksheet.set_column_width(cast_col_num(col_idx)?, n_width)?;
        l_widths.push((col_idx, n_width));
    }

    report.sheets.push(SpecSheetReport {
        title: sheet.title().to_string(),
        n_rows: sheet.n_rows(),
        n_cols: sheet.n_cols(),
        widths: l_widths,
    });
    Ok(())
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), XlsxExportError> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;
    match value {
        EnumCellValue::None => {
            worksheet.write_blank(n_row, n_col, format)?;
        }
        EnumCellValue::String(val) => {
            worksheet.write_string_with_format(n_row, n_col, val, format)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(n_row, n_col, *val, format)?;
        }
        EnumCellValue::Boolean(val) => {
            worksheet.write_boolean_with_format(n_row, n_col, *val, format)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.as_str());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val);
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(derive_color(val));
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(derive_color(val));
    }

    if let Some(val) = spec.border {
        format = format.set_border(if val {
            FormatBorder::Thin
        } else {
            FormatBorder::None
        });
    }
    if let Some(val) = &spec.border_color {
        format = format.set_border_color(derive_color(val));
    }

    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    format
}

/// `RRGGBB` hex to a workbook color; colors are normalized upstream.
fn derive_color(rgb: &str) -> Color {
    u32::from_str_radix(rgb, 16).map_or(Color::Default, Color::RGB)
}

fn cast_row_num(value: usize) -> Result<u32, XlsxExportError> {
    u32::try_from(value)
        .map_err(|_| XlsxExportError::IndexOverflow(format!("row index overflow: {value}")))
}

fn cast_col_num(value: usize) -> Result<u16, XlsxExportError> {
    u16::try_from(value)
        .map_err(|_| XlsxExportError::IndexOverflow(format!("column index overflow: {value}")))
}
