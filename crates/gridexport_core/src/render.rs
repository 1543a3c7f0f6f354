//! Column and row renderer execution.

use crate::conf::EnumColumnIdentifier;
use crate::error::{ConfigError, Result};
use crate::registry::StyleRegistry;
use crate::sheet::GridSheet;
use crate::spec::{
    ColumnRendererFn, EnumCellValue, EnumRenderResult, RowRendererFn, SpecColumn, SpecModel,
};
use crate::util::RangeResolver;

/// Read-only per-sheet state threaded through the builder and renderers.
#[derive(Debug, Clone, Copy)]
pub struct SpecSheetContext<'a> {
    /// Zero-based sheet index.
    pub sheet_idx: usize,
    /// Column definitions of the sheet.
    pub columns: &'a [SpecColumn],
    /// Row models of the sheet.
    pub models: &'a [SpecModel],
    /// Address values by attribute instead of position.
    pub if_use_attributes: bool,
    /// Canonical ranges for this sheet's shape.
    pub ranges: RangeResolver,
}

impl<'a> SpecSheetContext<'a> {
    pub fn new(
        sheet_idx: usize,
        columns: &'a [SpecColumn],
        models: &'a [SpecModel],
        if_use_attributes: bool,
    ) -> Self {
        Self {
            sheet_idx,
            columns,
            models,
            if_use_attributes,
            ranges: RangeResolver::new(columns.len(), models.len()),
        }
    }

    /// Identifier used to read column `col_idx` from a model.
    pub fn derive_column_identifier(&self, col_idx: usize) -> Result<EnumColumnIdentifier> {
        if !self.if_use_attributes {
            return Ok(EnumColumnIdentifier::Index(col_idx));
        }
        self.columns
            .get(col_idx)
            .and_then(|column| column.attribute.clone())
            .map(EnumColumnIdentifier::Name)
            .ok_or(ConfigError::MissingColumnAttribute {
                sheet_idx: self.sheet_idx,
                col_idx,
            })
    }

    /// Value of column `col_idx` in data row `row_idx`.
    pub fn derive_model_value(&self, row_idx: usize, col_idx: usize) -> Result<&'a EnumCellValue> {
        let identifier = self.derive_column_identifier(col_idx)?;
        let model = self.derive_model(row_idx)?;
        model.get(&identifier).ok_or_else(|| ConfigError::InvalidModel {
            sheet_idx: self.sheet_idx,
            row_idx,
            message: match identifier {
                EnumColumnIdentifier::Name(name) => format!("missing attribute {name:?}"),
                EnumColumnIdentifier::Index(idx) => format!("missing value at position {idx}"),
            },
        })
    }

    fn derive_model(&self, row_idx: usize) -> Result<&'a SpecModel> {
        self.models
            .get(row_idx)
            .ok_or_else(|| ConfigError::InvalidModel {
                sheet_idx: self.sheet_idx,
                row_idx,
                message: "row index out of range".to_string(),
            })
    }
}

/// Run a column renderer over every data row of column `col_idx`.
///
/// `ValueWithStyle` results also style that single cell; `ValueOnly` results
/// replace the value and keep the cell's styling.
pub fn apply_column_renderer(
    sheet: &mut GridSheet,
    ctx: &SpecSheetContext<'_>,
    registry: &StyleRegistry,
    col_idx: usize,
    rule: &ColumnRendererFn,
) -> Result<()> {
    for row_idx in 0..ctx.models.len() {
        let value = ctx.derive_model_value(row_idx, col_idx)?;
        let cell_range = ctx.ranges.data_cell(row_idx, col_idx);

        match rule(value) {
            EnumRenderResult::ValueWithStyle(value_rendered, options) => {
                registry.validate_options(&options)?;
                sheet.write_value(cell_range.row_start, col_idx, value_rendered);
                registry.apply_styles(sheet, &cell_range, &options)?;
            }
            EnumRenderResult::ValueOnly(value_rendered) => {
                sheet.write_value(cell_range.row_start, col_idx, value_rendered);
            }
        }
    }
    Ok(())
}

/// Run a row renderer for data row `row_idx` and style the whole row.
///
/// Only the options of the result are used; a bare value has no meaning at
/// row scope and is rejected.
pub fn apply_row_renderer(
    sheet: &mut GridSheet,
    ctx: &SpecSheetContext<'_>,
    registry: &StyleRegistry,
    row_idx: usize,
    rule: &RowRendererFn,
) -> Result<()> {
    let model = ctx.derive_model(row_idx)?;
    match rule(model) {
        EnumRenderResult::ValueWithStyle(_, options) => {
            registry.apply_styles(sheet, &ctx.ranges.row_range(row_idx), &options)
        }
        EnumRenderResult::ValueOnly(_) => Err(ConfigError::RowRendererValueOnly {
            sheet_idx: ctx.sheet_idx,
            row_idx,
        }),
    }
}
