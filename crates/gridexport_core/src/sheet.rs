//! Sheet model and the per-sheet build pipeline.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::conf::{N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, N_ROWS_HEADER};
use crate::error::{ConfigError, Result};
use crate::registry::StyleRegistry;
use crate::render::{SpecSheetContext, apply_column_renderer, apply_row_renderer};
use crate::spec::{
    EnumCellValue, EnumColumnWidth, SpecCell, SpecCellFormat, SpecModel, SpecStyleOptions,
};
use crate::util::SpecCellRange;

////////////////////////////////////////////////////////////////////////////////
// #region GridSheet

/// One built sheet: values and formats keyed by zero-based `(row, col)`.
///
/// Row 0 is the header row.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSheet {
    title: String,
    n_cols: usize,
    n_rows: usize,
    cells: BTreeMap<(usize, usize), SpecCell>,
    column_widths: BTreeMap<usize, EnumColumnWidth>,
}

impl GridSheet {
    /// Empty sheet with `n_cols` columns and `n_rows` data rows.
    pub fn new(title: impl Into<String>, n_cols: usize, n_rows: usize) -> Self {
        Self {
            title: title.into(),
            n_cols,
            n_rows,
            cells: BTreeMap::new(),
            column_widths: BTreeMap::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Data row count (header excluded).
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn cell(&self, row_idx: usize, col_idx: usize) -> Option<&SpecCell> {
        self.cells.get(&(row_idx, col_idx))
    }

    /// Values of one sheet row, blank where nothing was written.
    pub fn row_values(&self, row_idx: usize) -> Vec<EnumCellValue> {
        (0..self.n_cols)
            .map(|col_idx| {
                self.cell(row_idx, col_idx)
                    .map(|cell| cell.value.clone())
                    .unwrap_or_default()
            })
            .collect()
    }

    /// All populated cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = ((usize, usize), &SpecCell)> {
        self.cells.iter().map(|(pos, cell)| (*pos, cell))
    }

    pub fn column_widths(&self) -> &BTreeMap<usize, EnumColumnWidth> {
        &self.column_widths
    }

    /// Set a cell value, keeping its format.
    pub fn write_value(&mut self, row_idx: usize, col_idx: usize, value: EnumCellValue) {
        self.cells.entry((row_idx, col_idx)).or_default().value = value;
    }

    /// Overlay `patch` on every cell in `range`.
    pub fn apply_format(&mut self, range: &SpecCellRange, patch: &SpecCellFormat) {
        for pos in range.iter_cells() {
            let cell = self.cells.entry(pos).or_default();
            cell.format = cell.format.merge(patch);
        }
    }

    pub fn set_column_width(&mut self, col_idx: usize, width: EnumColumnWidth) {
        self.column_widths.insert(col_idx, width);
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetScopes

/// Scope options of one sheet, borrowed from the export configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecSheetScopes<'a> {
    /// Header-scope options.
    pub header: Option<&'a SpecStyleOptions>,
    /// Content-scope options.
    pub content: Option<&'a SpecStyleOptions>,
    /// Row-scope options.
    pub row: Option<&'a SpecStyleOptions>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetBuilder

/// Fill and style one sheet.
///
/// Steps run in a fixed order and later steps overwrite earlier ones:
/// header labels, body values, content styles, column styles (width and
/// renderer included), row styles (renderer included), header styles.
pub fn build_sheet(
    title: &str,
    ctx: &SpecSheetContext<'_>,
    scopes: &SpecSheetScopes<'_>,
    registry: &StyleRegistry,
) -> Result<GridSheet> {
    validate_sheet_inputs(ctx, scopes, registry)?;

    let n_cols = ctx.columns.len();
    let n_rows = ctx.models.len();
    let mut sheet = GridSheet::new(title, n_cols, n_rows);

    write_header_row(&mut sheet, ctx);
    write_body_rows(&mut sheet, ctx)?;
    debug!("sheet {title:?}: wrote {n_rows} rows x {n_cols} columns");

    if let Some(options) = scopes.content {
        registry.apply_styles(&mut sheet, &ctx.ranges.content_range(), options)?;
    }
    apply_column_styles(&mut sheet, ctx, registry)?;
    if let Some(options) = scopes.row {
        apply_row_styles(&mut sheet, ctx, registry, options)?;
    }
    if let Some(options) = scopes.header {
        registry.apply_styles(&mut sheet, &ctx.ranges.header_range(), options)?;
    }

    Ok(sheet)
}

fn write_header_row(sheet: &mut GridSheet, ctx: &SpecSheetContext<'_>) {
    for (col_idx, column) in ctx.columns.iter().enumerate() {
        sheet.write_value(0, col_idx, EnumCellValue::String(column.label.clone()));
    }
}

fn write_body_rows(sheet: &mut GridSheet, ctx: &SpecSheetContext<'_>) -> Result<()> {
    for row_idx in 0..ctx.models.len() {
        for col_idx in 0..ctx.columns.len() {
            let value = ctx.derive_model_value(row_idx, col_idx)?;
            sheet.write_value(N_ROWS_HEADER + row_idx, col_idx, value.clone());
        }
    }
    Ok(())
}

fn apply_column_styles(
    sheet: &mut GridSheet,
    ctx: &SpecSheetContext<'_>,
    registry: &StyleRegistry,
) -> Result<()> {
    for (col_idx, column) in ctx.columns.iter().enumerate() {
        let Some(options) = &column.options else {
            continue;
        };

        registry.apply_styles(sheet, &ctx.ranges.column_range(col_idx), options)?;

        if let Some(value) = options.get("col-width") {
            registry.apply_column_width(sheet, col_idx, value)?;
        }
        if let Some(rule) = registry.plan_styles(options)?.column_renderer {
            apply_column_renderer(sheet, ctx, registry, col_idx, &rule)?;
        }
        if options.contains("row-renderer") {
            warn!(
                "sheet {}: 'row-renderer' in options of column {col_idx} is ignored",
                ctx.sheet_idx
            );
        }
    }
    Ok(())
}

fn apply_row_styles(
    sheet: &mut GridSheet,
    ctx: &SpecSheetContext<'_>,
    registry: &StyleRegistry,
    options: &SpecStyleOptions,
) -> Result<()> {
    let plan = registry.plan_styles(options)?;
    for row_idx in 0..ctx.models.len() {
        registry.apply_styles(sheet, &ctx.ranges.row_range(row_idx), options)?;
        if let Some(rule) = &plan.row_renderer {
            apply_row_renderer(sheet, ctx, registry, row_idx, rule)?;
        }
    }
    Ok(())
}

/// Check every sheet-local precondition before anything is written.
pub fn validate_sheet_inputs(
    ctx: &SpecSheetContext<'_>,
    scopes: &SpecSheetScopes<'_>,
    registry: &StyleRegistry,
) -> Result<()> {
    let sheet_idx = ctx.sheet_idx;

    if ctx.columns.is_empty() && !ctx.if_use_attributes {
        return Err(ConfigError::MissingColumns { sheet_idx });
    }
    if ctx.if_use_attributes && ctx.columns.iter().all(|column| column.attribute.is_none()) {
        return Err(ConfigError::NoAttributes { sheet_idx });
    }
    if ctx.columns.len() > N_NCOLS_EXCEL_MAX {
        return Err(ConfigError::SheetTooLarge {
            sheet_idx,
            message: format!(
                "{} columns exceed the limit of {N_NCOLS_EXCEL_MAX}",
                ctx.columns.len()
            ),
        });
    }
    if ctx.models.len() + N_ROWS_HEADER > N_NROWS_EXCEL_MAX {
        return Err(ConfigError::SheetTooLarge {
            sheet_idx,
            message: format!(
                "{} rows plus header exceed the limit of {N_NROWS_EXCEL_MAX}",
                ctx.models.len()
            ),
        });
    }

    for col_idx in 0..ctx.columns.len() {
        ctx.derive_column_identifier(col_idx)?;
    }

    for (row_idx, model) in ctx.models.iter().enumerate() {
        let create_error = |message: String| ConfigError::InvalidModel {
            sheet_idx,
            row_idx,
            message,
        };
        match (model, ctx.if_use_attributes) {
            (SpecModel::Attributes(_), true) => {}
            (SpecModel::Positional(l_values), false) => {
                if l_values.len() != ctx.columns.len() {
                    return Err(create_error(format!(
                        "positional row has {} values, expected {}",
                        l_values.len(),
                        ctx.columns.len()
                    )));
                }
            }
            (SpecModel::Positional(_), true) => {
                return Err(create_error(
                    "positional row given while attribute mode is on".to_string(),
                ));
            }
            (SpecModel::Attributes(_), false) => {
                return Err(create_error(
                    "attribute row given while attribute mode is off".to_string(),
                ));
            }
        }
        for col_idx in 0..ctx.columns.len() {
            ctx.derive_model_value(row_idx, col_idx)?;
        }
    }

    for options in [scopes.header, scopes.content]
        .into_iter()
        .flatten()
        .chain(ctx.columns.iter().filter_map(|column| column.options.as_ref()))
    {
        registry.validate_options(options)?;
    }
    if let Some(options) = scopes.row {
        registry.validate_options(options)?;
        for c_name in ["col-width", "col-renderer"] {
            if options.contains(c_name) {
                warn!("sheet {sheet_idx}: '{c_name}' in row options is ignored");
            }
        }
    }
    for (c_scope, options) in [("header", scopes.header), ("content", scopes.content)] {
        if let Some(options) = options {
            for c_name in ["col-width", "col-renderer", "row-renderer"] {
                if options.contains(c_name) {
                    warn!("sheet {sheet_idx}: '{c_name}' in {c_scope} options is ignored");
                }
            }
        }
    }

    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{EnumRenderResult, SpecColumn};

    fn create_columns() -> Vec<SpecColumn> {
        vec![
            SpecColumn::attribute("name", "Name"),
            SpecColumn::attribute("age", "Age"),
            SpecColumn::attribute("city", "City"),
        ]
    }

    fn create_models() -> Vec<SpecModel> {
        vec![
            SpecModel::from_pairs([
                ("name", EnumCellValue::from("Al")),
                ("age", EnumCellValue::from(30)),
                ("city", EnumCellValue::from("NY")),
            ]),
            SpecModel::from_pairs([
                ("name", EnumCellValue::from("Bo")),
                ("age", EnumCellValue::from(25)),
                ("city", EnumCellValue::from("LA")),
            ]),
        ]
    }

    fn build(
        columns: &[SpecColumn],
        models: &[SpecModel],
        scopes: SpecSheetScopes<'_>,
    ) -> Result<GridSheet> {
        let ctx = SpecSheetContext::new(0, columns, models, true);
        build_sheet("Table 1", &ctx, &scopes, StyleRegistry::global())
    }

    #[test]
    fn test_header_and_body_pass() {
        let sheet = build(&create_columns(), &create_models(), SpecSheetScopes::default()).unwrap();

        assert_eq!(sheet.title(), "Table 1");
        assert_eq!(sheet.n_rows(), 2);
        assert_eq!(
            sheet.row_values(0),
            vec![
                EnumCellValue::from("Name"),
                EnumCellValue::from("Age"),
                EnumCellValue::from("City")
            ]
        );
        assert_eq!(
            sheet.row_values(1),
            vec![
                EnumCellValue::from("Al"),
                EnumCellValue::from(30),
                EnumCellValue::from("NY")
            ]
        );
        assert_eq!(
            sheet.row_values(2),
            vec![
                EnumCellValue::from("Bo"),
                EnumCellValue::from(25),
                EnumCellValue::from("LA")
            ]
        );
    }

    #[test]
    fn test_positional_mode() {
        let columns = vec![SpecColumn::new("X"), SpecColumn::new("Y")];
        let models = vec![SpecModel::from_values([1, 2]), SpecModel::from_values([3, 4])];
        let ctx = SpecSheetContext::new(0, &columns, &models, false);
        let sheet = build_sheet(
            "P",
            &ctx,
            &SpecSheetScopes::default(),
            StyleRegistry::global(),
        )
        .unwrap();

        assert_eq!(
            sheet.row_values(2),
            vec![EnumCellValue::from(3), EnumCellValue::from(4)]
        );
    }

    #[test]
    fn test_positional_length_mismatch() {
        let columns = vec![SpecColumn::new("X"), SpecColumn::new("Y")];
        let models = vec![SpecModel::from_values([1])];
        let ctx = SpecSheetContext::new(2, &columns, &models, false);
        let err = build_sheet(
            "P",
            &ctx,
            &SpecSheetScopes::default(),
            StyleRegistry::global(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidModel {
                sheet_idx: 2,
                row_idx: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_attribute_mode_requires_attributes() {
        let err = build(&[], &create_models(), SpecSheetScopes::default()).unwrap_err();
        assert_eq!(err, ConfigError::NoAttributes { sheet_idx: 0 });

        let columns = vec![SpecColumn::new("Name"), SpecColumn::new("Age")];
        let err = build(&columns, &create_models(), SpecSheetScopes::default()).unwrap_err();
        assert_eq!(err, ConfigError::NoAttributes { sheet_idx: 0 });

        let columns = vec![SpecColumn::attribute("name", "Name"), SpecColumn::new("Age")];
        let err = build(&columns, &create_models(), SpecSheetScopes::default()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingColumnAttribute {
                sheet_idx: 0,
                col_idx: 1
            }
        );
    }

    #[test]
    fn test_style_scopes_target_their_ranges() {
        let header = SpecStyleOptions::new().with("font-family", "Arial");
        let content = SpecStyleOptions::new().with("border", true);
        let row = SpecStyleOptions::new().with("multiline", true);
        let sheet = build(
            &create_columns(),
            &create_models(),
            SpecSheetScopes {
                header: Some(&header),
                content: Some(&content),
                row: Some(&row),
            },
        )
        .unwrap();

        let cell_a1 = sheet.cell(0, 0).unwrap();
        assert_eq!(cell_a1.format.font_name.as_deref(), Some("Arial"));
        assert_eq!(cell_a1.format.border, None);
        assert_eq!(cell_a1.format.text_wrap, None);

        let cell_c3 = sheet.cell(2, 2).unwrap();
        assert_eq!(cell_c3.format.border, Some(true));
        assert_eq!(cell_c3.format.text_wrap, Some(true));
        assert_eq!(cell_c3.format.font_name, None);
    }

    #[test]
    fn test_column_width_and_renderer_from_column_options() {
        let mut columns = create_columns();
        columns[1] = SpecColumn::attribute("age", "Age").with_options(
            SpecStyleOptions::new()
                .with("col-width", "auto")
                .with("background-color", "#EEEEEE")
                .with_column_renderer(|value| match value.as_f64() {
                    Some(age) if age >= 30.0 => EnumRenderResult::ValueWithStyle(
                        EnumCellValue::from("SENIOR"),
                        SpecStyleOptions::new().with("color", "#FF0000"),
                    ),
                    _ => EnumRenderResult::ValueOnly(value.clone()),
                }),
        );
        let sheet = build(&columns, &create_models(), SpecSheetScopes::default()).unwrap();

        assert_eq!(sheet.column_widths().get(&1), Some(&EnumColumnWidth::Auto));

        let cell_b2 = sheet.cell(1, 1).unwrap();
        assert_eq!(cell_b2.value, EnumCellValue::from("SENIOR"));
        assert_eq!(cell_b2.format.font_color.as_deref(), Some("FF0000"));
        assert_eq!(cell_b2.format.bg_color.as_deref(), Some("EEEEEE"));

        let cell_b3 = sheet.cell(2, 1).unwrap();
        assert_eq!(cell_b3.value, EnumCellValue::from(25));
        assert_eq!(cell_b3.format.font_color, None);
        assert_eq!(cell_b3.format.bg_color.as_deref(), Some("EEEEEE"));

        assert_eq!(sheet.cell(0, 1).unwrap().format.bg_color, None);
    }

    #[test]
    fn test_row_renderer_overrides_column_styles() {
        let mut columns = create_columns();
        columns[0] = SpecColumn::attribute("name", "Name")
            .with_options(SpecStyleOptions::new().with("background-color", "#0000FF"));
        let row = SpecStyleOptions::new().with_row_renderer(|model| {
            let if_ny = matches!(
                model,
                SpecModel::Attributes(dict_values)
                    if dict_values.get("city") == Some(&EnumCellValue::from("NY"))
            );
            let options = if if_ny {
                SpecStyleOptions::new().with("background-color", "#00FF00")
            } else {
                SpecStyleOptions::new()
            };
            EnumRenderResult::ValueWithStyle(EnumCellValue::None, options)
        });

        let sheet = build(
            &columns,
            &create_models(),
            SpecSheetScopes {
                row: Some(&row),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(
            sheet.cell(1, 0).unwrap().format.bg_color.as_deref(),
            Some("00FF00")
        );
        assert_eq!(
            sheet.cell(1, 2).unwrap().format.bg_color.as_deref(),
            Some("00FF00")
        );
        assert_eq!(
            sheet.cell(2, 0).unwrap().format.bg_color.as_deref(),
            Some("0000FF")
        );
        assert_eq!(sheet.cell(1, 0).unwrap().value, EnumCellValue::from("Al"));
    }

    #[test]
    fn test_header_styles_run_last() {
        let content = SpecStyleOptions::new().with("color", "#111111");
        let header = SpecStyleOptions::new().with("color", "#222222");
        let sheet = build(
            &create_columns(),
            &create_models(),
            SpecSheetScopes {
                header: Some(&header),
                content: Some(&content),
                row: None,
            },
        )
        .unwrap();

        assert_eq!(
            sheet.cell(0, 0).unwrap().format.font_color.as_deref(),
            Some("222222")
        );
        assert_eq!(
            sheet.cell(1, 0).unwrap().format.font_color.as_deref(),
            Some("111111")
        );
    }

    #[test]
    fn test_unknown_style_aborts_before_output() {
        let header = SpecStyleOptions::new().with("glow", true);
        let err = build(
            &create_columns(),
            &create_models(),
            SpecSheetScopes {
                header: Some(&header),
                ..Default::default()
            },
        )
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::UnknownStyle {
                name: "glow".to_string()
            }
        );
    }

    #[test]
    fn test_sheet_without_rows_only_has_header() {
        let content = SpecStyleOptions::new().with("border", true);
        let sheet = build(
            &create_columns(),
            &[],
            SpecSheetScopes {
                content: Some(&content),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(sheet.n_rows(), 0);
        assert_eq!(sheet.iter_cells().count(), 3);
        assert!(sheet.iter_cells().all(|((row_idx, _), _)| row_idx == 0));
    }
}
