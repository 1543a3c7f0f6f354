//! Style operation registry.
//!
//! Every style name accepted in a [`SpecStyleOptions`] map is one of the
//! [`EnumStyleKind`] variants below. Simple kinds fold into a
//! [`SpecCellFormat`] patch applied uniformly over a range; structural kinds
//! (`col-width`, `col-renderer`, `row-renderer`) are skipped by
//! [`StyleRegistry::apply_styles`] and invoked by the sheet builder with the
//! right scope.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use log::debug;

use crate::error::{ConfigError, Result};
use crate::sheet::GridSheet;
use crate::spec::{
    ColumnRendererFn, EnumColumnWidth, EnumStyleValue, RowRendererFn, SpecCellFormat,
    SpecStyleOptions,
};
use crate::util::SpecCellRange;

////////////////////////////////////////////////////////////////////////////////
// #region StyleKinds

/// Registered style operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumStyleKind {
    /// `background-color`: solid fill color.
    BackgroundColor,
    /// `color`: font color.
    Color,
    /// `multiline`: wrap text.
    Multiline,
    /// `border`: thin border on all sides, or none.
    Border,
    /// `border-color`: color of all borders.
    BorderColor,
    /// `font-family`: font name.
    FontFamily,
    /// `font-size`: font size in points.
    FontSize,
    /// `col-width`: column width or `"auto"`.
    ColWidth,
    /// `col-renderer`: per-cell value/style rule.
    ColRenderer,
    /// `row-renderer`: per-row style rule.
    RowRenderer,
}

/// All registered kinds.
pub const TUP_STYLE_KINDS: [EnumStyleKind; 10] = [
    EnumStyleKind::BackgroundColor,
    EnumStyleKind::Color,
    EnumStyleKind::Multiline,
    EnumStyleKind::Border,
    EnumStyleKind::BorderColor,
    EnumStyleKind::FontFamily,
    EnumStyleKind::FontSize,
    EnumStyleKind::ColWidth,
    EnumStyleKind::ColRenderer,
    EnumStyleKind::RowRenderer,
];

impl EnumStyleKind {
    /// Configuration name of the style.
    pub fn name(self) -> &'static str {
        match self {
            Self::BackgroundColor => "background-color",
            Self::Color => "color",
            Self::Multiline => "multiline",
            Self::Border => "border",
            Self::BorderColor => "border-color",
            Self::FontFamily => "font-family",
            Self::FontSize => "font-size",
            Self::ColWidth => "col-width",
            Self::ColRenderer => "col-renderer",
            Self::RowRenderer => "row-renderer",
        }
    }

    /// Structural kinds need an explicit column/row scope.
    pub fn is_structural(self) -> bool {
        matches!(self, Self::ColWidth | Self::ColRenderer | Self::RowRenderer)
    }

    fn expected(self) -> &'static str {
        match self {
            Self::BackgroundColor | Self::Color | Self::BorderColor => {
                "a color like '#RRGGBB' or 'RRGGBB'"
            }
            Self::Multiline | Self::Border => "a boolean",
            Self::FontFamily => "a non-empty font name",
            Self::FontSize => "a positive number",
            Self::ColWidth => "a positive number or 'auto'",
            Self::ColRenderer => "a column renderer rule",
            Self::RowRenderer => "a row renderer rule",
        }
    }

    fn create_value_error(self) -> ConfigError {
        ConfigError::InvalidStyleValue {
            name: self.name().to_string(),
            expected: self.expected(),
        }
    }

    /// Check `value` against the kind's value type.
    pub fn validate_value(self, value: &EnumStyleValue) -> Result<()> {
        match self {
            Self::ColWidth => self.derive_column_width(value).map(|_| ()),
            Self::ColRenderer => match value {
                EnumStyleValue::ColumnRenderer(_) => Ok(()),
                _ => Err(self.create_value_error()),
            },
            Self::RowRenderer => match value {
                EnumStyleValue::RowRenderer(_) => Ok(()),
                _ => Err(self.create_value_error()),
            },
            _ => self.apply_to_format(&mut SpecCellFormat::default(), value),
        }
    }

    /// Overlay a simple style onto `fmt`. Structural kinds are left alone.
    pub fn apply_to_format(self, fmt: &mut SpecCellFormat, value: &EnumStyleValue) -> Result<()> {
        match (self, value) {
            (Self::BackgroundColor, EnumStyleValue::Text(color)) => {
                fmt.bg_color = Some(self.derive_color(color)?);
            }
            (Self::Color, EnumStyleValue::Text(color)) => {
                fmt.font_color = Some(self.derive_color(color)?);
            }
            (Self::BorderColor, EnumStyleValue::Text(color)) => {
                fmt.border_color = Some(self.derive_color(color)?);
            }
            (Self::Multiline, EnumStyleValue::Flag(flag)) => {
                fmt.text_wrap = Some(*flag);
            }
            (Self::Border, EnumStyleValue::Flag(flag)) => {
                fmt.border = Some(*flag);
            }
            (Self::FontFamily, EnumStyleValue::Text(name)) if !name.trim().is_empty() => {
                fmt.font_name = Some(name.trim().to_string());
            }
            (Self::FontSize, EnumStyleValue::Number(size)) if size.is_finite() && *size > 0.0 => {
                fmt.font_size = Some(*size);
            }
            (Self::ColWidth | Self::ColRenderer | Self::RowRenderer, _) => {}
            _ => return Err(self.create_value_error()),
        }
        Ok(())
    }

    /// Resolve a `col-width` value.
    pub fn derive_column_width(self, value: &EnumStyleValue) -> Result<EnumColumnWidth> {
        match value {
            EnumStyleValue::Number(width) if width.is_finite() && *width > 0.0 => {
                Ok(EnumColumnWidth::Fixed(*width))
            }
            EnumStyleValue::Text(val) if val.trim().eq_ignore_ascii_case("auto") => {
                Ok(EnumColumnWidth::Auto)
            }
            _ => Err(self.create_value_error()),
        }
    }

    fn derive_color(self, color: &str) -> Result<String> {
        normalize_color(color).ok_or_else(|| self.create_value_error())
    }
}

/// Normalize `#rrggbb` / `RRGGBB` to upper-case `RRGGBB`.
pub fn normalize_color(color: &str) -> Option<String> {
    let c_hex = color.trim().trim_start_matches('#');
    if c_hex.len() == 6 && c_hex.chars().all(|chr| chr.is_ascii_hexdigit()) {
        Some(c_hex.to_ascii_uppercase())
    } else {
        None
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Registry

/// Resolved style options: one format patch plus the structural directives.
#[derive(Clone, Default)]
pub struct SpecStylePlan {
    /// Simple styles folded in entry order.
    pub patch: SpecCellFormat,
    /// `col-width`, when present.
    pub column_width: Option<EnumColumnWidth>,
    /// `col-renderer`, when present.
    pub column_renderer: Option<ColumnRendererFn>,
    /// `row-renderer`, when present.
    pub row_renderer: Option<RowRendererFn>,
}

impl fmt::Debug for SpecStylePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fn_marker = |if_set: bool| if if_set { Some("<fn>") } else { None };
        f.debug_struct("SpecStylePlan")
            .field("patch", &self.patch)
            .field("column_width", &self.column_width)
            .field("column_renderer", &fn_marker(self.column_renderer.is_some()))
            .field("row_renderer", &fn_marker(self.row_renderer.is_some()))
            .finish()
    }
}

/// Immutable name → kind table.
#[derive(Debug)]
pub struct StyleRegistry {
    dict_kinds: BTreeMap<&'static str, EnumStyleKind>,
}

static STYLE_REGISTRY: LazyLock<StyleRegistry> = LazyLock::new(|| StyleRegistry {
    dict_kinds: TUP_STYLE_KINDS
        .iter()
        .map(|kind| (kind.name(), *kind))
        .collect(),
});

impl StyleRegistry {
    /// Process-wide registry instance.
    pub fn global() -> &'static StyleRegistry {
        &STYLE_REGISTRY
    }

    /// Look a style name up; unknown names are configuration errors.
    pub fn resolve(&self, name: &str) -> Result<EnumStyleKind> {
        self.dict_kinds
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownStyle {
                name: name.to_string(),
            })
    }

    /// Resolve and type-check every entry of `options`.
    pub fn plan_styles(&self, options: &SpecStyleOptions) -> Result<SpecStylePlan> {
        let mut plan = SpecStylePlan::default();
        for (c_name, value) in options.iter() {
            let kind = self.resolve(c_name)?;
            match (kind, value) {
                (EnumStyleKind::ColWidth, _) => {
                    plan.column_width = Some(kind.derive_column_width(value)?);
                }
                (EnumStyleKind::ColRenderer, EnumStyleValue::ColumnRenderer(rule)) => {
                    plan.column_renderer = Some(rule.clone());
                }
                (EnumStyleKind::RowRenderer, EnumStyleValue::RowRenderer(rule)) => {
                    plan.row_renderer = Some(rule.clone());
                }
                (EnumStyleKind::ColRenderer | EnumStyleKind::RowRenderer, _) => {
                    kind.validate_value(value)?;
                }
                _ => kind.apply_to_format(&mut plan.patch, value)?,
            }
        }
        Ok(plan)
    }

    /// Validate `options` without applying anything.
    pub fn validate_options(&self, options: &SpecStyleOptions) -> Result<()> {
        self.plan_styles(options).map(|_| ())
    }

    /// Apply the simple styles of `options` to every cell of `range`.
    ///
    /// All keys are resolved first, so an unknown name leaves the sheet
    /// untouched. Structural keys are skipped.
    pub fn apply_styles(
        &self,
        sheet: &mut GridSheet,
        range: &SpecCellRange,
        options: &SpecStyleOptions,
    ) -> Result<()> {
        let plan = self.plan_styles(options)?;
        if !plan.patch.is_empty() {
            sheet.apply_format(range, &plan.patch);
        }
        Ok(())
    }

    /// Structural `col-width` operation.
    pub fn apply_column_width(
        &self,
        sheet: &mut GridSheet,
        col_idx: usize,
        value: &EnumStyleValue,
    ) -> Result<()> {
        let width = EnumStyleKind::ColWidth.derive_column_width(value)?;
        debug!(
            "sheet {:?}: column {col_idx} width {width:?}",
            sheet.title()
        );
        sheet.set_column_width(col_idx, width);
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{EnumCellValue, EnumRenderResult};
    use crate::util::RangeResolver;

    #[test]
    fn test_registry_knows_every_kind_by_name() {
        let registry = StyleRegistry::global();
        for kind in TUP_STYLE_KINDS {
            assert_eq!(registry.resolve(kind.name()).unwrap(), kind);
        }
        assert!(matches!(
            registry.resolve("glow"),
            Err(ConfigError::UnknownStyle { name }) if name == "glow"
        ));
    }

    #[test]
    fn test_normalize_color() {
        assert_eq!(normalize_color("#ff0000").as_deref(), Some("FF0000"));
        assert_eq!(normalize_color("00ff00").as_deref(), Some("00FF00"));
        assert_eq!(normalize_color("red"), None);
        assert_eq!(normalize_color("#FFF"), None);
    }

    #[test]
    fn test_apply_styles_sets_every_cell_in_range() {
        let mut sheet = GridSheet::new("T", 3, 2);
        let ranges = RangeResolver::new(3, 2);
        let options = SpecStyleOptions::new()
            .with("background-color", "#FFEE00")
            .with("border", true)
            .with("font-size", 12);

        StyleRegistry::global()
            .apply_styles(&mut sheet, &ranges.content_range(), &options)
            .unwrap();

        for (row_idx, col_idx) in ranges.content_range().iter_cells() {
            let cell = sheet.cell(row_idx, col_idx).unwrap();
            assert_eq!(cell.format.bg_color.as_deref(), Some("FFEE00"));
            assert_eq!(cell.format.border, Some(true));
            assert_eq!(cell.format.font_size, Some(12.0));
        }
        assert!(sheet.cell(0, 0).is_none());
    }

    #[test]
    fn test_unknown_style_fails_before_any_styling() {
        let mut sheet = GridSheet::new("T", 2, 1);
        let options = SpecStyleOptions::new()
            .with("background-color", "#FFEE00")
            .with("glow", true);

        let err = StyleRegistry::global()
            .apply_styles(&mut sheet, &RangeResolver::new(2, 1).content_range(), &options)
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::UnknownStyle {
                name: "glow".to_string()
            }
        );
        assert!(sheet.cell(1, 0).is_none());
        assert!(sheet.cell(1, 1).is_none());
    }

    #[test]
    fn test_structural_styles_are_skipped_by_apply_styles() {
        let mut sheet = GridSheet::new("T", 1, 1);
        let options = SpecStyleOptions::new()
            .with("col-width", "auto")
            .with_column_renderer(|v| EnumRenderResult::ValueOnly(v.clone()))
            .with_row_renderer(|_| EnumRenderResult::ValueOnly(EnumCellValue::None));

        StyleRegistry::global()
            .apply_styles(&mut sheet, &RangeResolver::new(1, 1).content_range(), &options)
            .unwrap();

        assert!(sheet.cell(1, 0).is_none());
        assert!(sheet.column_widths().is_empty());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let registry = StyleRegistry::global();
        for options in [
            SpecStyleOptions::new().with("color", "blue"),
            SpecStyleOptions::new().with("border", "yes"),
            SpecStyleOptions::new().with("font-size", -1),
            SpecStyleOptions::new().with("font-family", " "),
            SpecStyleOptions::new().with("col-width", "wide"),
            SpecStyleOptions::new().with("col-renderer", true),
        ] {
            assert!(matches!(
                registry.validate_options(&options),
                Err(ConfigError::InvalidStyleValue { .. })
            ));
        }
    }

    #[test]
    fn test_later_entries_win_within_one_map() {
        let plan = StyleRegistry::global()
            .plan_styles(
                &SpecStyleOptions::new()
                    .with("border", true)
                    .with("col-width", 20)
                    .with("multiline", false),
            )
            .unwrap();
        assert_eq!(plan.patch.border, Some(true));
        assert_eq!(plan.patch.text_wrap, Some(false));
        assert_eq!(plan.column_width, Some(EnumColumnWidth::Fixed(20.0)));
        assert!(plan.column_renderer.is_none());
    }

    #[test]
    fn test_plan_debug_hides_renderer_bodies() {
        let plan = StyleRegistry::global()
            .plan_styles(
                &SpecStyleOptions::new()
                    .with("color", "#00FF00")
                    .with_column_renderer(|v| EnumRenderResult::ValueOnly(v.clone())),
            )
            .unwrap();

        let c_debug = format!("{plan:?}");
        assert!(c_debug.contains("column_renderer: Some(\"<fn>\")"));
        assert!(c_debug.contains("row_renderer: None"));
        assert!(c_debug.contains("00FF00"));
    }

    #[test]
    fn test_apply_column_width() {
        let mut sheet = GridSheet::new("T", 2, 0);
        let registry = StyleRegistry::global();
        registry
            .apply_column_width(&mut sheet, 1, &EnumStyleValue::from("auto"))
            .unwrap();
        registry
            .apply_column_width(&mut sheet, 0, &EnumStyleValue::from(15))
            .unwrap();

        assert_eq!(sheet.column_widths().get(&1), Some(&EnumColumnWidth::Auto));
        assert_eq!(
            sheet.column_widths().get(&0),
            Some(&EnumColumnWidth::Fixed(15.0))
        );
    }
}
