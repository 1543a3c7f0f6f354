//! Shared grid export specification models.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::conf::EnumColumnIdentifier;

////////////////////////////////////////////////////////////////////////////////
// #region CellValue

/// Scalar cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
}

impl EnumCellValue {
    /// Text as a spreadsheet reader would display it; empty for blanks.
    pub fn to_display_text(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::String(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }

    /// Numeric view of the value, when it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for EnumCellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for EnumCellValue {
    fn from(value: i32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for EnumCellValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<EnumCellValue>> From<Option<T>> for EnumCellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Resolved cell format produced by simple styles.
///
/// Fields left as `None` are not set on the cell, so a later overlay only
/// replaces what it names.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<f64>,
    /// Text wrap.
    pub text_wrap: Option<bool>,
    /// Thin border on all sides (`true`) or no border (`false`).
    pub border: Option<bool>,
    /// Border color, `RRGGBB`.
    pub border_color: Option<String>,
    /// Solid background fill color, `RRGGBB`.
    pub bg_color: Option<String>,
    /// Font color, `RRGGBB`.
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            text_wrap: other.text_wrap.or(self.text_wrap),
            border: other.border.or(self.border),
            border_color: other
                .border_color
                .clone()
                .or_else(|| self.border_color.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }

    /// `true` when no property is set.
    pub fn is_empty(&self) -> bool {
        self == &SpecCellFormat::default()
    }
}

/// One cell of a built sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecCell {
    /// Written value; `None` for cells that only carry a format.
    pub value: EnumCellValue,
    /// Accumulated format.
    pub format: SpecCellFormat,
}

/// Column width directive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnumColumnWidth {
    /// Size from content when the document is written.
    Auto,
    /// Fixed width in character units.
    Fixed(f64),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyleOptions

/// Column renderer rule: model value in, render result out.
pub type ColumnRendererFn = Arc<dyn Fn(&EnumCellValue) -> EnumRenderResult + Send + Sync>;
/// Row renderer rule: whole model in, render result out.
pub type RowRendererFn = Arc<dyn Fn(&SpecModel) -> EnumRenderResult + Send + Sync>;

/// Value of one style option entry.
#[derive(Clone)]
pub enum EnumStyleValue {
    /// Text value (colors, font family, `"auto"` width).
    Text(String),
    /// Boolean flag (`multiline`, `border`).
    Flag(bool),
    /// Numeric value (`font-size`, `col-width`).
    Number(f64),
    /// Rule for `col-renderer`.
    ColumnRenderer(ColumnRendererFn),
    /// Rule for `row-renderer`.
    RowRenderer(RowRendererFn),
}

impl fmt::Debug for EnumStyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(val) => f.debug_tuple("Text").field(val).finish(),
            Self::Flag(val) => f.debug_tuple("Flag").field(val).finish(),
            Self::Number(val) => f.debug_tuple("Number").field(val).finish(),
            Self::ColumnRenderer(_) => f.write_str("ColumnRenderer(<fn>)"),
            Self::RowRenderer(_) => f.write_str("RowRenderer(<fn>)"),
        }
    }
}

impl From<&str> for EnumStyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EnumStyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for EnumStyleValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<f64> for EnumStyleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for EnumStyleValue {
    fn from(value: i32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i64> for EnumStyleValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

/// Ordered style-name → value map for one scope.
///
/// Keys are kept as written so unknown names surface as configuration
/// errors when the options are resolved.
#[derive(Debug, Clone, Default)]
pub struct SpecStyleOptions {
    entries: Vec<(String, EnumStyleValue)>,
}

impl SpecStyleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing an earlier entry in place.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<EnumStyleValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Attach a `col-renderer` rule.
    pub fn with_column_renderer<F>(self, rule: F) -> Self
    where
        F: Fn(&EnumCellValue) -> EnumRenderResult + Send + Sync + 'static,
    {
        self.with("col-renderer", EnumStyleValue::ColumnRenderer(Arc::new(rule)))
    }

    /// Attach a `row-renderer` rule.
    pub fn with_row_renderer<F>(self, rule: F) -> Self
    where
        F: Fn(&SpecModel) -> EnumRenderResult + Send + Sync + 'static,
    {
        self.with("row-renderer", EnumStyleValue::RowRenderer(Arc::new(rule)))
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<EnumStyleValue>) {
        let c_name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == c_name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((c_name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&EnumStyleValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnumStyleValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RenderResult

/// Output of a renderer rule.
#[derive(Debug, Clone)]
pub enum EnumRenderResult {
    /// Replace the cell value, keep styling.
    ValueOnly(EnumCellValue),
    /// Replace the cell value and overlay these simple styles.
    ValueWithStyle(EnumCellValue, SpecStyleOptions),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnsAndModels

/// One column definition.
#[derive(Debug, Clone, Default)]
pub struct SpecColumn {
    /// Model attribute key; required in attribute mode.
    pub attribute: Option<String>,
    /// Header label.
    pub label: String,
    /// Column-scope style options.
    pub options: Option<SpecStyleOptions>,
}

impl SpecColumn {
    /// Positional column with a header label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Attribute-addressed column.
    pub fn attribute(attribute: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            attribute: Some(attribute.into()),
            label: label.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: SpecStyleOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// One data row.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecModel {
    /// Attribute-keyed row.
    Attributes(BTreeMap<String, EnumCellValue>),
    /// Positional row, one value per column.
    Positional(Vec<EnumCellValue>),
}

impl SpecModel {
    /// Build an attribute-keyed row from `(key, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<EnumCellValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Attributes(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Build a positional row.
    pub fn from_values<V, I>(values: I) -> Self
    where
        V: Into<EnumCellValue>,
        I: IntoIterator<Item = V>,
    {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Look a value up by attribute name or position.
    pub fn get(&self, identifier: &EnumColumnIdentifier) -> Option<&EnumCellValue> {
        match (self, identifier) {
            (Self::Attributes(dict_values), EnumColumnIdentifier::Name(name)) => {
                dict_values.get(name)
            }
            (Self::Positional(l_values), EnumColumnIdentifier::Index(idx)) => l_values.get(*idx),
            _ => None,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ExportOptions

/// Export configuration surface.
///
/// Per-sheet entries are addressed by zero-based sheet index, i.e. the
/// position of the sheet key in [`crate::source::DataSource::sheet_keys`].
#[derive(Debug, Clone)]
pub struct SpecGridExportOptions {
    /// Column definitions per sheet.
    pub columns: Vec<Vec<SpecColumn>>,
    /// Header-scope options per sheet.
    pub header_options: BTreeMap<usize, SpecStyleOptions>,
    /// Content-scope options per sheet.
    pub content_options: BTreeMap<usize, SpecStyleOptions>,
    /// Row-scope options per sheet; may carry `row-renderer`.
    pub row_options: BTreeMap<usize, SpecStyleOptions>,
    /// Explicit sheet titles; `Table N` titles are generated when empty.
    pub sheet_titles: Vec<String>,
    /// Address model values by column `attribute` instead of position.
    pub if_use_attributes: bool,
}

impl Default for SpecGridExportOptions {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            header_options: BTreeMap::new(),
            content_options: BTreeMap::new(),
            row_options: BTreeMap::new(),
            sheet_titles: Vec::new(),
            if_use_attributes: true,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_left_values_not_overridden() {
        let base = SpecCellFormat {
            font_name: Some("Arial".to_string()),
            bg_color: Some("FFFFFF".to_string()),
            ..Default::default()
        };
        let merged = base.merge(&SpecCellFormat {
            bg_color: Some("FF0000".to_string()),
            border: Some(true),
            ..Default::default()
        });

        assert_eq!(merged.font_name.as_deref(), Some("Arial"));
        assert_eq!(merged.bg_color.as_deref(), Some("FF0000"));
        assert_eq!(merged.border, Some(true));
        assert!(merged.font_color.is_none());
    }

    #[test]
    fn test_style_options_replace_in_place() {
        let options = SpecStyleOptions::new()
            .with("color", "#000000")
            .with("border", true)
            .with("color", "#FF0000");

        let l_keys: Vec<&str> = options.iter().map(|(key, _)| key).collect();
        assert_eq!(l_keys, vec!["color", "border"]);
        assert!(matches!(options.get("color"), Some(EnumStyleValue::Text(c)) if c == "#FF0000"));
    }

    #[test]
    fn test_model_lookup_respects_addressing_mode() {
        let model = SpecModel::from_pairs([("name", EnumCellValue::from("Al"))]);
        assert_eq!(
            model.get(&EnumColumnIdentifier::Name("name".to_string())),
            Some(&EnumCellValue::from("Al"))
        );
        assert_eq!(model.get(&EnumColumnIdentifier::Index(0)), None);

        let model = SpecModel::from_values([1, 2]);
        assert_eq!(
            model.get(&EnumColumnIdentifier::Index(1)),
            Some(&EnumCellValue::Number(2.0))
        );
    }
}
