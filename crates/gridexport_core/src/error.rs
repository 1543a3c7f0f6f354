//! Configuration error type shared by every stage of the export.

use thiserror::Error;

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Fatal configuration error. Any variant aborts the whole export.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// `columns` is empty.
    #[error("'columns' must be set")]
    MissingColumnsConfig,

    /// The data source returned no sheet keys.
    #[error("data source returned no sheets")]
    NoSheets,

    /// Explicit titles do not match the number of sheets.
    #[error("size of 'sheet_titles' ({n_titles}) does not match count of sheets ({n_sheets})")]
    TitleCountMismatch {
        /// Supplied title count.
        n_titles: usize,
        /// Sheet key count from the data source.
        n_sheets: usize,
    },

    /// Sheet title violates spreadsheet naming rules.
    #[error("invalid title for sheet {sheet_idx} ({title:?}): {reason}")]
    InvalidSheetTitle {
        /// Zero-based sheet index.
        sheet_idx: usize,
        /// Offending title.
        title: String,
        /// Rule that was broken.
        reason: String,
    },

    /// No column sequence configured for the sheet.
    #[error("no columns defined for sheet {sheet_idx}")]
    MissingColumns {
        /// Zero-based sheet index.
        sheet_idx: usize,
    },

    /// Attribute mode is on but the columns yield no attributes.
    #[error("no attributes defined in 'columns' for sheet {sheet_idx}")]
    NoAttributes {
        /// Zero-based sheet index.
        sheet_idx: usize,
    },

    /// Attribute mode is on and one column has no `attribute`.
    #[error("column {col_idx} of sheet {sheet_idx} has no attribute")]
    MissingColumnAttribute {
        /// Zero-based sheet index.
        sheet_idx: usize,
        /// Zero-based column index.
        col_idx: usize,
    },

    /// The data source has no models for the sheet key.
    #[error("no data for sheet {sheet_idx} (key {sheet_key:?}) defined in data source")]
    MissingRowData {
        /// Zero-based sheet index.
        sheet_idx: usize,
        /// Data source key.
        sheet_key: String,
    },

    /// Model shape does not fit the addressing mode.
    #[error("row {row_idx} of sheet {sheet_idx}: {message}")]
    InvalidModel {
        /// Zero-based sheet index.
        sheet_idx: usize,
        /// Zero-based data row index.
        row_idx: usize,
        /// What is wrong with the model.
        message: String,
    },

    /// Sheet exceeds spreadsheet row or column limits.
    #[error("sheet {sheet_idx} too large: {message}")]
    SheetTooLarge {
        /// Zero-based sheet index.
        sheet_idx: usize,
        /// Which limit was hit.
        message: String,
    },

    /// Style name is not in the registry.
    #[error("style function '{name}' is undefined")]
    UnknownStyle {
        /// Offending style name.
        name: String,
    },

    /// Style value has the wrong type or is out of range.
    #[error("invalid value for style '{name}': expected {expected}")]
    InvalidStyleValue {
        /// Style name.
        name: String,
        /// Accepted value description.
        expected: &'static str,
    },

    /// A row renderer returned a bare value instead of value + options.
    #[error("row renderer for row {row_idx} of sheet {sheet_idx} returned a value without options")]
    RowRendererValueOnly {
        /// Zero-based sheet index.
        sheet_idx: usize,
        /// Zero-based data row index.
        row_idx: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = ConfigError::UnknownStyle {
            name: "glow".to_string(),
        };
        assert_eq!(err.to_string(), "style function 'glow' is undefined");

        let err = ConfigError::TitleCountMismatch {
            n_titles: 3,
            n_sheets: 2,
        };
        assert!(err.to_string().contains("(3)"));
        assert!(err.to_string().contains("(2)"));
    }
}
