//! Stateless coordinate and range helpers.

use std::collections::BTreeSet;
use std::fmt;

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, N_ROWS_HEADER, TUP_EXCEL_ILLEGAL};
use crate::error::{ConfigError, Result};

////////////////////////////////////////////////////////////////////////////////
// #region CoordinateMapping

/// Convert a zero-based column index to its column label (`0 -> A`, `26 -> AA`).
///
/// Bijective base-26: there is no zero digit, so every index maps to a
/// distinct label.
pub fn column_label(index: usize) -> String {
    let mut l_chars = Vec::new();
    let mut n_idx = index;
    loop {
        l_chars.push((b'A' + (n_idx % 26) as u8) as char);
        if n_idx < 26 {
            break;
        }
        n_idx = n_idx / 26 - 1;
    }
    l_chars.iter().rev().collect()
}

/// Build `"<label><row>"` from a 1-based row and a zero-based column.
pub fn cell_coordinate(row: usize, col_idx: usize) -> String {
    format!("{}{row}", column_label(col_idx))
}

/// Build `"<cell>:<cell>"` from 1-based rows and zero-based columns.
pub fn range_coordinate(
    row_start: usize,
    row_end: usize,
    col_start: usize,
    col_end: usize,
) -> String {
    format!(
        "{}:{}",
        cell_coordinate(row_start, col_start),
        cell_coordinate(row_end, col_end)
    )
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellRange

/// Inclusive rectangular cell range, zero-based (row 0 is the header row).
///
/// A range whose end precedes its start is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecCellRange {
    /// First row (inclusive).
    pub row_start: usize,
    /// Last row (inclusive).
    pub row_end: usize,
    /// First column (inclusive).
    pub col_start: usize,
    /// Last column (inclusive).
    pub col_end: usize,
}

impl SpecCellRange {
    /// Single-cell range.
    pub fn cell(row_idx: usize, col_idx: usize) -> Self {
        Self {
            row_start: row_idx,
            row_end: row_idx,
            col_start: col_idx,
            col_end: col_idx,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_end < self.row_start || self.col_end < self.col_start
    }

    /// Iterate `(row_idx, col_idx)` pairs row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (n_col_start, n_col_end) = (self.col_start, self.col_end);
        (self.row_start..=self.row_end).flat_map(move |row_idx| {
            (n_col_start..=n_col_end).map(move |col_idx| (row_idx, col_idx))
        })
    }

    /// Range string in spreadsheet notation (`A2:C3`).
    pub fn to_coordinate(&self) -> String {
        range_coordinate(
            self.row_start + 1,
            self.row_end + 1,
            self.col_start,
            self.col_end,
        )
    }
}

impl fmt::Display for SpecCellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_coordinate())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RangeResolver

/// Canonical styling ranges of one sheet.
///
/// Row 1 is always the header; data rows start at row 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeResolver {
    n_cols: usize,
    n_rows: usize,
}

impl RangeResolver {
    /// `n_rows` counts data rows only. `n_cols` is raised to at least 1 so
    /// the header range always spans column A.
    pub fn new(n_cols: usize, n_rows: usize) -> Self {
        Self {
            n_cols: n_cols.max(1),
            n_rows,
        }
    }

    /// Header row across all columns (`A1:C1`).
    pub fn header_range(&self) -> SpecCellRange {
        SpecCellRange {
            row_start: 0,
            row_end: N_ROWS_HEADER - 1,
            col_start: 0,
            col_end: self.n_cols - 1,
        }
    }

    /// All data rows across all columns (`A2:C<R+1>`). Empty without rows.
    pub fn content_range(&self) -> SpecCellRange {
        SpecCellRange {
            row_start: N_ROWS_HEADER,
            row_end: N_ROWS_HEADER + self.n_rows - 1,
            col_start: 0,
            col_end: self.n_cols - 1,
        }
    }

    /// One data row across all columns.
    pub fn row_range(&self, row_idx: usize) -> SpecCellRange {
        SpecCellRange {
            row_start: N_ROWS_HEADER + row_idx,
            row_end: N_ROWS_HEADER + row_idx,
            col_start: 0,
            col_end: self.n_cols - 1,
        }
    }

    /// One column across all data rows. Empty without rows.
    pub fn column_range(&self, col_idx: usize) -> SpecCellRange {
        SpecCellRange {
            row_start: N_ROWS_HEADER,
            row_end: N_ROWS_HEADER + self.n_rows - 1,
            col_start: col_idx,
            col_end: col_idx,
        }
    }

    /// Single data cell (`row_idx` is a data row index).
    pub fn data_cell(&self, row_idx: usize, col_idx: usize) -> SpecCellRange {
        SpecCellRange::cell(N_ROWS_HEADER + row_idx, col_idx)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetTitles

/// Validate titles against spreadsheet naming rules and uniqueness.
pub fn validate_sheet_titles(titles: &[String]) -> Result<()> {
    let mut set_titles_seen = BTreeSet::new();
    for (sheet_idx, c_title) in titles.iter().enumerate() {
        let create_error = |reason: String| ConfigError::InvalidSheetTitle {
            sheet_idx,
            title: c_title.clone(),
            reason,
        };

        if c_title.trim().is_empty() {
            return Err(create_error("title is empty".to_string()));
        }
        if c_title.chars().count() > N_LEN_EXCEL_SHEET_NAME_MAX {
            return Err(create_error(format!(
                "longer than {N_LEN_EXCEL_SHEET_NAME_MAX} characters"
            )));
        }
        if let Some(c_illegal) = TUP_EXCEL_ILLEGAL.iter().find(|c| c_title.contains(**c)) {
            return Err(create_error(format!("contains illegal character {c_illegal:?}")));
        }
        if !set_titles_seen.insert(c_title.to_lowercase()) {
            return Err(create_error("duplicate title".to_string()));
        }
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
