//! Built multi-sheet document handed to writers.

use crate::sheet::GridSheet;

/// Ordered sheets of one export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridDocument {
    sheets: Vec<GridSheet>,
}

impl GridDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished sheet.
    pub fn push_sheet(&mut self, sheet: GridSheet) {
        self.sheets.push(sheet);
    }

    pub fn sheets(&self) -> &[GridSheet] {
        &self.sheets
    }

    pub fn sheet(&self, sheet_idx: usize) -> Option<&GridSheet> {
        self.sheets.get(sheet_idx)
    }

    pub fn sheet_by_title(&self, title: &str) -> Option<&GridSheet> {
        self.sheets.iter().find(|sheet| sheet.title() == title)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
