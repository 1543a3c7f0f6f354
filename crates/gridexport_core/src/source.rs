//! Data source contract and an in-memory implementation.

use crate::spec::SpecModel;

/// Supplies sheet keys and the row models of each sheet.
pub trait DataSource {
    /// Ordered sheet identifiers; one sheet is built per key.
    fn sheet_keys(&self) -> Vec<String>;

    /// Row models for `sheet_key`, or `None` when the key has no data.
    fn models_for(&self, sheet_key: &str) -> Option<&[SpecModel]>;
}

/// Sheets held as plain vectors of models.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    l_sheets: Vec<(String, Vec<SpecModel>)>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheets keyed by their position (`"0"`, `"1"`, ...).
    pub fn from_sheets(sheets: Vec<Vec<SpecModel>>) -> Self {
        Self {
            l_sheets: sheets
                .into_iter()
                .enumerate()
                .map(|(n_idx, models)| (n_idx.to_string(), models))
                .collect(),
        }
    }

    /// Builder form of [`Self::push_sheet`].
    pub fn with_sheet(mut self, sheet_key: impl Into<String>, models: Vec<SpecModel>) -> Self {
        self.push_sheet(sheet_key, models);
        self
    }

    /// Append a sheet under `sheet_key`, replacing an existing one in place.
    pub fn push_sheet(&mut self, sheet_key: impl Into<String>, models: Vec<SpecModel>) {
        let c_key = sheet_key.into();
        match self.l_sheets.iter_mut().find(|(key, _)| *key == c_key) {
            Some(entry) => entry.1 = models,
            None => self.l_sheets.push((c_key, models)),
        }
    }
}

impl DataSource for InMemorySource {
    fn sheet_keys(&self) -> Vec<String> {
        self.l_sheets.iter().map(|(key, _)| key.clone()).collect()
    }

    fn models_for(&self, sheet_key: &str) -> Option<&[SpecModel]> {
        self.l_sheets
            .iter()
            .find(|(key, _)| key == sheet_key)
            .map(|(_, models)| models.as_slice())
    }
}
