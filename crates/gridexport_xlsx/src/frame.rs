//! Polars-backed data source.

use std::io::Cursor;

use log::debug;
use polars::prelude::{AnyValue, DataFrame, IpcReader, PolarsResult, SerReader};

use gridexport_core::{DataSource, EnumCellValue, InMemorySource, SpecModel};

use crate::error::XlsxExportError;

/// Sheets sourced from polars data frames, one frame per sheet key.
///
/// Rows are converted to models when a frame is added, so the frame does not
/// need to outlive the source.
#[derive(Debug, Clone, Default)]
pub struct DataFrameSource {
    source: InMemorySource,
}

impl DataFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the rows of `df` as sheet `sheet_key`.
    ///
    /// With `if_use_attributes` each row is keyed by column name, otherwise by
    /// column position.
    pub fn push_dataframe(
        &mut self,
        sheet_key: impl Into<String>,
        df: &DataFrame,
        if_use_attributes: bool,
    ) -> Result<(), XlsxExportError> {
        let c_key = sheet_key.into();
        let models = derive_models_from_dataframe(df, if_use_attributes)?;
        debug!(
            "sheet key {c_key:?}: {} rows x {} columns from dataframe",
            df.height(),
            df.width()
        );
        self.source.push_sheet(c_key, models);
        Ok(())
    }

    /// Add sheet `sheet_key` from Polars IPC-serialized frame bytes.
    pub fn push_ipc_bytes(
        &mut self,
        sheet_key: impl Into<String>,
        v_ipc_df: &[u8],
        if_use_attributes: bool,
    ) -> Result<(), XlsxExportError> {
        let df = derive_dataframe_from_ipc_bytes(v_ipc_df)?;
        self.push_dataframe(sheet_key, &df, if_use_attributes)
    }
}

impl DataSource for DataFrameSource {
    fn sheet_keys(&self) -> Vec<String> {
        self.source.sheet_keys()
    }

    fn models_for(&self, sheet_key: &str) -> Option<&[SpecModel]> {
        self.source.models_for(sheet_key)
    }
}

fn derive_dataframe_from_ipc_bytes(v_ipc_df: &[u8]) -> PolarsResult<DataFrame> {
    IpcReader::new(Cursor::new(v_ipc_df)).finish()
}

fn derive_models_from_dataframe(
    df: &DataFrame,
    if_use_attributes: bool,
) -> PolarsResult<Vec<SpecModel>> {
    let l_colnames: Vec<String> = df
        .get_column_names_str()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let l_cols = df.get_columns();

    let mut l_models = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let mut l_values = Vec::with_capacity(l_cols.len());
        for col in l_cols {
            l_values.push(derive_cell_value_from_any_value(col.get(row_idx)?));
        }
        l_models.push(if if_use_attributes {
            SpecModel::from_pairs(l_colnames.iter().cloned().zip(l_values))
        } else {
            SpecModel::from_values(l_values)
        });
    }
    Ok(l_models)
}

fn derive_cell_value_from_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::None,
        AnyValue::String(val) => EnumCellValue::String(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::String(val.to_string()),
        AnyValue::Boolean(val) => EnumCellValue::Boolean(val),
        AnyValue::UInt8(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt16(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt32(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int8(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int16(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int128(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float64(val) => EnumCellValue::Number(val),
        _ => EnumCellValue::String(value.to_string()),
    }
}
