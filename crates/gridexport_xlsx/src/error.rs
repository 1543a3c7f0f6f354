//! Errors raised while writing or exporting a workbook.

use gridexport_core::ConfigError;
use polars::prelude::PolarsError;
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XlsxExportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("dataframe error: {0}")]
    Polars(#[from] PolarsError),

    #[error("writer already used; a writer writes one document")]
    WriterClosed,

    #[error("document has no sheets")]
    EmptyDocument,

    #[error("unsupported file format {0:?}")]
    UnsupportedFormat(String),

    #[error("invalid export target: {0}")]
    InvalidTarget(String),

    #[error("invalid autofit policy: {0}")]
    InvalidPolicy(String),

    #[error("{0}")]
    IndexOverflow(String),
}
