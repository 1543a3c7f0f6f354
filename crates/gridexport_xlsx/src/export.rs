//! One-call export: build the document, then write it.

use log::info;

use gridexport_core::{DataSource, SpecGridExportOptions, build_document};

use crate::error::XlsxExportError;
use crate::spec::{SpecXlsxExportResult, SpecXlsxExportTarget};
use crate::util::{derive_attachment_headers, derive_export_target, validate_export_target};
use crate::writer::XlsxWriter;

/// Build every sheet from `source` and write the workbook to `target`.
///
/// Nothing is written when configuration or any sheet fails to build.
pub fn export_grid<S>(
    options: &SpecGridExportOptions,
    target: &SpecXlsxExportTarget,
    source: &S,
) -> Result<SpecXlsxExportResult, XlsxExportError>
where
    S: DataSource + ?Sized,
{
    let format = validate_export_target(target)?;
    let document = build_document(options, source)?;

    let mut writer = XlsxWriter::new(derive_export_target(target), target.policy_autofit.clone());
    let output = writer.write(&document, format)?;
    let report = writer.report().cloned().unwrap_or_default();

    let headers = if target.if_as_attachment {
        derive_attachment_headers(&target.file_name)
    } else {
        Vec::new()
    };

    info!("exported {:?} ({} sheets)", target.file_name, document.len());
    Ok(SpecXlsxExportResult {
        output,
        headers,
        report,
    })
}
