//! Document build orchestration across sheets.

use log::{debug, info};

use crate::conf::create_default_sheet_title;
use crate::document::GridDocument;
use crate::error::{ConfigError, Result};
use crate::registry::StyleRegistry;
use crate::render::SpecSheetContext;
use crate::sheet::{SpecSheetScopes, build_sheet};
use crate::source::DataSource;
use crate::spec::SpecGridExportOptions;
use crate::util::validate_sheet_titles;

/// Validate base options that do not depend on the data source.
pub fn validate_export_options(options: &SpecGridExportOptions) -> Result<()> {
    if options.columns.is_empty() {
        return Err(ConfigError::MissingColumnsConfig);
    }
    Ok(())
}

/// Resolve final sheet titles for `n_sheets` sheets.
///
/// Explicit titles must match the sheet count; otherwise `Table N` titles
/// are generated.
pub fn derive_sheet_titles(
    options: &SpecGridExportOptions,
    n_sheets: usize,
) -> Result<Vec<String>> {
    let l_titles = if options.sheet_titles.is_empty() {
        (0..n_sheets).map(create_default_sheet_title).collect()
    } else if options.sheet_titles.len() != n_sheets {
        return Err(ConfigError::TitleCountMismatch {
            n_titles: options.sheet_titles.len(),
            n_sheets,
        });
    } else {
        options.sheet_titles.clone()
    };

    validate_sheet_titles(&l_titles)?;
    Ok(l_titles)
}

/// Build every sheet of the export into one document.
///
/// Any error aborts the whole build and no document is returned.
pub fn build_document<S>(options: &SpecGridExportOptions, source: &S) -> Result<GridDocument>
where
    S: DataSource + ?Sized,
{
    validate_export_options(options)?;
    let registry = StyleRegistry::global();

    let l_sheet_keys = source.sheet_keys();
    if l_sheet_keys.is_empty() {
        return Err(ConfigError::NoSheets);
    }
    let l_titles = derive_sheet_titles(options, l_sheet_keys.len())?;

    let mut document = GridDocument::new();
    for (sheet_idx, (c_sheet_key, c_title)) in l_sheet_keys.iter().zip(&l_titles).enumerate() {
        let columns = options
            .columns
            .get(sheet_idx)
            .ok_or(ConfigError::MissingColumns { sheet_idx })?;
        let models = source
            .models_for(c_sheet_key)
            .ok_or_else(|| ConfigError::MissingRowData {
                sheet_idx,
                sheet_key: c_sheet_key.clone(),
            })?;

        let ctx = SpecSheetContext::new(sheet_idx, columns, models, options.if_use_attributes);
        let scopes = SpecSheetScopes {
            header: options.header_options.get(&sheet_idx),
            content: options.content_options.get(&sheet_idx),
            row: options.row_options.get(&sheet_idx),
        };

        debug!("building sheet {sheet_idx} ({c_title:?}) from key {c_sheet_key:?}");
        document.push_sheet(build_sheet(c_title, &ctx, &scopes, registry)?);
    }

    info!(
        "built grid document: {} sheets, {} data rows",
        document.len(),
        document.sheets().iter().map(|sheet| sheet.n_rows()).sum::<usize>()
    );
    Ok(document)
}
