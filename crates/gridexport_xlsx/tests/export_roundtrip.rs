use std::collections::BTreeMap;

use gridexport_core::{
    EnumCellValue, EnumRenderResult, InMemorySource, SpecColumn, SpecGridExportOptions, SpecModel,
    SpecStyleOptions, build_document,
};
use gridexport_xlsx::{
    DataFrameSource, EnumExportFormat, EnumExportOutput, EnumExportTarget, SpecXlsxExportTarget,
    XlsxExportError, XlsxWriter, export_grid,
};
use polars::prelude::{Column, DataFrame};

fn create_user_options() -> SpecGridExportOptions {
    let columns = vec![
        SpecColumn::attribute("name", "Name")
            .with_options(SpecStyleOptions::new().with("col-width", "auto")),
        SpecColumn::attribute("age", "Age").with_options(
            SpecStyleOptions::new()
                .with("col-width", 12)
                .with_column_renderer(|value| match value.as_f64() {
                    Some(age) if age >= 30.0 => EnumRenderResult::ValueWithStyle(
                        EnumCellValue::from("SENIOR"),
                        SpecStyleOptions::new().with("color", "#FF0000"),
                    ),
                    _ => EnumRenderResult::ValueOnly(value.clone()),
                }),
        ),
    ];

    SpecGridExportOptions {
        columns: vec![columns.clone(), columns],
        header_options: BTreeMap::from([(
            0,
            SpecStyleOptions::new()
                .with("background-color", "DDDDDD")
                .with("border", true),
        )]),
        content_options: BTreeMap::from([(1, SpecStyleOptions::new().with("font-size", 9))]),
        sheet_titles: vec!["Users".to_string(), "Archive".to_string()],
        ..Default::default()
    }
}

fn create_user_source() -> InMemorySource {
    InMemorySource::new()
        .with_sheet(
            "users",
            vec![
                SpecModel::from_pairs([
                    ("name", EnumCellValue::from("Al")),
                    ("age", EnumCellValue::from(30)),
                ]),
                SpecModel::from_pairs([
                    ("name", EnumCellValue::from("Bo")),
                    ("age", EnumCellValue::from(25)),
                ]),
            ],
        )
        .with_sheet("archive", vec![])
}

#[test]
fn test_export_grid_to_file() {
    let dir_tmp = tempfile::tempdir().unwrap();
    let target = SpecXlsxExportTarget {
        file_name: "users.xlsx".to_string(),
        save_path: Some(dir_tmp.path().to_path_buf()),
        ..Default::default()
    };

    let result = export_grid(&create_user_options(), &target, &create_user_source()).unwrap();

    let path_expected = dir_tmp.path().join("users.xlsx");
    assert_eq!(result.output, EnumExportOutput::File(path_expected.clone()));
    let v_bytes = std::fs::read(&path_expected).unwrap();
    assert!(v_bytes.starts_with(b"PK"));

    let l_titles: Vec<&str> = result
        .report
        .sheets
        .iter()
        .map(|sheet| sheet.title.as_str())
        .collect();
    assert_eq!(l_titles, vec!["Users", "Archive"]);
    assert_eq!(result.report.sheets[0].widths, vec![(0, 8.0), (1, 12.0)]);
    assert_eq!(
        result.headers[1].1,
        "attachment;filename=\"users.xlsx\"".to_string()
    );
}

#[test]
fn test_built_document_matches_written_layout() {
    let document = build_document(&create_user_options(), &create_user_source()).unwrap();
    let sheet = document.sheet_by_title("Users").unwrap();

    assert_eq!(
        sheet.row_values(0),
        vec![EnumCellValue::from("Name"), EnumCellValue::from("Age")]
    );
    assert_eq!(sheet.cell(1, 1).unwrap().value, EnumCellValue::from("SENIOR"));
    assert_eq!(sheet.cell(2, 1).unwrap().value, EnumCellValue::from(25));
    assert_eq!(sheet.cell(0, 0).unwrap().format.border, Some(true));

    let mut writer = XlsxWriter::new(EnumExportTarget::Buffer, Default::default());
    let output = writer.write(&document, EnumExportFormat::Xlsx).unwrap();
    assert!(output.as_bytes().unwrap().starts_with(b"PK"));
    assert!(matches!(
        writer.write(&document, EnumExportFormat::Xlsx),
        Err(XlsxExportError::WriterClosed)
    ));
}

#[test]
fn test_failed_build_writes_nothing() {
    let dir_tmp = tempfile::tempdir().unwrap();
    let target = SpecXlsxExportTarget {
        save_path: Some(dir_tmp.path().to_path_buf()),
        ..Default::default()
    };
    let mut options = create_user_options();
    options
        .content_options
        .insert(0, SpecStyleOptions::new().with("glow", true));

    let err = export_grid(&options, &target, &create_user_source()).unwrap_err();
    assert!(matches!(err, XlsxExportError::Config(_)));
    assert!(!dir_tmp.path().join("export.xlsx").exists());
}

#[test]
fn test_unsupported_format_is_rejected_before_build() {
    let target = SpecXlsxExportTarget {
        file_format: "Excel5".to_string(),
        ..Default::default()
    };
    let err = export_grid(&create_user_options(), &target, &create_user_source()).unwrap_err();
    assert!(matches!(err, XlsxExportError::UnsupportedFormat(name) if name == "Excel5"));
}

#[test]
fn test_export_from_dataframe_source() {
    let df = DataFrame::new(vec![
        Column::new("name".into(), ["Al", "Bo", "Cy"]),
        Column::new("age".into(), [30i64, 25, 41]),
    ])
    .unwrap();

    let mut source = DataFrameSource::new();
    source.push_dataframe("users", &df, false).unwrap();

    let options = SpecGridExportOptions {
        columns: vec![vec![SpecColumn::new("Name"), SpecColumn::new("Age")]],
        if_use_attributes: false,
        ..Default::default()
    };

    let document = build_document(&options, &source).unwrap();
    let sheet = document.sheet(0).unwrap();
    assert_eq!(sheet.n_rows(), 3);
    assert_eq!(
        sheet.row_values(3),
        vec![EnumCellValue::from("Cy"), EnumCellValue::from(41)]
    );

    let result = export_grid(&options, &SpecXlsxExportTarget::default(), &source).unwrap();
    assert!(result.output.as_bytes().unwrap().starts_with(b"PK"));
}
