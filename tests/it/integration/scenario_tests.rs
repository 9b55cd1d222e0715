//! End-to-end scenarios: upload, clean, chart, export and bundle.

use crate::helpers::{TestTableBuilder, column_strings, csv_upload, num, session_with, text, xlsx_upload};
use data_sweeper::constants::XLSX_MIME;
use data_sweeper::data::{DataError, Transform, parse_xlsx_bytes};
use data_sweeper::types::{DataType, FileFormat};
use std::io::Cursor;

#[test]
fn test_fill_missing_then_export_to_excel() {
    let mut session = session_with(vec![csv_upload("a.csv", "x,y\n1,NaN\n2,4\n")]);

    session.apply_transform("a.csv", Transform::FillMissing).unwrap();
    let table = session.file("a.csv").unwrap().table();
    assert_eq!(column_strings(table, "x"), vec!["1", "2"]);
    assert_eq!(column_strings(table, "y"), vec!["4", "4"]);

    session.set_export_format("a.csv", FileFormat::Excel).unwrap();
    let processed = session.export("a.csv").unwrap();
    assert_eq!(processed.name, "a.xlsx");
    assert_eq!(processed.mime_type, XLSX_MIME);

    let reread = parse_xlsx_bytes(&processed.name, &processed.bytes).unwrap();
    assert_eq!(column_strings(&reread, "y"), vec!["4", "4"]);
}

#[test]
fn test_two_files_bundle_into_two_entries() {
    let workbook = TestTableBuilder::new()
        .column("sku", DataType::Text)
        .column("stock", DataType::Number)
        .row(vec![text("A-1"), num(5.0)])
        .build();

    let mut session = session_with(vec![
        xlsx_upload("b.xlsx", &workbook),
        csv_upload("c.csv", "sku,stock\nB-2,7\n"),
    ]);

    session.set_export_format("b.xlsx", FileFormat::Csv).unwrap();
    session.set_export_format("c.csv", FileFormat::Excel).unwrap();
    for (name, result) in session.export_all() {
        assert!(result.is_ok(), "export of {} failed", name);
    }

    let archive = session.bundle().unwrap();
    assert_eq!(archive.name, "processed_files.zip");

    let zip = zip::ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
    let mut names: Vec<&str> = zip.file_names().collect();
    names.sort();
    assert_eq!(names, vec!["b.csv", "c.xlsx"]);
}

#[test]
fn test_unsupported_file_does_not_block_others() {
    let mut session = session_with(Vec::new());
    let report = session.upload(vec![
        csv_upload("d.txt", "a,b\n1,2\n"),
        csv_upload("e.csv", "a,b\n1,2\n"),
    ]);

    assert_eq!(report.accepted, vec!["e.csv"]);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].0, "d.txt");
    assert!(matches!(report.rejected[0].1, DataError::UnsupportedFormat { .. }));
    assert!(session.file("d.txt").is_none());
    assert!(session.export("e.csv").is_ok());
}

#[test]
fn test_single_numeric_column_skips_chart() {
    let session = session_with(vec![csv_upload("f.csv", "name,total\nx,1\ny,2\n")]);

    assert!(session.chart_options("f.csv").unwrap().is_none());
    assert!(session.chart("f.csv").unwrap().is_none());
}

#[test]
fn test_colliding_export_names_bundle_with_unique_entries() {
    let workbook = TestTableBuilder::new()
        .column("n", DataType::Number)
        .row(vec![num(2.0)])
        .build();

    let mut session = session_with(vec![
        csv_upload("a.csv", "n\n1\n"),
        xlsx_upload("a.xlsx", &workbook),
        csv_upload("a (2).csv", "n\n3\n"),
    ]);
    session.set_export_format("a.xlsx", FileFormat::Csv).unwrap();
    for (name, result) in session.export_all() {
        assert!(result.is_ok(), "export of {} failed", name);
    }

    let archive = session.bundle().unwrap();
    assert_eq!(archive.entries.len(), 3);

    let zip = zip::ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
    let mut names: Vec<&str> = zip.file_names().collect();
    names.sort();
    assert_eq!(names, vec!["a (2) (2).csv", "a (2).csv", "a.csv"]);
}
