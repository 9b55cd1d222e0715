//! Unit tests for export and archive bundling.

use crate::helpers::{TestTableBuilder, csv_upload, empty, num, text};
use data_sweeper::constants::{CSV_MIME, XLSX_MIME};
use data_sweeper::data::{DataError, bundle, export_table, ingest, parse_xlsx_bytes};
use data_sweeper::types::{DataType, FileFormat, Table};
use std::io::{Cursor, Read};

fn sample() -> Table {
    TestTableBuilder::new()
        .column("item", DataType::Text)
        .column("qty", DataType::Number)
        .row(vec![text("bolt, m4"), num(12.0)])
        .row(vec![text("nut"), empty()])
        .build()
}

#[test]
fn test_csv_export_has_no_index_column() {
    let processed = export_table(&sample(), "parts.xlsx", FileFormat::Csv).unwrap();

    assert_eq!(processed.name, "parts.csv");
    assert_eq!(processed.mime_type, CSV_MIME);
    let content = String::from_utf8(processed.bytes).unwrap();
    assert_eq!(content.lines().next(), Some("item,qty"));
}

#[test]
fn test_csv_round_trip_keeps_columns_and_values() {
    let original = "city,temp,rain\nOslo,4.5,true\n\"Rio, BR\",31,false\n";
    let table = ingest(&csv_upload("w.csv", original)).unwrap();
    let processed = export_table(&table, "w.csv", FileFormat::Csv).unwrap();
    let reparsed = ingest(&csv_upload(&processed.name, std::str::from_utf8(&processed.bytes).unwrap())).unwrap();

    assert_eq!(reparsed, table);
}

#[test]
fn test_excel_export_is_single_sheet_without_index() {
    let processed = export_table(&sample(), "parts.csv", FileFormat::Excel).unwrap();

    assert_eq!(processed.name, "parts.xlsx");
    assert_eq!(processed.mime_type, XLSX_MIME);

    let table = parse_xlsx_bytes(&processed.name, &processed.bytes).unwrap();
    assert_eq!(table, sample());
}

#[test]
fn test_bundle_uses_output_names() {
    let a = export_table(&sample(), "a.csv", FileFormat::Excel).unwrap();
    let b = export_table(&sample(), "b.xlsx", FileFormat::Csv).unwrap();

    let archive = bundle(&[a.clone(), b]).unwrap();
    assert_eq!(archive.entries, vec!["a.xlsx", "b.csv"]);

    let mut zip = zip::ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
    let mut stored = Vec::new();
    zip.by_name("a.xlsx").unwrap().read_to_end(&mut stored).unwrap();
    assert_eq!(stored, a.bytes);
}

#[test]
fn test_bundle_of_nothing_fails() {
    let err = bundle(&[]).unwrap_err();
    assert!(matches!(err, DataError::Archive { .. }));
    assert_eq!(err.kind(), "ArchiveError");
}
