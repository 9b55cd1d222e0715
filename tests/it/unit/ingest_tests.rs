//! Unit tests for upload ingestion.

use crate::helpers::{TestTableBuilder, csv_upload, num, text, xlsx_upload};
use data_sweeper::data::{DataError, UploadedFile, detect_format, ingest, ingest_with_limit};
use data_sweeper::types::{DataCell, DataType, FileFormat};

#[test]
fn test_csv_upload_infers_types() {
    let upload = csv_upload("sales.csv", "region,units,price,active\nnorth,3,9.5,true\nsouth,,12,false\n");
    let table = ingest(&upload).unwrap();

    let types: Vec<DataType> = table.columns.iter().map(|c| c.data_type).collect();
    assert_eq!(
        types,
        vec![DataType::Text, DataType::Number, DataType::Number, DataType::Boolean]
    );
    assert_eq!(table.rows[1].cells[1], DataCell::Empty);
    assert_eq!(table.rows[1].cells[2], DataCell::Number(12.0));
}

#[test]
fn test_csv_preserves_row_order() {
    let upload = csv_upload("order.csv", "id\n3\n1\n2\n");
    let table = ingest(&upload).unwrap();
    let ids: Vec<String> = table.column_cells(0).map(|c| c.to_string()).collect();
    assert_eq!(ids, vec!["3", "1", "2"]);
}

#[test]
fn test_xlsx_upload_reads_first_sheet() {
    let source = TestTableBuilder::new()
        .column("name", DataType::Text)
        .column("score", DataType::Number)
        .row(vec![text("Ada"), num(91.0)])
        .row(vec![text("Grace"), num(88.5)])
        .build();

    let table = ingest(&xlsx_upload("scores.xlsx", &source)).unwrap();
    assert_eq!(table, source);
}

#[test]
fn test_unsupported_extension_is_rejected_before_parsing() {
    // Valid CSV content does not help a .txt file
    let upload = csv_upload("d.txt", "a,b\n1,2\n");
    match ingest(&upload) {
        Err(DataError::UnsupportedFormat { extension }) => assert_eq!(extension, ".txt"),
        other => panic!("Expected UnsupportedFormat, got {:?}", other),
    }
}

#[test]
fn test_corrupt_workbook_is_parse_error() {
    let upload = UploadedFile::new("broken.xlsx", b"PK\x03\x04 truncated".to_vec());
    let err = ingest(&upload).unwrap_err();
    assert_eq!(err.kind(), "ParseError");
    assert!(err.to_string().starts_with("Error reading broken.xlsx"));
}

#[test]
fn test_uppercase_extensions_are_recognized() {
    assert_eq!(detect_format("A.CSV").unwrap(), FileFormat::Csv);
    assert_eq!(detect_format("B.XLSX").unwrap(), FileFormat::Excel);
}

#[test]
fn test_size_limit_applies_per_upload() {
    let upload = csv_upload("big.csv", &"1\n".repeat(1_100_000));
    assert!(matches!(ingest_with_limit(&upload, 1), Err(DataError::TooLarge { .. })));
    assert!(ingest_with_limit(&upload, 10).is_ok());
}
