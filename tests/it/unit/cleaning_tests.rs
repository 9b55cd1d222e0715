//! Unit tests for cleaning transforms and their properties.

use crate::helpers::{TestTableBuilder, empty, num, text};
use data_sweeper::data::Transform;
use data_sweeper::types::{DataCell, DataType, Table};

fn messy_table() -> Table {
    TestTableBuilder::new()
        .column("Name", DataType::Text)
        .column("Age", DataType::Number)
        .column("Score", DataType::Number)
        .column("Notes", DataType::Text)
        .row(vec![text("Alice"), num(30.0), empty(), empty()])
        .row(vec![text("BOB"), empty(), num(7.0), empty()])
        .row(vec![text("Alice"), num(30.0), empty(), empty()])
        .row(vec![text("Carol"), num(42.0), num(9.0), empty()])
        .build()
}

#[test]
fn test_remove_duplicates_is_idempotent() {
    let mut once = messy_table();
    Transform::RemoveDuplicates.apply(&mut once);

    let mut twice = once.clone();
    let report = Transform::RemoveDuplicates.apply(&mut twice);

    assert_eq!(once.row_count(), 3);
    assert!(report.is_noop());
    assert_eq!(once, twice);
}

#[test]
fn test_drop_empty_columns_keeps_columns_with_values() {
    let mut table = messy_table();
    let report = Transform::DropEmptyColumns.apply(&mut table);

    assert_eq!(report.columns_removed, vec!["Notes"]);
    let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Name", "Age", "Score"]);

    let before = table.clone();
    Transform::DropEmptyColumns.apply(&mut table);
    assert_eq!(table, before);
}

#[test]
fn test_drop_empty_columns_on_header_only_table() {
    let mut table = TestTableBuilder::new()
        .column("a", DataType::Text)
        .column("b", DataType::Number)
        .build();
    Transform::DropEmptyColumns.apply(&mut table);
    assert_eq!(table.column_count(), 0);
}

#[test]
fn test_lowercase_leaves_numeric_columns_untouched() {
    let mut table = messy_table();
    let ages: Vec<DataCell> = table.column_cells(1).cloned().collect();

    Transform::LowercaseText.apply(&mut table);

    assert_eq!(table.column_cells(1).cloned().collect::<Vec<_>>(), ages);
    assert_eq!(table.rows[1].cells[0], text("bob"));

    let before = table.clone();
    Transform::LowercaseText.apply(&mut table);
    assert_eq!(table, before);
}

#[test]
fn test_fill_missing_fills_every_numeric_gap() {
    let mut table = messy_table();
    Transform::FillMissing.apply(&mut table);

    assert_eq!(table.missing_count(1), 0);
    assert_eq!(table.missing_count(2), 0);
    // Age mean over {30, 30, 42}
    assert_eq!(table.rows[1].cells[1], num(34.0));
    // Score mean over {7, 9}
    assert_eq!(table.rows[0].cells[2], num(8.0));
    // Text columns keep their gaps
    assert_eq!(table.missing_count(3), 4);
}

#[test]
fn test_fill_missing_ignores_complete_columns() {
    let mut table = TestTableBuilder::new()
        .column("x", DataType::Number)
        .row(vec![num(1.0)])
        .row(vec![num(2.0)])
        .build();
    let before = table.clone();
    let report = Transform::FillMissing.apply(&mut table);
    assert!(report.is_noop());
    assert_eq!(table, before);
}

#[test]
fn test_order_of_transforms_matters() {
    // Filling before deduplicating makes the two partial rows equal
    let base = TestTableBuilder::new()
        .column("k", DataType::Number)
        .column("v", DataType::Number)
        .row(vec![num(1.0), empty()])
        .row(vec![num(1.0), num(2.0)])
        .build();

    let mut fill_first = base.clone();
    Transform::FillMissing.apply(&mut fill_first);
    Transform::RemoveDuplicates.apply(&mut fill_first);

    let mut dedup_first = base;
    Transform::RemoveDuplicates.apply(&mut dedup_first);
    Transform::FillMissing.apply(&mut dedup_first);

    assert_eq!(fill_first.row_count(), 1);
    assert_eq!(dedup_first.row_count(), 2);
}
