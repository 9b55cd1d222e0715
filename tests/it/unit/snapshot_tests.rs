//! Snapshot tests using the insta crate.
//!
//! Inline snapshots pin down textual output (CSV exports, chart JSON) so
//! formatting changes show up as reviewable diffs.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::{TestTableBuilder, empty, num, text};
use data_sweeper::data::{Transform, build_chart, write_csv_content};
use data_sweeper::types::{ChartSelection, ChartType, DataType, Theme};

#[test]
fn snapshot_cleaned_csv() {
    let mut table = TestTableBuilder::new()
        .column("Name", DataType::Text)
        .column("Score", DataType::Number)
        .column("Comment", DataType::Text)
        .row(vec![text("Ann \"Jr\""), num(3.0), empty()])
        .row(vec![text("BEN"), empty(), empty()])
        .row(vec![text("BEN"), empty(), empty()])
        .row(vec![text("Cy, Dee"), num(4.0), empty()])
        .build();

    for transform in Transform::all() {
        transform.apply(&mut table);
    }

    insta::assert_snapshot!(write_csv_content(&table, ','), @r#"
    Name,Score
    "ann ""jr""",3
    ben,3.5
    "cy, dee",4
    "#);
}

#[test]
fn snapshot_chart_points() {
    let table = TestTableBuilder::new()
        .column("x", DataType::Number)
        .column("y", DataType::Number)
        .row(vec![num(1.0), num(2.0)])
        .row(vec![num(2.0), num(0.5)])
        .row(vec![num(1.0), num(1.0)])
        .build();
    let selection = ChartSelection::new(ChartType::Bar, "x", "y");
    let chart = build_chart(&table, &selection, Theme::Dark).unwrap();

    let summary: Vec<String> = chart
        .points
        .iter()
        .map(|p| format!("{} -> {} {}", p.label, p.value, p.color))
        .collect();

    insta::assert_snapshot!(summary.join("\n"), @r"
    1 -> 3 #2f6fe0
    2 -> 0.5 #1ea050
    ");
}
