//! CSV reading and writing
//!
//! Reading goes through polars' CSV reader, which handles quoting and
//! column type inference; the resulting frame is converted cell by cell into
//! a [`Table`]. Writing is done directly from the table.

use crate::constants::CSV_NULL_TOKENS;
use crate::data::error::{DataError, DataResult};
use crate::types::{DataCell, DataColumn, DataRow, DataType, Table};
use polars::prelude::*;
use std::io::Cursor;

/// Parse CSV bytes (with a header row) into a Table.
///
/// `file` is only used to label errors.
pub fn parse_csv_bytes(file: &str, bytes: &[u8]) -> DataResult<Table> {
    let start = std::time::Instant::now();

    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(DataError::parse(file, "No columns to parse from file"));
    }

    let null_values = NullValues::AllColumns(CSV_NULL_TOKENS.iter().map(|t| (*t).into()).collect());

    // Types are inferred from every row; a late text value widens the column
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|opts| opts.with_null_values(Some(null_values.clone())))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .map_err(|e| DataError::parse(file, e))?;

    let table = frame_to_table(&df);

    tracing::debug!(
        "Parsed CSV {} with {} rows x {} cols in {:?}",
        file,
        table.row_count(),
        table.column_count(),
        start.elapsed()
    );

    Ok(table)
}

/// Convert a polars DataFrame into a Table
fn frame_to_table(df: &DataFrame) -> Table {
    let frame_columns = df.get_columns();

    let columns: Vec<DataColumn> = frame_columns
        .iter()
        .map(|col| DataColumn {
            name: col.name().to_string(),
            data_type: infer_polars_dtype(col),
        })
        .collect();

    let rows: Vec<DataRow> = (0..df.height())
        .map(|row_idx| {
            DataRow::new(
                frame_columns
                    .iter()
                    .map(|col| polars_value_to_cell(col, row_idx))
                    .collect(),
            )
        })
        .collect();

    Table::new(columns, rows)
}

/// Infer DataType from polars column dtype
fn infer_polars_dtype(col: &Column) -> DataType {
    match col.dtype() {
        polars::datatypes::DataType::Int8
        | polars::datatypes::DataType::Int16
        | polars::datatypes::DataType::Int32
        | polars::datatypes::DataType::Int64
        | polars::datatypes::DataType::UInt8
        | polars::datatypes::DataType::UInt16
        | polars::datatypes::DataType::UInt32
        | polars::datatypes::DataType::UInt64
        | polars::datatypes::DataType::Float32
        | polars::datatypes::DataType::Float64 => DataType::Number,
        polars::datatypes::DataType::Boolean => DataType::Boolean,
        _ => DataType::Text,
    }
}

/// Convert a polars cell value to DataCell
fn polars_value_to_cell(column: &Column, row_idx: usize) -> DataCell {
    let Ok(val) = column.get(row_idx) else {
        return DataCell::Empty;
    };

    match val {
        AnyValue::Null => DataCell::Empty,
        AnyValue::Int8(v) => DataCell::Number(v as f64),
        AnyValue::Int16(v) => DataCell::Number(v as f64),
        AnyValue::Int32(v) => DataCell::Number(v as f64),
        AnyValue::Int64(v) => DataCell::Number(v as f64),
        AnyValue::UInt8(v) => DataCell::Number(v as f64),
        AnyValue::UInt16(v) => DataCell::Number(v as f64),
        AnyValue::UInt32(v) => DataCell::Number(v as f64),
        AnyValue::UInt64(v) => DataCell::Number(v as f64),
        AnyValue::Float32(v) if v.is_nan() => DataCell::Empty,
        AnyValue::Float32(v) => DataCell::Number(v as f64),
        AnyValue::Float64(v) if v.is_nan() => DataCell::Empty,
        AnyValue::Float64(v) => DataCell::Number(v),
        AnyValue::Boolean(v) => DataCell::Boolean(v),
        AnyValue::String(s) => DataCell::Text(s.to_string()),
        AnyValue::StringOwned(s) => {
            let s_str: &str = &s;
            DataCell::Text(s_str.to_string())
        }
        _ => DataCell::Text(format!("{}", val)),
    }
}

/// Convert a Table to CSV content.
///
/// Header row first, no row index, `\n` line endings.
pub fn write_csv_content(table: &Table, delimiter: char) -> String {
    let mut out = String::new();

    let headers: Vec<String> = table
        .columns
        .iter()
        .map(|col| quote_csv_field(&col.name, delimiter))
        .collect();
    out.push_str(&headers.join(&delimiter.to_string()));
    out.push('\n');

    for row in &table.rows {
        let cells: Vec<String> = (0..table.column_count())
            .map(|i| {
                let cell = row.cells.get(i).unwrap_or(&DataCell::Empty);
                quote_csv_field(&cell.to_string(), delimiter)
            })
            .collect();
        out.push_str(&cells.join(&delimiter.to_string()));
        out.push('\n');
    }

    out
}

/// Quote a CSV field if necessary (contains delimiter, quotes, or newlines)
fn quote_csv_field(value: &str, delimiter: char) -> String {
    let needs_quoting = value.contains(delimiter)
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');

    if needs_quoting {
        // Escape internal quotes by doubling them
        let escaped = value.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        value.to_string()
    }
}
