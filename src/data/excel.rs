//! Excel (.xlsx) reading and writing
//!
//! Reading uses calamine on the first worksheet; the first row is the header.
//! Writing uses rust_xlsxwriter and produces a single worksheet with a bold
//! header row and no index column.

use crate::constants::EXPORT_SHEET_NAME;
use crate::data::error::{DataError, DataResult};
use crate::types::{DataCell, DataColumn, DataRow, DataType, Table};
use calamine::{Data, DataType as _, Reader, Xlsx};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};
use std::io::Cursor;

/// Parse the first worksheet of an .xlsx workbook into a Table
pub fn parse_xlsx_bytes(file: &str, bytes: &[u8]) -> DataResult<Table> {
    let start = std::time::Instant::now();

    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes.to_vec())).map_err(|e| DataError::parse(file, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::parse(file, "No worksheet found"))?
        .map_err(|e| DataError::parse(file, e))?;

    let mut rows_iter = range.rows();
    let Some(header_row) = rows_iter.next() else {
        return Ok(Table::default());
    };

    let columns: Vec<DataColumn> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| DataColumn::new(&header_name(cell, i), DataType::Text))
        .collect();

    let rows: Vec<DataRow> = rows_iter
        .map(|row| DataRow::new(row.iter().map(excel_value_to_cell).collect()))
        .collect();

    let mut table = Table::new(columns, rows);
    table.normalize_row_widths();
    table.refresh_column_types();

    tracing::debug!(
        "Parsed workbook {} with {} rows x {} cols in {:?}",
        file,
        table.row_count(),
        table.column_count(),
        start.elapsed()
    );

    Ok(table)
}

/// Header text for a column; blank headers get a positional name
fn header_name(cell: &Data, index: usize) -> String {
    let name = match excel_value_to_cell(cell) {
        DataCell::Empty => String::new(),
        other => other.to_string(),
    };
    if name.trim().is_empty() {
        format!("Unnamed: {}", index)
    } else {
        name
    }
}

/// Convert a calamine cell to DataCell
fn excel_value_to_cell(cell: &Data) -> DataCell {
    match cell {
        Data::Empty | Data::Error(_) => DataCell::Empty,
        Data::Int(v) => DataCell::Number(*v as f64),
        Data::Float(v) if v.is_nan() => DataCell::Empty,
        Data::Float(v) => DataCell::Number(*v),
        Data::Bool(b) => DataCell::Boolean(*b),
        Data::String(s) if s.is_empty() => DataCell::Empty,
        Data::String(s) => DataCell::Text(s.clone()),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) if dt.format("%H:%M:%S").to_string() == "00:00:00" => {
                DataCell::Date(dt.format("%Y-%m-%d").to_string())
            }
            Some(dt) => DataCell::Date(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => DataCell::Text(cell.to_string()),
        },
        Data::DateTimeIso(s) => DataCell::Date(s.clone()),
        #[allow(unreachable_patterns)]
        _ => DataCell::Text(cell.to_string()),
    }
}

/// Write a Table as a single-sheet .xlsx workbook
pub fn write_xlsx_bytes(table: &Table) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(EXPORT_SHEET_NAME)?;

        for (col, column) in table.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, column.name.as_str(), &header_format)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let xl_row = row_idx as u32 + 1;
            for col in 0..table.column_count() {
                let xl_col = col as u16;
                match row.cells.get(col).unwrap_or(&DataCell::Empty) {
                    DataCell::Empty => {}
                    DataCell::Number(n) if n.is_nan() => {}
                    DataCell::Number(n) => {
                        worksheet.write_number(xl_row, xl_col, *n)?;
                    }
                    DataCell::Boolean(b) => {
                        worksheet.write_boolean(xl_row, xl_col, *b)?;
                    }
                    DataCell::Date(s) => match ExcelDateTime::parse_from_str(s) {
                        Ok(dt) => {
                            let format = if s.contains(':') { &datetime_format } else { &date_format };
                            worksheet.write_datetime_with_format(xl_row, xl_col, &dt, format)?;
                        }
                        // Unrecognized date text is kept verbatim
                        Err(_) => {
                            worksheet.write_string(xl_row, xl_col, s.as_str())?;
                        }
                    },
                    DataCell::Text(s) => {
                        worksheet.write_string(xl_row, xl_col, s.as_str())?;
                    }
                }
            }
        }
    }

    workbook.save_to_buffer()
}
