//! Core types for the data sweeper pipeline.
//!
//! This module defines the in-memory table model shared by ingestion,
//! cleaning, charting and export, plus the small enums the session uses to
//! describe user choices.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Table Types
// ============================================================================

/// An in-memory table parsed from one uploaded file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column definitions, in file order
    pub columns: Vec<DataColumn>,
    /// Data rows, in file order
    pub rows: Vec<DataRow>,
}

impl Table {
    pub fn new(columns: Vec<DataColumn>, rows: Vec<DataRow>) -> Self {
        Self { columns, rows }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the column with the given name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Indices of all columns currently inferred as `data_type`.
    ///
    /// Evaluated on every call: transforms can change column types.
    pub fn columns_of_type(&self, data_type: DataType) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.data_type == data_type)
            .map(|(i, _)| i)
            .collect()
    }

    /// Names of all numeric columns
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.columns_of_type(DataType::Number)
            .into_iter()
            .map(|i| self.columns[i].name.clone())
            .collect()
    }

    /// Cell at (row, col), or `Empty` when out of range
    pub fn cell(&self, row: usize, col: usize) -> &DataCell {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(col))
            .unwrap_or(&DataCell::Empty)
    }

    /// Iterate the cells of one column
    pub fn column_cells(&self, col: usize) -> impl Iterator<Item = &DataCell> + '_ {
        self.rows.iter().map(move |r| r.cells.get(col).unwrap_or(&DataCell::Empty))
    }

    /// Number of missing cells in a column
    pub fn missing_count(&self, col: usize) -> usize {
        self.column_cells(col).filter(|c| c.is_missing()).count()
    }

    /// Copy of the first `n` rows
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Pad or truncate every row to the column count
    pub fn normalize_row_widths(&mut self) {
        let width = self.columns.len();
        for row in &mut self.rows {
            row.cells.resize(width, DataCell::Empty);
        }
    }

    /// Re-derive each column's type from the cells it currently holds.
    ///
    /// A column keeps its type when it has no values at all; otherwise it
    /// takes the type shared by all of its values, or `Text` when mixed.
    pub fn refresh_column_types(&mut self) {
        for col in 0..self.columns.len() {
            let kinds: HashSet<DataType> = self
                .column_cells(col)
                .filter_map(DataCell::data_type)
                .collect();
            let inferred = match kinds.len() {
                0 => continue,
                1 => kinds.into_iter().next().unwrap_or_default(),
                _ => DataType::Text,
            };
            self.columns[col].data_type = inferred;
        }
    }
}

/// Column metadata
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataColumn {
    /// Column name/header
    pub name: String,
    /// Data type inferred for this column
    pub data_type: DataType,
}

impl DataColumn {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
        }
    }
}

/// Supported data types for cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    #[default]
    Text,
    Number,
    Boolean,
    Date,
}

impl DataType {
    pub fn label(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Number => "number",
            DataType::Boolean => "boolean",
            DataType::Date => "datetime",
        }
    }
}

/// A row of data cells
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    pub cells: Vec<DataCell>,
}

impl DataRow {
    pub fn new(cells: Vec<DataCell>) -> Self {
        Self { cells }
    }

    /// Hashable identity of the row, used for duplicate detection
    pub fn key(&self) -> Vec<CellKey> {
        self.cells.iter().map(DataCell::key).collect()
    }
}

/// A single cell value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DataCell {
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(String), // ISO 8601 format
    Empty,
}

impl DataCell {
    /// Convert cell to string representation
    pub fn to_string(&self) -> String {
        match self {
            DataCell::Text(s) => s.clone(),
            DataCell::Number(n) => {
                // Whole numbers print without a fraction
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            DataCell::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
            DataCell::Date(d) => d.clone(),
            DataCell::Empty => String::new(),
        }
    }

    /// Numeric value, if the cell holds one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataCell::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    /// Missing values are `Empty` cells and NaN numbers
    pub fn is_missing(&self) -> bool {
        match self {
            DataCell::Empty => true,
            DataCell::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// Type of the value held, `None` when missing
    pub fn data_type(&self) -> Option<DataType> {
        if self.is_missing() {
            return None;
        }
        match self {
            DataCell::Text(_) => Some(DataType::Text),
            DataCell::Number(_) => Some(DataType::Number),
            DataCell::Boolean(_) => Some(DataType::Boolean),
            DataCell::Date(_) => Some(DataType::Date),
            DataCell::Empty => None,
        }
    }

    fn key(&self) -> CellKey {
        match self {
            DataCell::Text(s) => CellKey::Text(s.clone()),
            // -0.0 and 0.0 compare equal
            DataCell::Number(n) if *n == 0.0 => CellKey::Number(0),
            DataCell::Number(n) if n.is_nan() => CellKey::Missing,
            DataCell::Number(n) => CellKey::Number(n.to_bits()),
            DataCell::Boolean(b) => CellKey::Boolean(*b),
            DataCell::Date(d) => CellKey::Date(d.clone()),
            DataCell::Empty => CellKey::Missing,
        }
    }
}

/// Hashable projection of a [`DataCell`]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CellKey {
    Text(String),
    Number(u64),
    Boolean(bool),
    Date(String),
    Missing,
}

// ============================================================================
// File Formats
// ============================================================================

/// Tabular formats recognized on upload and offered on export
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Excel,
}

impl FileFormat {
    /// Recognize a format from a file extension (without the dot), case-insensitive
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "xlsx" => Some(FileFormat::Excel),
            _ => None,
        }
    }

    /// Extension written on export, with the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => ".csv",
            FileFormat::Excel => ".xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            FileFormat::Csv => crate::constants::CSV_MIME,
            FileFormat::Excel => crate::constants::XLSX_MIME,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileFormat::Csv => "CSV",
            FileFormat::Excel => "Excel",
        }
    }
}

// ============================================================================
// Chart Types
// ============================================================================

/// Chart kinds offered for a table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Pie,
    Line,
}

impl ChartType {
    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Bar => "Bar Chart",
            ChartType::Pie => "Pie Chart",
            ChartType::Line => "Line Chart",
        }
    }

    pub fn all() -> &'static [ChartType] {
        &[ChartType::Bar, ChartType::Pie, ChartType::Line]
    }
}

/// Rendering theme, purely cosmetic
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Name of the chart template the renderer should apply
    pub fn template(&self) -> &'static str {
        match self {
            Theme::Dark => "plotly_dark",
            Theme::Light => "plotly_white",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Chart kind plus the two axis columns chosen for one file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSelection {
    pub chart_type: ChartType,
    pub x_column: String,
    pub y_column: String,
}

impl ChartSelection {
    pub fn new(chart_type: ChartType, x_column: impl Into<String>, y_column: impl Into<String>) -> Self {
        Self {
            chart_type,
            x_column: x_column.into(),
            y_column: y_column.into(),
        }
    }

    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }
}
