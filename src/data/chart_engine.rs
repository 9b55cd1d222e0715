//! Chart data processing engine
//!
//! Turns a table plus a chart selection into a renderer-agnostic chart
//! specification. Nothing here mutates the table; grouping and summing
//! happen on copies of the selected values.

use crate::constants::{CHART_COLORS, MIN_CHART_COLUMNS};
use crate::data::error::{DataError, DataResult};
use crate::types::{ChartSelection, ChartType, DataType, Table, Theme};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Chart choices available for a table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Columns selectable on either axis
    pub numeric_columns: Vec<String>,
    /// Chart kinds on offer
    pub chart_types: Vec<ChartType>,
}

/// Processed chart ready for a renderer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub chart_type: ChartType,
    /// Chart title, e.g. "Bar Chart"
    pub title: String,
    /// Rendering template picked by the theme
    pub template: String,
    /// X-axis column name
    pub x_label: String,
    /// Y-axis column name
    pub y_label: String,
    /// Data points in display order
    pub points: Vec<ChartPoint>,
    /// Maximum value for scaling
    pub max_value: f64,
    /// Minimum value for scaling
    pub min_value: f64,
}

/// A single data point in a chart
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// X value as displayed (bar category, pie slice name)
    pub label: String,
    /// Numeric X value
    pub x: f64,
    /// Y value (bar height, slice size, line height)
    pub value: f64,
    /// Hex color for this point
    pub color: String,
}

/// Chart options for a table, or `None` when it has fewer than two numeric columns
pub fn chart_options(table: &Table) -> Option<ChartOptions> {
    let numeric_columns = table.numeric_column_names();
    if numeric_columns.len() < MIN_CHART_COLUMNS {
        return None;
    }
    Some(ChartOptions {
        numeric_columns,
        chart_types: ChartType::all().to_vec(),
    })
}

/// Initial selection: bar chart over the first two numeric columns
pub fn default_selection(table: &Table) -> Option<ChartSelection> {
    let options = chart_options(table)?;
    Some(ChartSelection::new(
        ChartType::Bar,
        options.numeric_columns[0].clone(),
        options.numeric_columns[1].clone(),
    ))
}

/// Build a chart specification from two numeric columns.
///
/// - Bar and pie group rows by X value and sum their Y values, keeping
///   first-seen order.
/// - Line keeps one point per row, in row order.
///
/// Rows with a missing X or Y are skipped.
pub fn build_chart(table: &Table, selection: &ChartSelection, theme: Theme) -> DataResult<ChartSpec> {
    let x_col = numeric_column(table, &selection.x_column)?;
    let y_col = numeric_column(table, &selection.y_column)?;

    let pairs: Vec<(f64, f64)> = (0..table.row_count())
        .filter_map(|row| {
            let x = table.cell(row, x_col).as_f64()?;
            let y = table.cell(row, y_col).as_f64()?;
            Some((x, y))
        })
        .collect();

    let values = match selection.chart_type {
        ChartType::Line => pairs,
        ChartType::Bar | ChartType::Pie => group_and_sum(&pairs),
    };

    let mut max_value = f64::NEG_INFINITY;
    let mut min_value = f64::INFINITY;

    let points: Vec<ChartPoint> = values
        .into_iter()
        .enumerate()
        .map(|(i, (x, value))| {
            max_value = max_value.max(value);
            min_value = min_value.min(value);
            ChartPoint {
                label: crate::types::DataCell::Number(x).to_string(),
                x,
                value,
                color: CHART_COLORS[i % CHART_COLORS.len()].to_string(),
            }
        })
        .collect();

    tracing::debug!(
        "Built {} over {} x {} with {} points",
        selection.chart_type.label(),
        selection.x_column,
        selection.y_column,
        points.len()
    );

    Ok(ChartSpec {
        chart_type: selection.chart_type,
        title: selection.chart_type.label().to_string(),
        template: theme.template().to_string(),
        x_label: selection.x_column.clone(),
        y_label: selection.y_column.clone(),
        points,
        max_value: if max_value == f64::NEG_INFINITY { 0.0 } else { max_value },
        min_value: if min_value == f64::INFINITY { 0.0 } else { min_value },
    })
}

/// Resolve a column name that must be numeric
fn numeric_column(table: &Table, name: &str) -> DataResult<usize> {
    let idx = table.column_index(name).ok_or_else(|| DataError::InvalidColumn {
        column: name.to_string(),
        reason: "no such column".to_string(),
    })?;
    if table.columns[idx].data_type != DataType::Number {
        return Err(DataError::InvalidColumn {
            column: name.to_string(),
            reason: format!("column is {}, not numeric", table.columns[idx].data_type.label()),
        });
    }
    Ok(idx)
}

/// Sum Y per distinct X, preserving insertion order
fn group_and_sum(pairs: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut order: Vec<f64> = Vec::new();
    let mut sums: HashMap<u64, f64> = HashMap::new();

    for &(x, y) in pairs {
        // -0.0 and 0.0 share a group
        let key = if x == 0.0 { 0 } else { x.to_bits() };
        match sums.get_mut(&key) {
            Some(total) => *total += y,
            None => {
                order.push(x);
                sums.insert(key, y);
            }
        }
    }

    order
        .into_iter()
        .map(|x| {
            let key = if x == 0.0 { 0 } else { x.to_bits() };
            (x, sums.get(&key).copied().unwrap_or(0.0))
        })
        .collect()
}
