//! Cleaning transforms
//!
//! Each transform mutates a [`Table`] in place and reports what it changed.
//! Column predicates (numeric for filling, text for lowercasing) are
//! evaluated when the transform runs, and column types are refreshed after
//! it finishes.

use crate::types::{DataCell, DataType, Table};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named in-place mutation a user can trigger on a table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    RemoveDuplicates,
    FillMissing,
    DropEmptyColumns,
    LowercaseText,
}

impl Transform {
    pub fn label(&self) -> &'static str {
        match self {
            Transform::RemoveDuplicates => "Remove Duplicates",
            Transform::FillMissing => "Fill Missing Values",
            Transform::DropEmptyColumns => "Drop Empty Columns",
            Transform::LowercaseText => "Convert Text to Lowercase",
        }
    }

    /// Message shown once the transform has run
    pub fn success_message(&self) -> &'static str {
        match self {
            Transform::RemoveDuplicates => "Duplicates removed!",
            Transform::FillMissing => "Missing values filled!",
            Transform::DropEmptyColumns => "Empty columns removed!",
            Transform::LowercaseText => "Text converted to lowercase!",
        }
    }

    pub fn all() -> &'static [Transform] {
        &[
            Transform::RemoveDuplicates,
            Transform::FillMissing,
            Transform::DropEmptyColumns,
            Transform::LowercaseText,
        ]
    }

    /// Run the transform against `table`
    pub fn apply(&self, table: &mut Table) -> TransformReport {
        let report = match self {
            Transform::RemoveDuplicates => remove_duplicates(table),
            Transform::FillMissing => fill_missing_numeric(table),
            Transform::DropEmptyColumns => drop_empty_columns(table),
            Transform::LowercaseText => lowercase_text(table),
        };
        table.refresh_column_types();
        report
    }
}

/// What a transform changed
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformReport {
    pub rows_removed: usize,
    pub cells_changed: usize,
    pub columns_removed: Vec<String>,
}

impl TransformReport {
    pub fn is_noop(&self) -> bool {
        self.rows_removed == 0 && self.cells_changed == 0 && self.columns_removed.is_empty()
    }
}

/// Delete rows equal to an earlier row, keeping the first occurrence
pub fn remove_duplicates(table: &mut Table) -> TransformReport {
    let before = table.rows.len();
    let mut seen = HashSet::with_capacity(before);
    table.rows.retain(|row| seen.insert(row.key()));

    TransformReport {
        rows_removed: before - table.rows.len(),
        ..Default::default()
    }
}

/// Replace missing cells of each numeric column with that column's mean.
///
/// Columns without any non-missing value have no mean and stay untouched.
pub fn fill_missing_numeric(table: &mut Table) -> TransformReport {
    let mut filled = 0;

    for col in table.columns_of_type(DataType::Number) {
        let values: Vec<f64> = table.column_cells(col).filter_map(DataCell::as_f64).collect();
        if values.is_empty() || values.len() == table.row_count() {
            continue;
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;

        for row in &mut table.rows {
            if let Some(cell) = row.cells.get_mut(col) {
                if cell.is_missing() {
                    *cell = DataCell::Number(mean);
                    filled += 1;
                }
            }
        }
    }

    TransformReport {
        cells_changed: filled,
        ..Default::default()
    }
}

/// Delete every column in which all rows are missing
pub fn drop_empty_columns(table: &mut Table) -> TransformReport {
    let keep: Vec<bool> = (0..table.column_count())
        .map(|col| table.column_cells(col).any(|c| !c.is_missing()))
        .collect();

    if keep.iter().all(|k| *k) {
        return TransformReport::default();
    }

    let columns_removed = table
        .columns
        .iter()
        .zip(&keep)
        .filter(|(_, k)| !**k)
        .map(|(c, _)| c.name.clone())
        .collect();

    let mut flags = keep.iter();
    table.columns.retain(|_| *flags.next().unwrap_or(&true));

    for row in &mut table.rows {
        let mut flags = keep.iter();
        row.cells.retain(|_| *flags.next().unwrap_or(&true));
    }

    TransformReport {
        columns_removed,
        ..Default::default()
    }
}

/// Lowercase every value of every text column
pub fn lowercase_text(table: &mut Table) -> TransformReport {
    let mut changed = 0;

    for col in table.columns_of_type(DataType::Text) {
        for row in &mut table.rows {
            if let Some(DataCell::Text(s)) = row.cells.get_mut(col) {
                let lowered = s.to_lowercase();
                if lowered != *s {
                    *s = lowered;
                    changed += 1;
                }
            }
        }
    }

    TransformReport {
        cells_changed: changed,
        ..Default::default()
    }
}
