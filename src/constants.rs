//! Application-wide constants.
//!
//! Centralizes limits, MIME types and file names so the pipeline stages
//! agree on them.

// ============================================================================
// Upload Limits
// ============================================================================

/// Default maximum upload size in megabytes
pub const MAX_UPLOAD_SIZE_MB: usize = 200;

/// Tokens read as missing values in CSV input (empty fields are always missing)
pub const CSV_NULL_TOKENS: [&str; 11] = [
    "NaN", "nan", "-NaN", "NA", "N/A", "n/a", "#N/A", "<NA>", "NULL", "null", "None",
];

// ============================================================================
// Preview
// ============================================================================

/// Rows shown in a table preview
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

// ============================================================================
// Export
// ============================================================================

/// MIME type for CSV exports
pub const CSV_MIME: &str = "text/csv";

/// MIME type for Excel exports
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// MIME type for the combined archive
pub const ZIP_MIME: &str = "application/zip";

/// File name of the combined archive
pub const ARCHIVE_FILE_NAME: &str = "processed_files.zip";

/// Worksheet name used for Excel exports
pub const EXPORT_SHEET_NAME: &str = "Sheet1";

// ============================================================================
// Charts
// ============================================================================

/// Minimum number of numeric columns before charts are offered
pub const MIN_CHART_COLUMNS: usize = 2;

/// Chart color palette (hex), cycled per point
pub const CHART_COLORS: [&str; 8] = [
    "#2f6fe0", // Bright Blue
    "#1ea050", // Green
    "#f58a1f", // Orange
    "#9b4fde", // Violet
    "#e03d3d", // Red
    "#1eb3a6", // Teal
    "#e8cf1a", // Yellow
    "#de4fae", // Magenta
];
