//! Table export
//!
//! Serializes a table to CSV or Excel and names the result after the
//! uploaded file. Every call produces a fresh [`ProcessedFile`].

use crate::data::csv_parser::write_csv_content;
use crate::data::error::{DataError, DataResult};
use crate::data::excel::write_xlsx_bytes;
use crate::types::{FileFormat, Table};
use serde::Serialize;
use std::path::Path;

/// An exported file ready for download
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessedFile {
    /// Output file name, e.g. `sales.xlsx`
    pub name: String,
    /// Serialized content
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// MIME type for the download
    pub mime_type: String,
}

impl ProcessedFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Replace the extension of `original` with the target format's extension.
///
/// Names without an extension get one appended.
pub fn output_file_name(original: &str, format: FileFormat) -> String {
    let path = Path::new(original);
    let stem = match path.extension() {
        Some(ext) => &original[..original.len() - ext.len() - 1],
        None => original,
    };
    format!("{}{}", stem, format.extension())
}

/// Serialize `table` in `format`, naming the output after `original_name`
pub fn export_table(table: &Table, original_name: &str, format: FileFormat) -> DataResult<ProcessedFile> {
    let name = output_file_name(original_name, format);

    let bytes = match format {
        FileFormat::Csv => write_csv_content(table, ',').into_bytes(),
        FileFormat::Excel => write_xlsx_bytes(table).map_err(|e| DataError::serialization(&name, e))?,
    };

    tracing::debug!("Exported {} as {} ({} bytes)", original_name, name, bytes.len());

    Ok(ProcessedFile {
        name,
        bytes,
        mime_type: format.mime_type().to_string(),
    })
}
