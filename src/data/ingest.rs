//! Upload ingestion
//!
//! Picks the parser from the file extension and turns an uploaded file into
//! a [`Table`]. Failures are per file; callers keep going with the rest.

use crate::constants::MAX_UPLOAD_SIZE_MB;
use crate::data::csv_parser::parse_csv_bytes;
use crate::data::error::{DataError, DataResult};
use crate::data::excel::parse_xlsx_bytes;
use crate::types::{FileFormat, Table};
use std::path::Path;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// A file handed over by the host: name plus raw bytes
#[derive(Clone, Debug)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, keeping only its file name
    pub fn from_path(path: &Path) -> DataResult<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self { name, bytes })
    }

    /// Declared size in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Lowercased extension with its leading dot, or "" when there is none
    pub fn extension(&self) -> String {
        file_extension(&self.name)
    }
}

/// Lowercased extension of `name` with its leading dot, or ""
pub fn file_extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// Determine the format of a file from its name
pub fn detect_format(name: &str) -> DataResult<FileFormat> {
    let extension = file_extension(name);
    FileFormat::from_extension(extension.trim_start_matches('.'))
        .ok_or(DataError::UnsupportedFormat { extension })
}

/// Parse an uploaded file into a Table, enforcing the default size limit
pub fn ingest(upload: &UploadedFile) -> DataResult<Table> {
    ingest_with_limit(upload, MAX_UPLOAD_SIZE_MB)
}

/// Parse an uploaded file into a Table.
///
/// The format check runs before anything is read, so unsupported files
/// never produce a table.
pub fn ingest_with_limit(upload: &UploadedFile, max_mb: usize) -> DataResult<Table> {
    let format = detect_format(&upload.name)?;

    if upload.size() as u64 > max_mb as u64 * BYTES_PER_MB {
        return Err(DataError::TooLarge {
            size_mb: (upload.size() as u64).div_ceil(BYTES_PER_MB),
            max_mb,
        });
    }

    tracing::debug!(
        "Accepted {} as {} ({} bytes)",
        upload.name,
        format.label(),
        upload.size()
    );

    match format {
        FileFormat::Csv => parse_csv_bytes(&upload.name, &upload.bytes),
        FileFormat::Excel => parse_xlsx_bytes(&upload.name, &upload.bytes),
    }
}
