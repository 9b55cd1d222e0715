//! Combined download archive
//!
//! Bundles every processed file into one ZIP. The archive is spooled
//! through a scoped temporary file that is removed when bundling returns,
//! whether it succeeded or not.

use crate::constants::{ARCHIVE_FILE_NAME, ZIP_MIME};
use crate::data::error::{DataError, DataResult};
use crate::data::export::ProcessedFile;
use std::collections::HashSet;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// A bundled archive ready for download
#[derive(Clone, Debug, PartialEq)]
pub struct Archive {
    /// Download name, `processed_files.zip`
    pub name: String,
    /// ZIP content
    pub bytes: Vec<u8>,
    pub mime_type: String,
    /// Entry names, in bundle order
    pub entries: Vec<String>,
}

/// Package `files` into a single ZIP archive
pub fn bundle(files: &[ProcessedFile]) -> DataResult<Archive> {
    if files.is_empty() {
        return Err(DataError::archive("No processed files to bundle"));
    }

    let mut spool = tempfile::Builder::new()
        .prefix("processed_files")
        .suffix(".zip")
        .tempfile()
        .map_err(DataError::archive)?;

    let entries = unique_entry_names(files);
    write_zip(spool.as_file_mut(), files, &entries)?;

    let mut bytes = Vec::new();
    let file = spool.as_file_mut();
    file.seek(SeekFrom::Start(0)).map_err(DataError::archive)?;
    file.read_to_end(&mut bytes).map_err(DataError::archive)?;

    tracing::info!("Bundled {} files into {} ({} bytes)", entries.len(), ARCHIVE_FILE_NAME, bytes.len());

    Ok(Archive {
        name: ARCHIVE_FILE_NAME.to_string(),
        bytes,
        mime_type: ZIP_MIME.to_string(),
        entries,
    })
}

fn write_zip<W: Write + Seek>(writer: W, files: &[ProcessedFile], entries: &[String]) -> DataResult<()> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (file, entry) in files.iter().zip(entries) {
        zip.start_file(entry.as_str(), options).map_err(DataError::archive)?;
        zip.write_all(&file.bytes).map_err(DataError::archive)?;
    }

    zip.finish().map_err(DataError::archive)?;
    Ok(())
}

/// Entry names for the archive; a taken name gets the lowest free ` (n)` suffix
fn unique_entry_names(files: &[ProcessedFile]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();

    files
        .iter()
        .map(|file| {
            let mut candidate = file.name.clone();
            let mut n = 2;
            while taken.contains(&candidate) {
                candidate = suffixed_name(&file.name, n);
                n += 1;
            }
            taken.insert(candidate.clone());
            candidate
        })
        .collect()
}

/// `a.csv` -> `a (n).csv`
fn suffixed_name(name: &str, n: usize) -> String {
    match Path::new(name).extension().and_then(|e| e.to_str()) {
        Some(ext) => {
            let stem = &name[..name.len() - ext.len() - 1];
            format!("{} ({}).{}", stem, n, ext)
        }
        None => format!("{} ({})", name, n),
    }
}
