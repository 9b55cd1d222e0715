//! Error types for data operations
//!
//! Every pipeline failure is scoped to one file. The session reports it and
//! carries on with the remaining files.

use thiserror::Error;

/// Boxed underlying cause of a parse, serialization or archive failure
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during data operations
#[derive(Error, Debug)]
pub enum DataError {
    /// The file extension is not `.csv` or `.xlsx`
    #[error("Unsupported file type: {extension}")]
    UnsupportedFormat { extension: String },

    /// The file content could not be read into a table
    #[error("Error reading {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: BoxedCause,
    },

    /// The table could not be written in the requested format
    #[error("Error converting {file}: {source}")]
    Serialization {
        file: String,
        #[source]
        source: BoxedCause,
    },

    /// The combined archive could not be created
    #[error("Error creating archive: {source}")]
    Archive {
        #[source]
        source: BoxedCause,
    },

    /// Upload exceeds the configured size limit
    #[error("File too large: {size_mb}MB (max {max_mb}MB)")]
    TooLarge { size_mb: u64, max_mb: usize },

    /// No uploaded file with this name in the session
    #[error("Unknown file: {0}")]
    UnknownFile(String),

    /// A chart axis names a missing or non-numeric column
    #[error("Invalid column {column}: {reason}")]
    InvalidColumn { column: String, reason: String },

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

impl DataError {
    pub fn parse(file: &str, source: impl Into<BoxedCause>) -> Self {
        DataError::Parse {
            file: file.to_string(),
            source: source.into(),
        }
    }

    pub fn serialization(file: &str, source: impl Into<BoxedCause>) -> Self {
        DataError::Serialization {
            file: file.to_string(),
            source: source.into(),
        }
    }

    pub fn archive(source: impl Into<BoxedCause>) -> Self {
        DataError::Archive {
            source: source.into(),
        }
    }

    /// Short category name, used in logs and notifications
    pub fn kind(&self) -> &'static str {
        match self {
            DataError::UnsupportedFormat { .. } => "UnsupportedFormat",
            DataError::Parse { .. } | DataError::TooLarge { .. } => "ParseError",
            DataError::Serialization { .. } => "SerializationError",
            DataError::Archive { .. } => "ArchiveError",
            DataError::UnknownFile(_) => "UnknownFile",
            DataError::InvalidColumn { .. } => "InvalidColumn",
            DataError::Io(_) => "IoError",
        }
    }
}
