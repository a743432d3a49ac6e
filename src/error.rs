//! Error handling module for the scan portal
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Storage and upload failures are surfaced to the user and never end the session.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the scan portal
#[derive(Error, Debug)]
pub enum PortalError {
    /// Statement failure against the report database
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The report database could not be opened
    #[error("Storage error: cannot open database {path:?}: {source}")]
    StorageOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A stored enum column holds a label we do not recognise
    #[error("Storage error: column '{column}' holds unknown value '{value}'")]
    InvalidStoredValue { column: &'static str, value: String },

    /// An uploaded scan file could not be written
    #[error("Failed to save uploaded file {path:?}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Upload refused before anything was written
    #[error("Upload rejected: {0}")]
    UploadRejected(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// IO errors outside the upload path (terminal, directory listing)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scan portal operations
pub type Result<T> = std::result::Result<T, PortalError>;

// Convenient error constructors
impl PortalError {
    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create an upload rejection
    pub fn upload_rejected(msg: impl Into<String>) -> Self {
        Self::UploadRejected(msg.into())
    }

    /// Wrap an IO failure that happened while saving an upload
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// True for connection, statement and stored-value failures
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::Storage(_) | Self::StorageOpen { .. } | Self::InvalidStoredValue { .. }
        )
    }

    /// True when an upload could not be written to disk
    pub fn is_file_write(&self) -> bool {
        matches!(self, Self::FileWrite { .. })
    }
}
