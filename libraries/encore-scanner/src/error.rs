//! Error types for the scanning engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata extraction failed; terminal for the file being scanned
    #[error(transparent)]
    Extraction(#[from] encore_metadata::TagError),

    /// Failure from a catalog collaborator (repository, cover writer, ...)
    #[error("Catalog error: {0}")]
    Catalog(#[from] encore_core::EncoreError),

    /// `scan`/`song` used before `set_file` bound a file
    #[error("No file is bound to the scanner")]
    NotBound,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Result type for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;
