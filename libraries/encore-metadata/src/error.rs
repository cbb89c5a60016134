//! Error types for metadata extraction

use thiserror::Error;

/// Extraction failures are terminal for the file being scanned; the scanner
/// reports them with their reason and moves on.
#[derive(Debug, Error)]
pub enum TagError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// The parser reported no playable duration and no other error
    #[error("Empty file")]
    EmptyFile,

    /// Decode error from the underlying tag parser
    #[error("{0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for metadata operations
pub type Result<T> = std::result::Result<T, TagError>;
