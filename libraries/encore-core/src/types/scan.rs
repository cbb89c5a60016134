//! Scan configuration, extracted-tag record, and per-file outcome

use super::{CoverArt, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Tag fields an operator may exclude from re-scans via
/// [`ScanConfiguration::ignored_fields`].
pub const IGNORABLE_FIELDS: &[&str] = &[
    "title",
    "artist",
    "albumartist",
    "album",
    "track",
    "disc",
    "year",
    "genre",
    "lyrics",
    "cover",
];

/// Immutable configuration for one scan run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfiguration {
    /// Owner assigned to newly created records
    pub owner: UserId,
    /// Re-process files even when they are unchanged
    pub force: bool,
    /// Mark scanned songs as publicly visible
    pub make_public: bool,
    /// Fields left untouched when re-scanning existing records
    pub ignored_fields: HashSet<String>,
    /// Derive folder structure on backends that support it
    pub extract_folder_structure: bool,
}

impl ScanConfiguration {
    pub fn new(owner: UserId) -> Self {
        Self {
            owner,
            force: false,
            make_public: false,
            ignored_fields: HashSet::new(),
            extract_folder_structure: false,
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn make_public(mut self, make_public: bool) -> Self {
        self.make_public = make_public;
        self
    }

    pub fn ignore_field(mut self, field: impl Into<String>) -> Self {
        self.ignored_fields.insert(field.into());
        self
    }

    pub fn extract_folder_structure(mut self, extract: bool) -> Self {
        self.extract_folder_structure = extract;
        self
    }

    /// Whether `field` is excluded from re-scans
    pub fn ignores(&self, field: &str) -> bool {
        self.ignored_fields.contains(field)
    }
}

/// Metadata extracted from one audio file.
///
/// Produced fresh per file and never persisted directly; the scanner maps it
/// into catalog fields.
#[derive(Debug, Clone, Default)]
pub struct SongScanInformation {
    pub path: PathBuf,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub album: Option<String>,
    pub track_number: Option<i32>,
    pub disc_number: Option<i32>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub lyrics: Option<String>,
    pub duration_seconds: f64,
    /// File modification time, unix seconds
    pub mtime: i64,
    pub cover: Option<CoverArt>,
}

/// Outcome of scanning one file. Exactly one variant per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResult {
    /// The file was processed and its catalog record written
    Success { path: PathBuf },
    /// The file was unchanged and left alone
    Skipped { path: PathBuf },
    /// The file could not be processed
    Error { path: PathBuf, reason: String },
}

impl ScanResult {
    pub fn path(&self) -> &Path {
        match self {
            Self::Success { path } | Self::Skipped { path } | Self::Error { path, .. } => path,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_builder() {
        let config = ScanConfiguration::new(42)
            .force(true)
            .make_public(true)
            .ignore_field("genre")
            .extract_folder_structure(true);

        assert_eq!(config.owner, 42);
        assert!(config.force);
        assert!(config.make_public);
        assert!(config.ignores("genre"));
        assert!(!config.ignores("title"));
        assert!(config.extract_folder_structure);
    }

    #[test]
    fn result_predicates() {
        let path = PathBuf::from("/music/a.mp3");

        let success = ScanResult::Success { path: path.clone() };
        assert!(success.is_success());
        assert_eq!(success.path(), path.as_path());

        let skipped = ScanResult::Skipped { path: path.clone() };
        assert!(skipped.is_skipped());

        let error = ScanResult::Error {
            path,
            reason: "Empty file".to_string(),
        };
        assert!(error.is_error());
    }
}
