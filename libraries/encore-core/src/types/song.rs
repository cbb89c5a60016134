//! Song types

use super::{AlbumId, ArtistId, UserId};
use serde::{Deserialize, Serialize};

pub type SongId = i64;

/// Storage backend a song's media lives on.
///
/// Scans of the local filesystem always produce `Local`; the other kinds
/// exist for capability checks (e.g. folder-structure derivation) over
/// records imported from remote backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SongStorage {
    #[default]
    Local,
    S3,
    Dropbox,
    Sftp,
}

impl SongStorage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::S3 => "s3",
            Self::Dropbox => "dropbox",
            Self::Sftp => "sftp",
        }
    }
}

impl From<&str> for SongStorage {
    fn from(value: &str) -> Self {
        match value {
            "s3" => Self::S3,
            "dropbox" => Self::Dropbox,
            "sftp" => Self::Sftp,
            _ => Self::Local,
        }
    }
}

impl std::fmt::Display for SongStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog song, keyed by its unique file path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub path: String,
    pub title: String,
    pub artist_id: ArtistId,
    pub album_id: AlbumId,
    pub owner_id: UserId,
    pub is_public: bool,
    pub storage: SongStorage,
    pub track_number: Option<i32>,
    pub disc_number: Option<i32>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub lyrics: Option<String>,
    pub duration_seconds: f64,
    pub mtime: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Write shape for the path-keyed song upsert.
///
/// `owner_id` only takes effect when the upsert creates the record; updates
/// leave the stored owner untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongUpsert {
    pub path: String,
    pub title: String,
    pub artist_id: ArtistId,
    pub album_id: AlbumId,
    pub owner_id: UserId,
    pub is_public: bool,
    pub storage: SongStorage,
    pub track_number: Option<i32>,
    pub disc_number: Option<i32>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub lyrics: Option<String>,
    pub duration_seconds: f64,
    pub mtime: i64,
}
