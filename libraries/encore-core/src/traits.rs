//! Collaborator traits consumed by the scanning engine
//!
//! The scanner only ever talks to these abstractions; the SQLite adapter in
//! `encore-storage` is one implementation, test fakes are another.

use crate::error::Result;
use crate::types::{Album, AlbumId, Artist, ArtistId, CoverSource, Song, SongUpsert, UserId};
use async_trait::async_trait;

/// Catalog persistence.
///
/// `get_or_create_*` must be race-safe on their own (unique constraints in
/// the SQLite adapter): the resolution cache in front of them is advisory
/// and concurrent scans may reach the store for the same name.
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Look up a song by its unique file path
    async fn find_song_by_path(&self, path: &str) -> Result<Option<Song>>;

    /// Create or fully update the song stored under `upsert.path`.
    ///
    /// The owner is set at creation and never changed by later upserts.
    async fn upsert_song(&self, upsert: SongUpsert) -> Result<Song>;

    async fn find_artist_by_id(&self, id: ArtistId) -> Result<Option<Artist>>;

    async fn find_album_by_id(&self, id: AlbumId) -> Result<Option<Album>>;

    /// Return the artist named `name` under `owner`, creating it if absent
    async fn get_or_create_artist(&self, owner: UserId, name: &str) -> Result<Artist>;

    /// Return the album named `name` by `artist`, creating it if absent
    async fn get_or_create_album(&self, artist: &Artist, name: &str) -> Result<Album>;

    /// Set the album year unless one is already recorded (first write wins)
    async fn set_album_year_if_missing(&self, id: AlbumId, year: i32) -> Result<()>;

    /// Record the album's cover file name
    async fn set_album_cover(&self, id: AlbumId, cover: &str) -> Result<()>;
}

/// Persists a chosen cover image into an album's cover slot
#[async_trait]
pub trait CoverWriter: Send + Sync {
    async fn write_album_cover(&self, album: &Album, image: CoverSource) -> Result<()>;
}

/// Capability hook for backends that can derive folder structure from a
/// song's path. Modeled as a trait so new storage backends plug in without
/// touching the scanner.
#[async_trait]
pub trait FolderStructureExtractor: Send + Sync {
    /// Whether this backend can derive folder structure for `song`
    fn supports(&self, song: &Song) -> bool;

    async fn extract_folder_structure(&self, song: &Song) -> Result<()>;
}
