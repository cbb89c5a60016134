//! `MediaRepository` implementation over the SQLite pool

use crate::{albums, artists, songs};
use async_trait::async_trait;
use encore_core::types::{Album, AlbumId, Artist, ArtistId, Song, SongUpsert, UserId};
use encore_core::{MediaRepository, Result};
use sqlx::SqlitePool;

/// SQLite-backed catalog repository
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl MediaRepository for SqliteRepository {
    async fn find_song_by_path(&self, path: &str) -> Result<Option<Song>> {
        Ok(songs::find_by_path(&self.pool, path).await?)
    }

    async fn upsert_song(&self, upsert: SongUpsert) -> Result<Song> {
        Ok(songs::upsert(&self.pool, upsert).await?)
    }

    async fn find_artist_by_id(&self, id: ArtistId) -> Result<Option<Artist>> {
        Ok(artists::get_by_id(&self.pool, id).await?)
    }

    async fn find_album_by_id(&self, id: AlbumId) -> Result<Option<Album>> {
        Ok(albums::get_by_id(&self.pool, id).await?)
    }

    async fn get_or_create_artist(&self, owner: UserId, name: &str) -> Result<Artist> {
        Ok(artists::get_or_create(&self.pool, owner, name).await?)
    }

    async fn get_or_create_album(&self, artist: &Artist, name: &str) -> Result<Album> {
        Ok(albums::get_or_create(&self.pool, artist.id, name).await?)
    }

    async fn set_album_year_if_missing(&self, id: AlbumId, year: i32) -> Result<()> {
        Ok(albums::set_year_if_missing(&self.pool, id, year).await?)
    }

    async fn set_album_cover(&self, id: AlbumId, cover: &str) -> Result<()> {
        Ok(albums::set_cover(&self.pool, id, cover).await?)
    }
}
