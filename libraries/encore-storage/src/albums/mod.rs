use crate::error::{Result, StorageError};
use encore_core::types::{Album, AlbumId, ArtistId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn from_row(row: &SqliteRow) -> Album {
    Album {
        id: row.get("id"),
        artist_id: row.get("artist_id"),
        name: row.get("name"),
        year: row.get("year"),
        cover: row.get("cover"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

pub async fn get_by_id(pool: &SqlitePool, id: AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query(
        "SELECT id, artist_id, name, year, cover, created_at, updated_at
         FROM albums
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| from_row(&row)))
}

pub async fn find_by_name(
    pool: &SqlitePool,
    artist_id: ArtistId,
    name: &str,
) -> Result<Option<Album>> {
    let row = sqlx::query(
        "SELECT id, artist_id, name, year, cover, created_at, updated_at
         FROM albums
         WHERE artist_id = ? AND name = ?",
    )
    .bind(artist_id)
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| from_row(&row)))
}

/// Return the album named `name` by `artist_id`, creating it if absent.
///
/// Race-safe on the `(artist_id, name)` unique constraint.
pub async fn get_or_create(pool: &SqlitePool, artist_id: ArtistId, name: &str) -> Result<Album> {
    if let Some(album) = find_by_name(pool, artist_id, name).await? {
        return Ok(album);
    }

    sqlx::query(
        "INSERT INTO albums (artist_id, name)
         VALUES (?, ?)
         ON CONFLICT (artist_id, name) DO NOTHING",
    )
    .bind(artist_id)
    .bind(name)
    .execute(pool)
    .await?;

    find_by_name(pool, artist_id, name)
        .await?
        .ok_or_else(|| StorageError::not_found("album", name))
}

/// Record the album year unless one is already set (first write wins)
pub async fn set_year_if_missing(pool: &SqlitePool, id: AlbumId, year: i32) -> Result<()> {
    sqlx::query(
        "UPDATE albums
         SET year = ?, updated_at = CURRENT_TIMESTAMP
         WHERE id = ? AND year IS NULL",
    )
    .bind(year)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Record the album's cover file name
pub async fn set_cover(pool: &SqlitePool, id: AlbumId, cover: &str) -> Result<()> {
    sqlx::query(
        "UPDATE albums
         SET cover = ?, updated_at = CURRENT_TIMESTAMP
         WHERE id = ?",
    )
    .bind(cover)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}
