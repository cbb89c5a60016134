use crate::error::{Result, StorageError};
use encore_core::types::{Song, SongStorage, SongUpsert};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn from_row(row: &SqliteRow) -> Song {
    let storage: String = row.get("storage");
    Song {
        id: row.get("id"),
        path: row.get("path"),
        title: row.get("title"),
        artist_id: row.get("artist_id"),
        album_id: row.get("album_id"),
        owner_id: row.get("owner_id"),
        is_public: row.get("is_public"),
        storage: SongStorage::from(storage.as_str()),
        track_number: row.get("track_number"),
        disc_number: row.get("disc_number"),
        year: row.get("year"),
        genre: row.get("genre"),
        lyrics: row.get("lyrics"),
        duration_seconds: row.get("duration_seconds"),
        mtime: row.get("mtime"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

pub async fn find_by_path(pool: &SqlitePool, path: &str) -> Result<Option<Song>> {
    let row = sqlx::query(
        "SELECT id, path, title, artist_id, album_id, owner_id, is_public, storage,
                track_number, disc_number, year, genre, lyrics, duration_seconds, mtime,
                created_at, updated_at
         FROM songs
         WHERE path = ?",
    )
    .bind(path)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| from_row(&row)))
}

/// Create or fully update the song stored under `upsert.path`.
///
/// On conflict every field is replaced except `owner_id` and `created_at`:
/// the owner is fixed at creation and later scans never rewrite it.
pub async fn upsert(pool: &SqlitePool, upsert: SongUpsert) -> Result<Song> {
    sqlx::query(
        "INSERT INTO songs (
            path, title, artist_id, album_id, owner_id, is_public, storage,
            track_number, disc_number, year, genre, lyrics, duration_seconds, mtime
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (path) DO UPDATE SET
            title = excluded.title,
            artist_id = excluded.artist_id,
            album_id = excluded.album_id,
            is_public = excluded.is_public,
            storage = excluded.storage,
            track_number = excluded.track_number,
            disc_number = excluded.disc_number,
            year = excluded.year,
            genre = excluded.genre,
            lyrics = excluded.lyrics,
            duration_seconds = excluded.duration_seconds,
            mtime = excluded.mtime,
            updated_at = CURRENT_TIMESTAMP",
    )
    .bind(&upsert.path)
    .bind(&upsert.title)
    .bind(upsert.artist_id)
    .bind(upsert.album_id)
    .bind(upsert.owner_id)
    .bind(upsert.is_public)
    .bind(upsert.storage.as_str())
    .bind(upsert.track_number)
    .bind(upsert.disc_number)
    .bind(upsert.year)
    .bind(&upsert.genre)
    .bind(&upsert.lyrics)
    .bind(upsert.duration_seconds)
    .bind(upsert.mtime)
    .execute(pool)
    .await?;

    find_by_path(pool, &upsert.path)
        .await?
        .ok_or_else(|| StorageError::not_found("song", &upsert.path))
}
