use crate::error::{Result, StorageError};
use encore_core::types::{Artist, ArtistId, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn from_row(row: &SqliteRow) -> Artist {
    Artist {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

pub async fn get_by_id(pool: &SqlitePool, id: ArtistId) -> Result<Option<Artist>> {
    let row = sqlx::query(
        "SELECT id, owner_id, name, created_at, updated_at
         FROM artists
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| from_row(&row)))
}

pub async fn find_by_name(
    pool: &SqlitePool,
    owner_id: UserId,
    name: &str,
) -> Result<Option<Artist>> {
    let row = sqlx::query(
        "SELECT id, owner_id, name, created_at, updated_at
         FROM artists
         WHERE owner_id = ? AND name = ?",
    )
    .bind(owner_id)
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| from_row(&row)))
}

/// Return the artist named `name` under `owner_id`, creating it if absent.
///
/// Race-safe: concurrent callers racing on the insert converge on the row
/// guarded by the `(owner_id, name)` unique constraint.
pub async fn get_or_create(pool: &SqlitePool, owner_id: UserId, name: &str) -> Result<Artist> {
    if let Some(artist) = find_by_name(pool, owner_id, name).await? {
        return Ok(artist);
    }

    sqlx::query(
        "INSERT INTO artists (owner_id, name)
         VALUES (?, ?)
         ON CONFLICT (owner_id, name) DO NOTHING",
    )
    .bind(owner_id)
    .bind(name)
    .execute(pool)
    .await?;

    find_by_name(pool, owner_id, name)
        .await?
        .ok_or_else(|| StorageError::not_found("artist", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_pool;

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let pool = test_pool().await;

        let first = get_or_create(&pool, 1, "Led Zeppelin").await.unwrap();
        let second = get_or_create(&pool, 1, "Led Zeppelin").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.name, "Led Zeppelin");
        assert_eq!(first.owner_id, 1);
    }

    #[tokio::test]
    async fn same_name_under_different_owners_is_two_artists() {
        let pool = test_pool().await;

        let a = get_or_create(&pool, 1, "Nico").await.unwrap();
        let b = get_or_create(&pool, 2, "Nico").await.unwrap();

        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn find_by_name_misses_for_unknown_artist() {
        let pool = test_pool().await;

        assert!(find_by_name(&pool, 1, "Nobody").await.unwrap().is_none());
    }
}
