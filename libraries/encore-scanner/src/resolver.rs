//! Artist/album resolution with a time-bounded cache
//!
//! During a scan, many files in sequence (or in parallel) name the same
//! artist and album. Resolution funnels every lookup through a shared TTL
//! cache so N files sharing a name cost one get-or-create against the store.
//! The cache is advisory: the store's get-or-create is race-safe on its own,
//! so a stale or missed entry degrades hit rate, never correctness.

use crate::error::Result;
use encore_core::types::{Album, Artist, UserId};
use encore_core::{MediaRepository, TtlCache};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;

/// How long resolved entities stay cached
const ENTITY_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Artist name used when a file carries no usable artist tag
pub const UNKNOWN_ARTIST_NAME: &str = "Unknown Artist";

/// Album name used when a file carries no usable album tag
pub const UNKNOWN_ALBUM_NAME: &str = "Unknown Album";

/// Memoizing front for the repository's get-or-create operations
pub struct EntityResolver<R: MediaRepository> {
    repo: Arc<R>,
    artists: TtlCache<Artist>,
    albums: TtlCache<Album>,
    ttl: Duration,
}

impl<R: MediaRepository> EntityResolver<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self::with_ttl(repo, ENTITY_CACHE_TTL)
    }

    /// Create a resolver with a custom cache lifetime. `Duration::ZERO`
    /// turns the cache into a deterministic pass-through for tests.
    pub fn with_ttl(repo: Arc<R>, ttl: Duration) -> Self {
        Self {
            repo,
            artists: TtlCache::new(),
            albums: TtlCache::new(),
            ttl,
        }
    }

    /// Resolve the artist named `name` under `owner`, creating it if absent.
    ///
    /// Names are trimmed before keying; a blank name resolves to the
    /// Unknown Artist sentinel.
    pub async fn resolve_artist(&self, owner: UserId, name: &str) -> Result<Artist> {
        let name = normalized(name, UNKNOWN_ARTIST_NAME);
        let key = cache_key("artist", owner, name);

        let artist = self
            .artists
            .remember(&key, self.ttl, || async {
                self.repo.get_or_create_artist(owner, name).await
            })
            .await?;
        Ok(artist)
    }

    /// Resolve the album named `name` by `artist`, creating it if absent
    pub async fn resolve_album(&self, artist: &Artist, name: &str) -> Result<Album> {
        let name = normalized(name, UNKNOWN_ALBUM_NAME);
        let key = cache_key("album", artist.id, name);

        let album = self
            .albums
            .remember(&key, self.ttl, || async {
                self.repo.get_or_create_album(artist, name).await
            })
            .await?;
        Ok(album)
    }
}

fn normalized<'a>(name: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

/// Deterministic cache key over the owning scope and the trimmed name
fn cache_key(scope: &str, scope_id: i64, name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(scope.as_bytes());
    hasher.update(scope_id.to_le_bytes());
    hasher.update(name.as_bytes());
    hex::encode(hasher.finalize())
}
