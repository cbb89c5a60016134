//! Album types

use super::ArtistId;
use serde::{Deserialize, Serialize};

pub type AlbumId = i64;

/// An album, unique per `(artist_id, name)`.
///
/// `year` is only ever set once (first song that supplies one wins) and
/// `cover` holds the file name written by the cover writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub artist_id: ArtistId,
    pub name: String,
    pub year: Option<i32>,
    pub cover: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Album {
    pub fn has_cover(&self) -> bool {
        self.cover.is_some()
    }
}
