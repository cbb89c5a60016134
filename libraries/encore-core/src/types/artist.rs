//! Artist types

use super::UserId;
use serde::{Deserialize, Serialize};

pub type ArtistId = i64;

/// An artist, unique per `(owner_id, name)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub owner_id: UserId,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}
