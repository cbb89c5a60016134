//! Cover art types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw cover image bytes with their declared MIME type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverArt {
    pub data: Vec<u8>,
    pub mime: String,
}

impl CoverArt {
    pub fn new(data: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            data,
            mime: mime.into(),
        }
    }
}

/// Where an album cover comes from.
///
/// Embedded art (from the audio file's tag) is preferred over a cover image
/// discovered next to the file.
#[derive(Debug, Clone)]
pub enum CoverSource {
    Embedded(CoverArt),
    File(PathBuf),
}
