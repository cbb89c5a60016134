//! Filesystem cover writer

use async_trait::async_trait;
use encore_core::types::{Album, CoverSource};
use encore_core::{CoverWriter, MediaRepository, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Writes album covers into a covers directory and records the file name on
/// the album.
pub struct FilesystemCoverWriter {
    covers_dir: PathBuf,
    repo: Arc<dyn MediaRepository>,
}

impl FilesystemCoverWriter {
    pub fn new(covers_dir: impl Into<PathBuf>, repo: Arc<dyn MediaRepository>) -> Self {
        Self {
            covers_dir: covers_dir.into(),
            repo,
        }
    }

    /// Full path a given album cover file name resolves to
    pub fn cover_path(&self, file_name: &str) -> PathBuf {
        self.covers_dir.join(file_name)
    }
}

#[async_trait]
impl CoverWriter for FilesystemCoverWriter {
    async fn write_album_cover(&self, album: &Album, image: CoverSource) -> Result<()> {
        std::fs::create_dir_all(&self.covers_dir)?;

        let (bytes, extension) = match image {
            CoverSource::Embedded(art) => {
                let extension = extension_for_mime(&art.mime).to_string();
                (art.data, extension)
            }
            CoverSource::File(path) => {
                let extension = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("jpg")
                    .to_lowercase();
                (std::fs::read(&path)?, extension)
            }
        };

        let file_name = format!("album-{}.{}", album.id, extension);
        std::fs::write(self.covers_dir.join(&file_name), &bytes)?;
        self.repo.set_album_cover(album.id, &file_name).await?;

        tracing::debug!(album = album.id, file = %file_name, "wrote album cover");
        Ok(())
    }
}

fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        _ => "jpg",
    }
}
