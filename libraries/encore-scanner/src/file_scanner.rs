//! Per-file scan state machine
//!
//! `set_file` binds the scanner to one file; `scan` classifies it as
//! skipped, successfully synced, or failed. State (`path`, `song`,
//! `file_mtime`) is per-file, so concurrent scans want one scanner binding
//! per file; the resolver and cover caches behind it are shared.

use crate::error::{Result, ScanError};
use crate::resolver::EntityResolver;
use encore_artwork::CoverResolver;
use encore_core::types::{
    Album, Artist, CoverSource, ScanConfiguration, ScanResult, Song, SongScanInformation,
    SongStorage, SongUpsert,
};
use encore_core::{CoverWriter, FolderStructureExtractor, MediaRepository};
use encore_metadata::{extractor, lyrics};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::UNIX_EPOCH;

/// Reason reported for any failure other than metadata extraction. Kept
/// generic so internal details never leak to end consumers.
pub(crate) const INVALID_FILE_REASON: &str = "Possible invalid file";

enum Outcome {
    Skipped,
    Synced,
}

/// Scans one file at a time into the catalog
pub struct FileScanner<R: MediaRepository> {
    repo: Arc<R>,
    resolver: Arc<EntityResolver<R>>,
    covers: Arc<CoverResolver>,
    cover_writer: Arc<dyn CoverWriter>,
    folder_structure: Option<Arc<dyn FolderStructureExtractor>>,
    path: Option<PathBuf>,
    song: Option<Song>,
    file_mtime: Option<i64>,
}

impl<R: MediaRepository> FileScanner<R> {
    pub fn new(
        repo: Arc<R>,
        resolver: Arc<EntityResolver<R>>,
        covers: Arc<CoverResolver>,
        cover_writer: Arc<dyn CoverWriter>,
    ) -> Self {
        Self {
            repo,
            resolver,
            covers,
            cover_writer,
            folder_structure: None,
            path: None,
            song: None,
            file_mtime: None,
        }
    }

    /// Attach the folder-structure capability hook
    pub fn with_folder_structure(mut self, extractor: Arc<dyn FolderStructureExtractor>) -> Self {
        self.folder_structure = Some(extractor);
        self
    }

    /// Bind the scanner to one file: load any existing catalog record for
    /// its path and the file's current modification time. Must be called
    /// before [`scan`](Self::scan).
    pub async fn set_file(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();

        let metadata = std::fs::metadata(&path)?;
        let mtime = metadata
            .modified()
            .map(|t| {
                t.duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs() as i64)
                    .unwrap_or(0)
            })
            .unwrap_or(0);

        self.song = self.repo.find_song_by_path(&path.to_string_lossy()).await?;
        self.file_mtime = Some(mtime);
        self.path = Some(path);
        Ok(())
    }

    /// No catalog record exists for the bound path. Meaningful only after
    /// `set_file`.
    pub fn is_file_new(&self) -> bool {
        self.song.is_none()
    }

    /// A record exists but its stored mtime differs from the filesystem's
    pub fn is_file_changed(&self) -> bool {
        match (&self.song, self.file_mtime) {
            (Some(song), Some(mtime)) => song.mtime != mtime,
            _ => false,
        }
    }

    pub fn is_file_new_or_changed(&self) -> bool {
        self.is_file_new() || self.is_file_changed()
    }

    /// The currently bound catalog record.
    ///
    /// Fails with [`ScanError::NotBound`] before `set_file`, or after a scan
    /// that produced no record.
    pub fn song(&self) -> Result<&Song> {
        self.song.as_ref().ok_or(ScanError::NotBound)
    }

    /// Scan the bound file and classify the outcome.
    ///
    /// Extraction failures are reported with their own reason; any other
    /// failure is logged with its cause and reported generically. Either
    /// way the failure stays local to this file.
    pub async fn scan(&mut self, config: &ScanConfiguration) -> ScanResult {
        let Some(path) = self.path.clone() else {
            tracing::error!("scan invoked with no file bound");
            return ScanResult::Error {
                path: PathBuf::new(),
                reason: INVALID_FILE_REASON.to_string(),
            };
        };

        match self.process(&path, config).await {
            Ok(Outcome::Skipped) => ScanResult::Skipped { path },
            Ok(Outcome::Synced) => ScanResult::Success { path },
            Err(ScanError::Extraction(e)) => {
                tracing::warn!(file = %path.display(), error = %e, "metadata extraction failed");
                ScanResult::Error {
                    path,
                    reason: e.to_string(),
                }
            }
            Err(e) => {
                tracing::error!(file = %path.display(), error = %e, "scan failed");
                ScanResult::Error {
                    path,
                    reason: INVALID_FILE_REASON.to_string(),
                }
            }
        }
    }

    async fn process(&mut self, path: &Path, config: &ScanConfiguration) -> Result<Outcome> {
        if !config.force && !self.is_file_new_or_changed() {
            return Ok(Outcome::Skipped);
        }

        let mut info = extractor::extract(path)?;
        if info.lyrics.is_none() {
            info.lyrics = lyrics::read_sidecar(path);
        }

        let is_new = self.is_file_new();
        // Re-scans leave operator-curated fields alone; new files take
        // whatever the tag says.
        let ignored = |field: &str| !is_new && config.ignores(field);

        let artist = self.resolve_artist(&info, config, ignored("artist")).await?;

        let album_artist = match info
            .album_artist
            .as_deref()
            .filter(|_| !ignored("albumartist"))
        {
            Some(name) => self.resolver.resolve_artist(config.owner, name).await?,
            None => artist.clone(),
        };

        let album = self
            .resolve_album(&info, &album_artist, ignored("album"))
            .await?;

        if !album.has_cover() && !config.ignores("cover") {
            self.generate_album_cover(&album, &info, path).await;
        }

        let existing = self.song.as_ref();

        let title = if ignored("title") {
            existing.map(|s| s.title.clone())
        } else {
            info.title.clone()
        };
        let title = title.unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Unknown")
                .to_string()
        });

        let upsert = SongUpsert {
            path: path.to_string_lossy().into_owned(),
            title,
            artist_id: artist.id,
            album_id: album.id,
            owner_id: config.owner,
            is_public: config.make_public,
            storage: SongStorage::Local,
            track_number: if ignored("track") {
                existing.and_then(|s| s.track_number)
            } else {
                info.track_number
            },
            disc_number: if ignored("disc") {
                existing.and_then(|s| s.disc_number)
            } else {
                info.disc_number
            },
            year: if ignored("year") {
                existing.and_then(|s| s.year)
            } else {
                info.year
            },
            genre: if ignored("genre") {
                existing.and_then(|s| s.genre.clone())
            } else {
                info.genre.clone()
            },
            lyrics: if ignored("lyrics") {
                existing.and_then(|s| s.lyrics.clone())
            } else {
                info.lyrics.clone()
            },
            duration_seconds: info.duration_seconds,
            mtime: info.mtime,
        };

        let song = self.repo.upsert_song(upsert).await?;

        // First song that knows the year names it; later years never win.
        if album.year.is_none() {
            if let Some(year) = song.year {
                self.repo.set_album_year_if_missing(album.id, year).await?;
            }
        }

        if config.extract_folder_structure {
            if let Some(extractor) = &self.folder_structure {
                if extractor.supports(&song) {
                    if let Err(e) = extractor.extract_folder_structure(&song).await {
                        tracing::warn!(
                            file = %path.display(),
                            error = %e,
                            "folder structure derivation failed"
                        );
                    }
                }
            }
        }

        self.song = Some(song);
        Ok(Outcome::Synced)
    }

    /// Artist for the bound file: the tag's artist when usable, else the
    /// existing record's artist, else the Unknown Artist sentinel.
    async fn resolve_artist(
        &self,
        info: &SongScanInformation,
        config: &ScanConfiguration,
        ignored: bool,
    ) -> Result<Artist> {
        if let Some(name) = info.artist.as_deref().filter(|_| !ignored) {
            return self.resolver.resolve_artist(config.owner, name).await;
        }

        if let Some(song) = &self.song {
            if let Some(artist) = self.repo.find_artist_by_id(song.artist_id).await? {
                return Ok(artist);
            }
        }

        self.resolver.resolve_artist(config.owner, "").await
    }

    /// Album for the bound file, scoped under the album artist
    async fn resolve_album(
        &self,
        info: &SongScanInformation,
        album_artist: &Artist,
        ignored: bool,
    ) -> Result<Album> {
        if let Some(name) = info.album.as_deref().filter(|_| !ignored) {
            return self.resolver.resolve_album(album_artist, name).await;
        }

        if let Some(song) = &self.song {
            if let Some(album) = self.repo.find_album_by_id(song.album_id).await? {
                return Ok(album);
            }
        }

        self.resolver.resolve_album(album_artist, "").await
    }

    /// Best-effort cover generation: embedded art wins over a cover file in
    /// the song's directory; every failure is logged and swallowed.
    async fn generate_album_cover(
        &self,
        album: &Album,
        info: &SongScanInformation,
        path: &Path,
    ) {
        let source = if let Some(art) = info.cover.clone() {
            Some(CoverSource::Embedded(art))
        } else {
            path.parent()
                .and_then(|dir| self.covers.find_in_directory(dir))
                .map(CoverSource::File)
        };

        let Some(source) = source else {
            return;
        };

        if let Err(e) = self.cover_writer.write_album_cover(album, source).await {
            tracing::warn!(album = album.id, error = %e, "failed to write album cover");
        }
    }
}
