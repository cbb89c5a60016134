//! Shared fixtures for scanner integration tests

use async_trait::async_trait;
use encore_artwork::CoverResolver;
use encore_core::types::{
    Album, AlbumId, Artist, ArtistId, CoverSource, Song, SongUpsert, UserId,
};
use encore_core::{CoverWriter, MediaRepository, Result};
use encore_scanner::{EntityResolver, FileScanner};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// === Audio fixtures ===

/// Build a valid PCM WAV file (16-bit mono, 8 kHz) holding `seconds` of
/// silence.
pub fn wav_bytes(seconds: u32) -> Vec<u8> {
    let sample_rate: u32 = 8000;
    let data_len = sample_rate * seconds * 2;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
    bytes.extend_from_slice(&2u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0);
    bytes
}

pub fn create_wav(dir: &Path, name: &str, seconds: u32) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, wav_bytes(seconds)).expect("failed to write wav");
    path
}

pub fn write_tag(path: &Path, build: impl FnOnce(&mut lofty::Tag)) {
    use lofty::TagExt;

    let mut tag = lofty::Tag::new(lofty::TagType::Id3v2);
    build(&mut tag);
    tag.save_to_path(path).expect("failed to write tag");
}

/// One-second WAV tagged with the usual trio of fields
pub fn tagged_wav(dir: &Path, name: &str, title: &str, artist: &str, album: &str) -> PathBuf {
    use lofty::Accessor;

    let path = create_wav(dir, name, 1);
    let (title, artist, album) = (title.to_string(), artist.to_string(), album.to_string());
    write_tag(&path, |tag| {
        tag.set_title(title);
        tag.set_artist(artist);
        tag.set_album(album);
    });
    path
}

/// Rewrite a file's modification time so it reads as changed
pub fn bump_mtime(path: &Path, unix_seconds: u64) {
    let file = std::fs::OpenOptions::new()
        .write(true)
        .open(path)
        .expect("failed to open file");
    file.set_modified(std::time::UNIX_EPOCH + std::time::Duration::from_secs(unix_seconds))
        .expect("failed to set mtime");
}

pub fn write_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_pixel(4, 4, image::Rgb([120, 40, 200]))
        .save(&path)
        .expect("failed to write test image");
    path
}

// === Repository fake ===

#[derive(Default)]
pub struct MemoryState {
    pub songs: HashMap<String, Song>,
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    next_id: i64,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory `MediaRepository` with store-call counters, mirroring the
/// owner-set-once and year-first-write-wins semantics of the SQLite adapter.
#[derive(Default)]
pub struct MemoryRepository {
    pub state: Mutex<MemoryState>,
    pub artist_store_calls: AtomicUsize,
    pub album_store_calls: AtomicUsize,
    pub upsert_calls: AtomicUsize,
}

impl MemoryRepository {
    pub fn song(&self, path: &Path) -> Option<Song> {
        self.state
            .lock()
            .unwrap()
            .songs
            .get(&path.to_string_lossy().into_owned())
            .cloned()
    }

    pub fn artist_named(&self, name: &str) -> Option<Artist> {
        self.state
            .lock()
            .unwrap()
            .artists
            .iter()
            .find(|a| a.name == name)
            .cloned()
    }

    pub fn album_named(&self, name: &str) -> Option<Album> {
        self.state
            .lock()
            .unwrap()
            .albums
            .iter()
            .find(|a| a.name == name)
            .cloned()
    }

    pub fn artist_count(&self) -> usize {
        self.state.lock().unwrap().artists.len()
    }

    pub fn album_count(&self) -> usize {
        self.state.lock().unwrap().albums.len()
    }

    pub fn song_count(&self) -> usize {
        self.state.lock().unwrap().songs.len()
    }
}

#[async_trait]
impl MediaRepository for MemoryRepository {
    async fn find_song_by_path(&self, path: &str) -> Result<Option<Song>> {
        Ok(self.state.lock().unwrap().songs.get(path).cloned())
    }

    async fn upsert_song(&self, upsert: SongUpsert) -> Result<Song> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();

        let song = if let Some(existing) = state.songs.get(&upsert.path) {
            Song {
                id: existing.id,
                // Owner and creation time never change on update
                owner_id: existing.owner_id,
                created_at: existing.created_at.clone(),
                path: upsert.path.clone(),
                title: upsert.title,
                artist_id: upsert.artist_id,
                album_id: upsert.album_id,
                is_public: upsert.is_public,
                storage: upsert.storage,
                track_number: upsert.track_number,
                disc_number: upsert.disc_number,
                year: upsert.year,
                genre: upsert.genre,
                lyrics: upsert.lyrics,
                duration_seconds: upsert.duration_seconds,
                mtime: upsert.mtime,
                updated_at: String::new(),
            }
        } else {
            let id = state.next_id();
            Song {
                id,
                path: upsert.path.clone(),
                title: upsert.title,
                artist_id: upsert.artist_id,
                album_id: upsert.album_id,
                owner_id: upsert.owner_id,
                is_public: upsert.is_public,
                storage: upsert.storage,
                track_number: upsert.track_number,
                disc_number: upsert.disc_number,
                year: upsert.year,
                genre: upsert.genre,
                lyrics: upsert.lyrics,
                duration_seconds: upsert.duration_seconds,
                mtime: upsert.mtime,
                created_at: String::new(),
                updated_at: String::new(),
            }
        };

        state.songs.insert(upsert.path, song.clone());
        Ok(song)
    }

    async fn find_artist_by_id(&self, id: ArtistId) -> Result<Option<Artist>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .artists
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_album_by_id(&self, id: AlbumId) -> Result<Option<Album>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .albums
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn get_or_create_artist(&self, owner: UserId, name: &str) -> Result<Artist> {
        self.artist_store_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();

        if let Some(artist) = state
            .artists
            .iter()
            .find(|a| a.owner_id == owner && a.name == name)
        {
            return Ok(artist.clone());
        }

        let artist = Artist {
            id: state.next_id(),
            owner_id: owner,
            name: name.to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        };
        state.artists.push(artist.clone());
        Ok(artist)
    }

    async fn get_or_create_album(&self, artist: &Artist, name: &str) -> Result<Album> {
        self.album_store_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();

        if let Some(album) = state
            .albums
            .iter()
            .find(|a| a.artist_id == artist.id && a.name == name)
        {
            return Ok(album.clone());
        }

        let album = Album {
            id: state.next_id(),
            artist_id: artist.id,
            name: name.to_string(),
            year: None,
            cover: None,
            created_at: String::new(),
            updated_at: String::new(),
        };
        state.albums.push(album.clone());
        Ok(album)
    }

    async fn set_album_year_if_missing(&self, id: AlbumId, year: i32) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(album) = state.albums.iter_mut().find(|a| a.id == id) {
            if album.year.is_none() {
                album.year = Some(year);
            }
        }
        Ok(())
    }

    async fn set_album_cover(&self, id: AlbumId, cover: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(album) = state.albums.iter_mut().find(|a| a.id == id) {
            album.cover = Some(cover.to_string());
        }
        Ok(())
    }
}

// === Folder structure fake ===

/// Folder-structure hook that records the songs it is invoked for and can
/// be told to fail
#[derive(Default)]
pub struct RecordingFolderStructure {
    pub extracted: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait]
impl encore_core::FolderStructureExtractor for RecordingFolderStructure {
    fn supports(&self, song: &Song) -> bool {
        song.storage == encore_core::types::SongStorage::Local
    }

    async fn extract_folder_structure(&self, song: &Song) -> Result<()> {
        if self.fail {
            return Err(encore_core::EncoreError::storage("derivation failed"));
        }
        self.extracted.lock().unwrap().push(song.path.clone());
        Ok(())
    }
}

// === Cover writer fake ===

/// Records the cover sources it is asked to persist and marks the album
#[derive(Default)]
pub struct RecordingCoverWriter {
    pub writes: Mutex<Vec<(AlbumId, CoverSource)>>,
}

impl RecordingCoverWriter {
    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

#[async_trait]
impl CoverWriter for RecordingCoverWriter {
    async fn write_album_cover(&self, album: &Album, image: CoverSource) -> Result<()> {
        self.writes.lock().unwrap().push((album.id, image));
        Ok(())
    }
}

// === Harness ===

/// Repository, resolver, caches, and writer wired the way the syncer wires
/// them, with scanners handed out per file.
pub struct Harness {
    pub repo: Arc<MemoryRepository>,
    pub writer: Arc<RecordingCoverWriter>,
    pub resolver: Arc<EntityResolver<MemoryRepository>>,
    pub covers: Arc<CoverResolver>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    pub fn new() -> Self {
        init_tracing();
        let repo = Arc::new(MemoryRepository::default());
        Self {
            resolver: Arc::new(EntityResolver::new(repo.clone())),
            covers: Arc::new(CoverResolver::new()),
            writer: Arc::new(RecordingCoverWriter::default()),
            repo,
        }
    }

    pub fn scanner(&self) -> FileScanner<MemoryRepository> {
        FileScanner::new(
            self.repo.clone(),
            self.resolver.clone(),
            self.covers.clone(),
            self.writer.clone(),
        )
    }
}
