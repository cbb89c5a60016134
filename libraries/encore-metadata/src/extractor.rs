//! Tag extraction from audio files

use crate::error::{Result, TagError};
use encore_core::types::{CoverArt, SongScanInformation};
use lofty::{Accessor, AudioFile, PictureType, Probe, TaggedFileExt};
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Extract tag metadata, audio properties, and embedded cover art from one
/// audio file.
///
/// A pure read: the file is never modified. Unparseable files surface as
/// [`TagError::Parse`]; a parseable file with no playable duration is
/// [`TagError::EmptyFile`].
pub fn extract(path: &Path) -> Result<SongScanInformation> {
    if !path.exists() {
        return Err(TagError::FileNotFound(path.display().to_string()));
    }

    let mtime = file_mtime(path)?;

    let tagged_file = Probe::open(path)
        .map_err(|e| TagError::Parse(e.to_string()))?
        .read()
        .map_err(|e| TagError::Parse(e.to_string()))?;

    let duration = tagged_file.properties().duration();
    if duration.is_zero() {
        return Err(TagError::EmptyFile);
    }

    // Prefer the format's primary tag (ID3v2 for MP3, Vorbis for OGG/FLAC)
    let tag = tagged_file.primary_tag().or(tagged_file.first_tag());

    let mut info = SongScanInformation {
        path: path.to_path_buf(),
        duration_seconds: duration.as_secs_f64(),
        mtime,
        ..Default::default()
    };

    if let Some(tag) = tag {
        info.title = tag.title().map(|s| s.to_string());
        info.artist = tag.artist().map(|s| s.to_string());
        info.album = tag.album().map(|s| s.to_string());
        info.album_artist = tag
            .get_string(&lofty::ItemKey::AlbumArtist)
            .map(|s| s.to_string());
        info.track_number = tag.track().map(|t| t as i32);
        info.disc_number = tag.disk().map(|d| d as i32);
        info.year = tag.year().map(|y| y as i32);
        info.genre = tag.genre().map(|s| s.to_string());
        info.lyrics = tag
            .get_string(&lofty::ItemKey::Lyrics)
            .map(|s| s.to_string());
        info.cover = extract_cover(tag);
    }

    Ok(info)
}

/// Pick the embedded picture to use as cover art: front cover if declared,
/// otherwise the first picture in the tag.
fn extract_cover(tag: &lofty::Tag) -> Option<CoverArt> {
    let pictures = tag.pictures();
    let picture = pictures
        .iter()
        .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
        .or_else(|| pictures.first())?;

    let mime = picture
        .mime_type()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "image/jpeg".to_string());

    Some(CoverArt::new(picture.data().to_vec(), mime))
}

fn file_mtime(path: &Path) -> Result<i64> {
    let metadata = std::fs::metadata(path)?;
    Ok(metadata
        .modified()
        .map(|t| {
            t.duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0)
        })
        .unwrap_or(0))
}
