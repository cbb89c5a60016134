//! Directory cover discovery

use encore_core::TtlCache;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory verdicts rarely change between runs, so they live long
const COVER_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const COVER_STEMS: &[&str] = &["cover", "folder"];
const COVER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Finds a cover image file among a directory's immediate children.
///
/// Verdicts (including "no cover here") are cached per directory because
/// listing and decoding are expensive relative to how often cover files
/// change. Shared across concurrent scanner instances.
pub struct CoverResolver {
    cache: TtlCache<Option<PathBuf>>,
    ttl: Duration,
}

impl Default for CoverResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverResolver {
    pub fn new() -> Self {
        Self::with_ttl(COVER_CACHE_TTL)
    }

    /// Create a resolver with a custom verdict lifetime. A zero duration
    /// disables caching.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            cache: TtlCache::new(),
            ttl,
        }
    }

    /// Find a usable cover image in `dir`.
    ///
    /// Candidates are files named `cover` or `folder` (case-insensitive)
    /// with a jpg/jpeg/png extension. The lexicographically first candidate
    /// is decoded to prove it is a real image; if that fails the directory
    /// counts as having no cover.
    pub fn find_in_directory(&self, dir: &Path) -> Option<PathBuf> {
        let key = dir.to_string_lossy().into_owned();
        if let Some(verdict) = self.cache.get(&key) {
            return verdict;
        }

        let verdict = discover(dir);
        self.cache.insert(key, verdict.clone(), self.ttl);
        verdict
    }
}

fn discover(dir: &Path) -> Option<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "cannot list directory for covers");
            return None;
        }
    };

    let mut candidates: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| is_cover_candidate(name))
        .collect();

    // Raw listing order is filesystem-dependent; sort for a stable pick.
    candidates.sort();

    let path = dir.join(candidates.first()?);
    match image::open(&path) {
        Ok(_) => Some(path),
        Err(e) => {
            tracing::debug!(file = %path.display(), error = %e, "cover candidate is not a valid image");
            None
        }
    }
}

fn is_cover_candidate(name: &str) -> bool {
    let lower = name.to_lowercase();
    let Some((stem, extension)) = lower.rsplit_once('.') else {
        return false;
    };
    COVER_STEMS.contains(&stem) && COVER_EXTENSIONS.contains(&extension)
}
