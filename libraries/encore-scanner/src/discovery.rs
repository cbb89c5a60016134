//! Media file discovery under library roots

use crate::error::{Result, ScanError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Audio file extensions picked up by a scan
const MEDIA_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "opus", "wav", "m4a", "aac"];

/// Walks directories for media files
pub struct MediaDiscovery {
    /// Whether to follow symbolic links
    follow_links: bool,

    /// Maximum depth to traverse (unlimited when unset)
    max_depth: Option<usize>,
}

impl Default for MediaDiscovery {
    fn default() -> Self {
        Self {
            follow_links: false,
            max_depth: None,
        }
    }
}

impl MediaDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum directory depth to traverse
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Recursively collect media files under `path`, sorted for a stable
    /// processing order.
    pub fn scan_directory(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !path.exists() {
            return Err(ScanError::FileNotFound(path.display().to_string()));
        }

        if !path.is_dir() {
            return Err(ScanError::InvalidPath(format!(
                "{} is not a directory",
                path.display()
            )));
        }

        let mut walker = WalkDir::new(path).follow_links(self.follow_links);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut files: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.path().is_file() && is_media_file(entry.path()))
            .map(walkdir::DirEntry::into_path)
            .collect();
        files.sort();

        Ok(files)
    }

    /// Collect media files across several roots. A root that cannot be
    /// walked is logged and skipped; the others still contribute.
    pub fn scan_directories(&self, roots: &[PathBuf]) -> Vec<PathBuf> {
        let mut all_files = Vec::new();

        for root in roots {
            match self.scan_directory(root) {
                Ok(mut files) => all_files.append(&mut files),
                Err(e) => {
                    tracing::warn!(root = %root.display(), error = %e, "failed to scan root");
                }
            }
        }

        all_files
    }

    /// Filter `paths` down to existing media files
    pub fn validate_files(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        paths
            .iter()
            .filter(|path| path.exists() && path.is_file() && is_media_file(path))
            .cloned()
            .collect()
    }
}

/// Check if a file has a supported media extension
pub fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MEDIA_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
