//! Library synchronization across configured roots
//!
//! The orchestrator: enumerates media files, drives the per-file scanner
//! over each, and aggregates the outcomes. One file's failure never aborts
//! the run.

use crate::discovery::MediaDiscovery;
use crate::file_scanner::{FileScanner, INVALID_FILE_REASON};
use crate::resolver::EntityResolver;
use encore_artwork::CoverResolver;
use encore_core::types::{ScanConfiguration, ScanResult};
use encore_core::{CoverWriter, FolderStructureExtractor, MediaRepository};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Statistics from a library sync
#[derive(Debug, Default, Clone)]
pub struct ScanStats {
    pub total_files: i64,
    pub succeeded: i64,
    pub skipped: i64,
    pub errors: i64,
    /// Per-file failures, with the reason reported to the operator
    pub failures: Vec<(PathBuf, String)>,
}

/// Callback for per-file progress updates
pub type ProgressCallback = Box<dyn Fn(&ScanStats, &ScanResult) + Send + Sync>;

/// Drives file scanners over every media file under the library roots
pub struct LibrarySyncer<R: MediaRepository + 'static> {
    repo: Arc<R>,
    resolver: Arc<EntityResolver<R>>,
    covers: Arc<CoverResolver>,
    cover_writer: Arc<dyn CoverWriter>,
    folder_structure: Option<Arc<dyn FolderStructureExtractor>>,
    discovery: MediaDiscovery,
    progress_callback: Option<ProgressCallback>,
}

impl<R: MediaRepository + 'static> LibrarySyncer<R> {
    pub fn new(repo: Arc<R>, cover_writer: Arc<dyn CoverWriter>) -> Self {
        Self {
            resolver: Arc::new(EntityResolver::new(repo.clone())),
            covers: Arc::new(CoverResolver::new()),
            repo,
            cover_writer,
            folder_structure: None,
            discovery: MediaDiscovery::new(),
            progress_callback: None,
        }
    }

    /// Replace the default discovery settings
    pub fn with_discovery(mut self, discovery: MediaDiscovery) -> Self {
        self.discovery = discovery;
        self
    }

    /// Attach the folder-structure capability hook
    pub fn with_folder_structure(mut self, extractor: Arc<dyn FolderStructureExtractor>) -> Self {
        self.folder_structure = Some(extractor);
        self
    }

    /// Set progress callback, invoked after every file
    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// A scanner wired to this syncer's shared caches and collaborators
    pub fn file_scanner(&self) -> FileScanner<R> {
        let scanner = FileScanner::new(
            self.repo.clone(),
            self.resolver.clone(),
            self.covers.clone(),
            self.cover_writer.clone(),
        );
        match &self.folder_structure {
            Some(extractor) => scanner.with_folder_structure(extractor.clone()),
            None => scanner,
        }
    }

    /// Walk `roots` and scan every media file found, aggregating per-file
    /// outcomes into [`ScanStats`].
    pub async fn sync(&self, roots: &[PathBuf], config: &ScanConfiguration) -> ScanStats {
        let started = Instant::now();
        let files = self.discovery.scan_directories(roots);

        let mut stats = ScanStats {
            total_files: files.len() as i64,
            ..Default::default()
        };
        let mut scanner = self.file_scanner();

        for file in files {
            let result = match scanner.set_file(file.clone()).await {
                Ok(()) => scanner.scan(config).await,
                Err(e) => {
                    tracing::error!(file = %file.display(), error = %e, "cannot bind file for scanning");
                    ScanResult::Error {
                        path: file,
                        reason: INVALID_FILE_REASON.to_string(),
                    }
                }
            };

            match &result {
                ScanResult::Success { .. } => stats.succeeded += 1,
                ScanResult::Skipped { .. } => stats.skipped += 1,
                ScanResult::Error { path, reason } => {
                    stats.errors += 1;
                    stats.failures.push((path.clone(), reason.clone()));
                }
            }

            if let Some(callback) = &self.progress_callback {
                callback(&stats, &result);
            }
        }

        tracing::info!(
            total = stats.total_files,
            succeeded = stats.succeeded,
            skipped = stats.skipped,
            errors = stats.errors,
            elapsed = ?started.elapsed(),
            "library sync completed"
        );

        stats
    }
}
