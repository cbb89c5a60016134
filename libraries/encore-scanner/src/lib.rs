//! Encore scanning engine
//!
//! Keeps the catalog in sync with the files on disk: walks library roots,
//! extracts tags, resolves artists and albums through a shared TTL cache,
//! upserts path-keyed songs, and reports one tagged outcome per file.
//!
//! # Architecture
//!
//! - `discovery`: filesystem walking for media files
//! - `resolver`: artist/album get-or-create behind a time-bounded cache
//! - `file_scanner`: the per-file skip/new/changed state machine
//! - `sync`: orchestration over library roots with aggregated stats
//!
//! The engine only talks to the collaborator traits in `encore-core`
//! (`MediaRepository`, `CoverWriter`, `FolderStructureExtractor`), so any
//! store can back it; `encore-storage` ships the SQLite implementation.

mod error;

pub mod discovery;
pub mod file_scanner;
pub mod resolver;
pub mod sync;

pub use discovery::MediaDiscovery;
pub use error::{Result, ScanError};
pub use file_scanner::FileScanner;
pub use resolver::{EntityResolver, UNKNOWN_ALBUM_NAME, UNKNOWN_ARTIST_NAME};
pub use sync::{LibrarySyncer, ProgressCallback, ScanStats};
