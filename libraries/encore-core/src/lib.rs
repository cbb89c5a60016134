//! Encore core types and traits
//!
//! Shared foundation for the scanning engine: catalog types (songs, artists,
//! albums), scan configuration and results, the collaborator traits the
//! scanner consumes, and the TTL cache primitive behind entity resolution
//! and cover discovery.

pub mod cache;
pub mod error;
pub mod traits;
pub mod types;

pub use cache::TtlCache;
pub use error::{EncoreError, Result};
pub use traits::{CoverWriter, FolderStructureExtractor, MediaRepository};
