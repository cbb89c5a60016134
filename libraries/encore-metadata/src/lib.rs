//! Encore metadata extraction
//!
//! Reads structured metadata out of audio files for the scanning engine:
//!
//! - `extractor`: tag fields, audio properties, and embedded cover art via
//!   lofty
//! - `lyrics`: sidecar lyrics files matched by base name
//!
//! Extraction is a pure read; failures are per-file and typed so the scanner
//! can report them without aborting a run.

mod error;

pub mod extractor;
pub mod lyrics;

pub use error::{Result, TagError};
pub use extractor::extract;
