//! Encore artwork
//!
//! Cover art handling for the scanning engine:
//!
//! - `resolver`: finds `cover.*`/`folder.*` images next to media files,
//!   validated by decoding and cached per directory
//! - `writer`: persists a chosen cover into the covers directory and records
//!   it on the album
//!
//! Everything here is best-effort from the scanner's point of view: a
//! missing or corrupt cover never fails a song scan.

mod resolver;
mod writer;

pub use resolver::CoverResolver;
pub use writer::FilesystemCoverWriter;
