//! Sidecar lyrics files
//!
//! Only consulted when the tag itself carried no lyrics.

use std::path::Path;

/// Extensions probed for a sidecar lyrics file, in order
const SIDECAR_EXTENSIONS: &[&str] = &["lrc", "txt"];

/// Read lyrics from a sidecar file sharing `media_path`'s base name.
///
/// Returns `None` when no sidecar exists, it cannot be read, or it holds
/// only whitespace. Never an error: sidecar lyrics are purely additive.
pub fn read_sidecar(media_path: &Path) -> Option<String> {
    for extension in SIDECAR_EXTENSIONS {
        let candidate = media_path.with_extension(extension);
        if let Ok(contents) = std::fs::read_to_string(&candidate) {
            if !contents.trim().is_empty() {
                tracing::debug!(
                    media = %media_path.display(),
                    sidecar = %candidate.display(),
                    "using sidecar lyrics"
                );
                return Some(contents);
            }
        }
    }

    None
}
