//! Storage filename derivation for uploaded videos.
//!
//! Two conventions are in use:
//!
//! - `{sha256(url)}.{ext}` for URL registrations, so the same URL always
//!   maps to the same storage key.
//! - `{uuid}.{ext}` for inline uploads, where every upload gets a fresh key.
//!
//! In both cases `ext` is taken from the user-supplied filename.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Extension used when the supplied filename carries none.
pub const DEFAULT_EXTENSION: &str = "mp4";

/// Return the text after the last `.` in `filename`, or [`DEFAULT_EXTENSION`].
///
/// A trailing dot (`"clip."`) also falls back to the default.
///
/// ```
/// use vidhost_core::naming::file_extension;
///
/// assert_eq!(file_extension("holiday.webm"), "webm");
/// assert_eq!(file_extension("archive.tar.gz"), "gz");
/// assert_eq!(file_extension("README"), "mp4");
/// ```
pub fn file_extension(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext,
        _ => DEFAULT_EXTENSION,
    }
}

/// Deterministic storage filename for a video registered by URL.
///
/// The stem is the lowercase hex SHA-256 of the URL bytes, so it is always
/// 64 characters regardless of URL length.
pub fn hashed_storage_filename(video_url: &str, original_name: &str) -> String {
    let url_key = Sha256::digest(video_url.as_bytes());
    format!("{url_key:x}.{}", file_extension(original_name))
}

/// Fresh random storage filename for an inline upload.
pub fn unique_storage_filename(original_name: &str) -> String {
    format!(
        "{}.{}",
        Uuid::new_v4().simple(),
        file_extension(original_name)
    )
}
