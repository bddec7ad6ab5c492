//! Cache key derivation.
//!
//! A key deterministically identifies one (source path, width, quality,
//! format) combination. Keys are built by escaping, not hashing, so any
//! change in any field changes the key: path separators become `_`, then the
//! width and quality are appended as decimal integers and the format as an
//! extension.
//!
//! `kojic/1.jpg` at w=200 q=70 as WebP yields `kojic_1.jpg_w200_q70.webp`.
//!
//! Known limitation: a source filename that itself contains `_` can collide
//! with a path using `/` in the same position (`a_b.jpg` vs `a/b.jpg`).
//! Accepted — the source tree is ingested by a controlled process and the
//! consequence of a collision is a shared derivative, not an escape.

use std::path::Path;

use super::OutputFormat;

/// Derive the filesystem-safe cache key for a resolved source path and its
/// transformation parameters.
pub fn derive_key(path: &Path, width: u32, quality: u8, format: OutputFormat) -> String {
    let flat: String = path
        .to_string_lossy()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();

    format!("{}_w{}_q{}{}", flat, width, quality, format.extension())
}
