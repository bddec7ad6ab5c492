//! Path resolution for caller-supplied image paths.
//!
//! Incoming paths arrive percent-decoded from the query layer. Before they can
//! be joined to the source root they are:
//!
//! 1. Stripped of leading slashes (`/images/foo.jpg` and `images/foo.jpg` are
//!    both accepted).
//! 2. Stripped of a redundant leading `images/` segment, case-insensitively,
//!    since callers often paste URLs that include the public mount name.
//! 3. Normalized: `.` segments are dropped and `..` segments collapse against
//!    preceding ones.
//!
//! The traversal check runs *after* normalization. Normalization is what
//! collapses encoded traversal attempts into a detectable form; any `..`
//! remaining afterwards means the path would escape the source root.

use std::path::PathBuf;

use crate::error::ResolveError;

/// Public mount name under which the source tree is served.
///
/// A leading `images/` in the request path duplicates this mount and is
/// stripped before resolution.
const PUBLIC_MOUNT: &str = "images";

/// Resolve a raw, percent-decoded request path to a path that is safe to
/// join onto the source root.
///
/// Does not touch the filesystem; existence is checked by the caller.
///
/// # Errors
///
/// Returns [`ResolveError::Empty`] if nothing remains after stripping, and
/// [`ResolveError::Traversal`] if the normalized path still contains a
/// parent-directory token.
pub fn resolve(raw: &str) -> Result<PathBuf, ResolveError> {
    let trimmed = raw.trim_start_matches('/');
    let trimmed = strip_mount_prefix(trimmed);

    let normalized = normalize(trimmed);
    if normalized.is_empty() {
        return Err(ResolveError::Empty);
    }

    // Substring check on purpose: a lone surviving ".." segment escapes the
    // root, and filenames containing ".." are not worth distinguishing here.
    if normalized.contains("..") {
        return Err(ResolveError::Traversal(normalized));
    }

    Ok(PathBuf::from(normalized))
}

/// Strip a single leading `images/` segment (any case, any number of
/// separating slashes). A bare `images` with no trailing slash is a filename,
/// not a mount prefix, and is left alone.
fn strip_mount_prefix(path: &str) -> &str {
    if path.len() > PUBLIC_MOUNT.len()
        && path[..PUBLIC_MOUNT.len()].eq_ignore_ascii_case(PUBLIC_MOUNT)
        && path.as_bytes()[PUBLIC_MOUNT.len()] == b'/'
    {
        path[PUBLIC_MOUNT.len() + 1..].trim_start_matches('/')
    } else {
        path
    }
}

/// Collapse `.` and `..` segments the way filesystem path normalization does.
///
/// A `..` with no preceding segment to cancel is kept, so the caller's
/// post-normalization check can reject it.
fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(&s) if s != "..") {
                    segments.pop();
                } else {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}
