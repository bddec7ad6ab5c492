use thiserror::Error;

/// Errors from resolving a caller-supplied path against the source root.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// The path was empty after stripping leading slashes and the mount prefix
    #[error("Empty path")]
    Empty,

    /// The normalized path still contains a parent-directory token
    #[error("Path escapes the source root: {0}")]
    Traversal(String),
}

/// Errors from reading original images out of the source tree.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// Source image does not exist
    #[error("Source image not found: {0}")]
    NotFound(String),

    /// Filesystem error while reading the source image
    #[error("I/O error reading source: {0}")]
    Io(String),
}

/// Errors from the disk-backed artifact store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No artifact stored under the requested key
    #[error("Artifact not found: {0}")]
    NotFound(String),

    /// Filesystem error (directory creation, write, rename)
    #[error("Cache I/O error: {0}")]
    Io(String),
}

/// Errors from the in-memory decode/resize/encode pipeline.
#[derive(Debug, Clone, Error)]
pub enum TransformError {
    /// Source bytes are not a decodable image
    #[error("Failed to decode source image: {message}")]
    Decode { message: String },

    /// The target format/quality combination could not be produced
    #[error("Failed to encode derivative: {message}")]
    Encode { message: String },
}

/// Service-level errors surfaced to the HTTP layer.
///
/// Cache-store failures never appear here: a failed artifact write is logged
/// and the freshly computed bytes are served anyway.
#[derive(Debug, Clone, Error)]
pub enum ResizeError {
    /// Invalid or traversal-attempting path (HTTP 400)
    #[error("Invalid path: {0}")]
    InvalidPath(#[from] ResolveError),

    /// Resolved source file does not exist (HTTP 404)
    #[error("Source image not found: {path}")]
    SourceNotFound { path: String },

    /// Source exists but could not be read (HTTP 500)
    #[error("Failed to read source image: {0}")]
    SourceIo(String),

    /// Decode or encode failure (HTTP 500)
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl From<SourceError> for ResizeError {
    fn from(err: SourceError) -> Self {
        match err {
            // The existence check raced a deletion; still a 404 to the caller
            SourceError::NotFound(path) => ResizeError::SourceNotFound { path },
            SourceError::Io(msg) => ResizeError::SourceIo(msg),
        }
    }
}
