//! Resize service: per-request orchestration.
//!
//! Each request walks the same pipeline:
//!
//! ```text
//! resolve path ──► source exists? ──► derive key ──► store lookup
//!                        │404                            │
//!                        ▼                          hit ◄─┴─► miss
//!                     terminal                       │         │
//!                                                stored     read source
//!                                                bytes      transform
//!                                                           persist (best effort)
//! ```
//!
//! Requests are independent; the only shared resource is the artifact store's
//! directory. Concurrent identical misses both compute and both write, which
//! is accepted (deterministic transforms, idempotent writes).

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::error::ResizeError;
use crate::source::{resolve, ImageSource};

use super::engine::{clamp_quality, ResizeEngine, DEFAULT_QUALITY, DEFAULT_WIDTH};
use super::key::derive_key;
use super::store::ArtifactStore;
use super::OutputFormat;

/// Parameters for one derivative request.
#[derive(Debug, Clone)]
pub struct ResizeRequest {
    /// Raw caller-supplied path, percent-decoded by the query layer
    pub path: String,

    /// Target width in pixels
    pub width: u32,

    /// Encoding quality (1-100; ignored for WebP)
    pub quality: u8,

    /// Negotiated output format
    pub format: OutputFormat,
}

impl ResizeRequest {
    /// Create a request with explicit parameters.
    pub fn new(path: impl Into<String>, width: u32, quality: u8, format: OutputFormat) -> Self {
        Self {
            path: path.into(),
            width,
            quality: clamp_quality(quality),
            format,
        }
    }

    /// Create a request with the default width and quality.
    pub fn with_defaults(path: impl Into<String>, format: OutputFormat) -> Self {
        Self::new(path, DEFAULT_WIDTH, DEFAULT_QUALITY, format)
    }
}

/// Response from the resize service.
#[derive(Debug, Clone)]
pub struct ResizeResponse {
    /// Encoded derivative bytes
    pub data: Bytes,

    /// Format the derivative was encoded in
    pub format: OutputFormat,

    /// Whether the bytes came from the artifact store
    pub cache_hit: bool,
}

/// Orchestrates path resolution, cache lookup, transformation, and
/// persistence for derivative requests.
///
/// # Type Parameters
///
/// * `S` - The source-image backend (filesystem in production, mock in tests)
pub struct ResizeService<S: ImageSource> {
    source: Arc<S>,
    store: ArtifactStore,
    engine: ResizeEngine,
}

impl<S: ImageSource> ResizeService<S> {
    /// Create a service over a source tree and an artifact store.
    pub fn new(source: S, store: ArtifactStore) -> Self {
        Self {
            source: Arc::new(source),
            store,
            engine: ResizeEngine::new(),
        }
    }

    /// The artifact store backing this service.
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Serve one derivative request.
    ///
    /// Returns the stored artifact on a cache hit, otherwise computes the
    /// derivative, persists it best-effort, and returns the fresh bytes. A
    /// failed cache write is logged and never surfaced to the caller.
    pub async fn get_derivative(
        &self,
        request: ResizeRequest,
    ) -> Result<ResizeResponse, ResizeError> {
        let rel = resolve(&request.path)?;

        if !self.source.contains(&rel).await {
            return Err(ResizeError::SourceNotFound {
                path: rel.display().to_string(),
            });
        }

        let key = derive_key(&rel, request.width, request.quality, request.format);

        if self.store.exists(&key).await {
            match self.store.read(&key).await {
                Ok(data) => {
                    debug!(key = %key, "serving cached derivative");
                    return Ok(ResizeResponse {
                        data,
                        format: request.format,
                        cache_hit: true,
                    });
                }
                Err(e) => {
                    // Raced a concurrent writer or a purge; recompute
                    warn!(key = %key, "cached artifact unreadable, recomputing: {}", e);
                }
            }
        }

        let source_bytes = self.source.read(&rel).await?;
        let data = self
            .engine
            .transform(&source_bytes, request.width, request.format, request.quality)?;

        if let Err(e) = self.store.write(&key, &data).await {
            // Degrades to recompute-on-every-request; the response still works
            warn!(key = %key, "failed to persist derivative: {}", e);
        }

        Ok(ResizeResponse {
            data,
            format: request.format,
            cache_hit: false,
        })
    }
}
