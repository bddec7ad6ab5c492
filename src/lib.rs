//! # img-resizer
//!
//! An on-demand image resize server with a persistent disk cache.
//!
//! The server exposes a single derivative endpoint: given a relative path
//! into a local image directory, a target width, and a quality, it decodes
//! the source image, scales it proportionally, re-encodes it as WebP or JPEG
//! (negotiated from the request's `Accept` header), and caches the result on
//! disk so repeated requests are served without re-processing.
//!
//! ## Features
//!
//! - **Content negotiation**: WebP for clients that accept it, JPEG otherwise
//! - **Persistent cache**: derivatives survive restarts; atomic writes via
//!   temp-file-and-rename
//! - **Traversal-safe paths**: caller paths are normalized and confined to
//!   the image directory
//! - **Graceful degradation**: cache write failures never fail a request
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`source`] - Source image tree access and path resolution
//! - [`resize`] - Derivative pipeline: key derivation, transform engine,
//!   artifact store, orchestrating service
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//! - [`error`] - Error types for every layer
//!
//! ## Example
//!
//! ```rust,no_run
//! use img_resizer::resize::{ArtifactStore, ResizeService};
//! use img_resizer::server::{create_router, RouterConfig};
//! use img_resizer::source::FsImageSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = FsImageSource::new("Images");
//!     let store = ArtifactStore::new("Images/.cache");
//!     let service = ResizeService::new(source, store);
//!
//!     let router = create_router(service, RouterConfig::default());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod resize;
pub mod server;
pub mod source;

// Re-export commonly used types
pub use config::Config;
pub use error::{ResizeError, ResolveError, SourceError, StoreError, TransformError};
pub use resize::{
    clamp_quality, derive_key, ArtifactStore, OutputFormat, ResizeEngine, ResizeRequest,
    ResizeResponse, ResizeService, DEFAULT_QUALITY, DEFAULT_WIDTH, MAX_QUALITY, MIN_QUALITY,
};
pub use server::{
    create_router, health_handler, resize_handler, AppState, ErrorResponse, HealthResponse,
    ResizeQueryParams, RouterConfig,
};
pub use source::{resolve, FsImageSource, ImageSource};
