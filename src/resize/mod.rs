//! Derivative generation and caching.
//!
//! This layer sits between the HTTP handlers and the source tree:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │             ResizeService               │
//! │  ┌───────────────┐  ┌────────────────┐  │
//! │  │ ArtifactStore │  │  ResizeEngine  │  │
//! │  │ (disk cache)  │  │ (decode →      │  │
//! │  │               │  │  scale →       │  │
//! │  │               │  │  encode)       │  │
//! │  └───────────────┘  └────────────────┘  │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │            ImageSource                  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`ResizeService`]: orchestrates resolve → lookup → transform → persist
//! - [`ArtifactStore`]: durable, append-only key → blob map on disk
//! - [`ResizeEngine`]: pure in-memory decode/scale/encode
//! - [`OutputFormat`]: negotiated WebP-or-JPEG output encoding
//! - [`derive_key`]: deterministic cache key from path + parameters

mod engine;
mod format;
mod key;
mod service;
mod store;

pub use engine::{
    clamp_quality, ResizeEngine, DEFAULT_QUALITY, DEFAULT_WIDTH, MAX_QUALITY, MIN_QUALITY,
};
pub use format::OutputFormat;
pub use key::derive_key;
pub use service::{ResizeRequest, ResizeResponse, ResizeService};
pub use store::ArtifactStore;
