//! Source image access.
//!
//! Original images live in a read-only tree written by an out-of-scope
//! ingestion process. This module provides the [`ImageSource`] seam over that
//! tree plus the path resolver that keeps caller-supplied paths inside it.

mod fs;
mod resolver;

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::SourceError;

pub use fs::FsImageSource;
pub use resolver::resolve;

/// Abstraction over the tree of original images.
///
/// The concrete implementation is [`FsImageSource`]; tests substitute an
/// in-memory mock.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Whether a source image exists at the resolved relative path.
    async fn contains(&self, rel: &Path) -> bool;

    /// Read the raw bytes of a source image.
    async fn read(&self, rel: &Path) -> Result<Bytes, SourceError>;
}
