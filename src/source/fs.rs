//! Filesystem-backed image source.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use crate::error::SourceError;

use super::ImageSource;

/// Image source rooted at a directory of original images.
///
/// Paths handed to this source must already be resolved (see
/// [`resolve`](crate::source::resolve)); this type only joins them onto the
/// root and reads.
#[derive(Debug, Clone)]
pub struct FsImageSource {
    root: PathBuf,
}

impl FsImageSource {
    /// Create a source over the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The source root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, rel: &Path) -> PathBuf {
        self.root.join(rel)
    }
}

#[async_trait]
impl ImageSource for FsImageSource {
    async fn contains(&self, rel: &Path) -> bool {
        fs::try_exists(self.full_path(rel)).await.unwrap_or(false)
    }

    async fn read(&self, rel: &Path) -> Result<Bytes, SourceError> {
        match fs::read(self.full_path(rel)).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(SourceError::NotFound(rel.display().to_string()))
            }
            Err(e) => Err(SourceError::Io(e.to_string())),
        }
    }
}
