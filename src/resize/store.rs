//! Disk-backed artifact store.
//!
//! A flat directory mapping cache keys to previously generated derivatives.
//! The store is append-only for the lifetime of the process and beyond: no
//! expiry, no eviction, no size accounting. Artifacts survive restarts and
//! are only ever removed by manual purging outside the service.
//!
//! # Concurrency
//!
//! Multiple tasks (or processes) may hit the same directory. Writes are not
//! mutually excluded: two concurrent misses for the same key may both write,
//! which is wasted work but harmless because derivatives are deterministic
//! functions of the key. Each write lands in a uniquely named temp file and
//! is renamed into place, so readers never observe a partially written
//! artifact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use tokio::fs;

use crate::error::StoreError;

/// Counter distinguishing temp files written by concurrent tasks.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Directory-backed key → blob map for cached derivatives.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store over the given cache directory.
    ///
    /// The directory is not created here; it is created lazily by the first
    /// [`write`](Self::write).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The cache directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn artifact_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Whether an artifact is stored under `key`.
    pub async fn exists(&self, key: &str) -> bool {
        fs::try_exists(self.artifact_path(key)).await.unwrap_or(false)
    }

    /// Read the artifact stored under `key`.
    ///
    /// Fails with [`StoreError::NotFound`] if absent; callers racing a
    /// concurrent writer are expected to tolerate this and recompute.
    pub async fn read(&self, key: &str) -> Result<Bytes, StoreError> {
        match fs::read(self.artifact_path(key)).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(key.to_string()))
            }
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    /// Persist `data` under `key`.
    ///
    /// Creates the cache directory (and parents) idempotently on first use.
    /// The bytes are written to a temp file in the same directory and renamed
    /// into place so a concurrent reader sees either nothing or the complete
    /// artifact.
    pub async fn write(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(".{}.{}-{}.tmp", key, std::process::id(), seq);
        let tmp_path = self.root.join(tmp_name);

        if let Err(e) = fs::write(&tmp_path, data).await {
            return Err(StoreError::Io(e.to_string()));
        }

        if let Err(e) = fs::rename(&tmp_path, self.artifact_path(key)).await {
            // Best effort: don't leave the temp file behind on failure
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StoreError::Io(e.to_string()));
        }

        Ok(())
    }
}
