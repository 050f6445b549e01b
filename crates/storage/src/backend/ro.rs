//! Read-only storage backend.
//!
//! Wraps another backend and prevents write operations from executing, while
//! still reporting success. Used for dry runs: caches are read and updated in
//! memory, but nothing on disk changes (including modification times).

use async_trait::async_trait;
use std::path::Path;

use crate::{BackendHandle, StorageBackend, error::Result, file::FileMeta};

/// Read-only storage backend.
///
/// Silently drops all write operations, logging an
/// [`info event`](tracing::Event) for each.
#[derive(Clone)]
pub struct ReadOnlyBackend {
    inner: BackendHandle,
}
impl ReadOnlyBackend {
    pub fn new(inner: BackendHandle) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StorageBackend for ReadOnlyBackend {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        self.inner.exists(path).await
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.inner.read(path).await
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        tracing::info!(path = %path.display(), bytes = data.len(), "Skipping write during read-only mode");
        Ok(())
    }

    async fn stat(&self, path: &Path) -> Result<FileMeta> {
        self.inner.stat(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_writes_are_dropped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let local = LocalBackend::new("local", temp_dir.path()).unwrap();
        local.write(Path::new("videos.json"), b"[]").await.unwrap();
        let before = local.stat(Path::new("videos.json")).await.unwrap();

        let backend = ReadOnlyBackend::new(Arc::new(local.clone()));
        backend.write(Path::new("videos.json"), b"[1]").await.unwrap();
        backend.write(Path::new("details.json"), b"[]").await.unwrap();

        assert_eq!(backend.name(), "local");
        assert_eq!(backend.read(Path::new("videos.json")).await.unwrap(), b"[]");
        assert_eq!(backend.stat(Path::new("videos.json")).await.unwrap(), before);
        assert!(!backend.exists(Path::new("details.json")).await.unwrap());
    }
}
