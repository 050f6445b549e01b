//! JSON cache files.
//!
//! A cache file is a bare JSON array of records (no envelope, no version). Its
//! modification time, as reported by the storage backend, is the staleness
//! clock, so it must only ever be written when its content changes.

use crate::error::{ErrorKind, Result};
use crate::staleness::StalenessPolicy;
use exn::ResultExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tubestat_storage::BackendHandle;

/// What was found when opening a cache file.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheState<T> {
    /// No cache file yet; it has to be populated from scratch.
    Missing,
    /// Written within the staleness threshold; use as-is.
    Fresh(Vec<T>),
    /// Old enough that the upstream API should be checked for additions.
    Stale(Vec<T>),
}

/// A typed handle on one cache file inside a storage backend.
pub struct CacheFile<T> {
    backend: BackendHandle,
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}
impl<T> CacheFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(backend: BackendHandle, path: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> Result<bool> {
        self.backend.exists(&self.path).await.or_raise(|| ErrorKind::Storage(self.path.clone()))
    }

    /// Load every record, or `None` if the file doesn't exist.
    pub async fn load(&self) -> Result<Option<Vec<T>>> {
        if !self.exists().await? {
            return Ok(None);
        }
        let bytes = self.backend.read(&self.path).await.or_raise(|| ErrorKind::Storage(self.path.clone()))?;
        let records = serde_json::from_slice(&bytes).or_raise(|| ErrorKind::InvalidData(self.path.clone()))?;
        Ok(Some(records))
    }

    /// When the file was last written.
    pub async fn modified(&self) -> Result<OffsetDateTime> {
        let meta = self.backend.stat(&self.path).await.or_raise(|| ErrorKind::Storage(self.path.clone()))?;
        Ok(meta.modified)
    }

    /// Load the file and classify it against the staleness policy.
    pub async fn open(&self, policy: &StalenessPolicy) -> Result<CacheState<T>> {
        let Some(records) = self.load().await? else {
            return Ok(CacheState::Missing);
        };
        let modified = self.modified().await?;
        match policy.is_due(modified) {
            true => Ok(CacheState::Stale(records)),
            false => Ok(CacheState::Fresh(records)),
        }
    }

    /// Replace the file's contents with `records`.
    pub async fn persist(&self, records: &[T]) -> Result<()> {
        let bytes = serde_json::to_vec(records).or_raise(|| ErrorKind::Encode(self.path.clone()))?;
        self.backend.write(&self.path, &bytes).await.or_raise(|| ErrorKind::Storage(self.path.clone()))?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "Persisted cache file");
        Ok(())
    }
}
