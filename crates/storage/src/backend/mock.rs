//! In-memory storage backend for testing.

use crate::StorageBackend;
use crate::error::{ErrorKind, Result};
use crate::file::FileMeta;
use crate::path::validate as validate_path;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use time::OffsetDateTime;
use tokio::sync::RwLock;

/// In-memory storage backend for testing.
///
/// Files are stored in a `HashMap` behind a [`RwLock`], so all trait methods
/// can operate on `&self` without external synchronisation. Modification
/// times can be rewound with [`set_modified()`](Self::set_modified) to
/// simulate cache files written in the past, and every write is counted.
///
/// # Examples
///
/// ```
/// use tubestat_storage::backend::{MockBackend, StorageBackend};
/// use std::path::Path;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = MockBackend::with_files([("videos.json", b"[]")]);
/// assert!(backend.exists(Path::new("videos.json")).await?);
///
/// backend.write(Path::new("details.json"), b"[]").await?;
/// assert_eq!(backend.writes(), 1);
/// # Ok(())
/// # }
/// ```
pub struct MockBackend {
    name: String,
    storage: RwLock<HashMap<PathBuf, (OffsetDateTime, Vec<u8>)>>,
    writes: AtomicUsize,
}

impl MockBackend {
    /// Create a mock backend pre-populated with files, all stamped as
    /// modified now.
    ///
    /// Panics if any path fails validation (e.g. path traversal). If test
    /// setup is wrong, then test should not pass.
    pub fn with_files(files: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<Vec<u8>>)>) -> Self {
        let mut map = HashMap::new();
        let now = OffsetDateTime::now_utc();
        for (path, data) in files {
            let path = path.into();
            let Ok(validated) = validate_path(&path) else {
                // The panic here is DELIBERATE. MockBackend is intended to be
                // used in tests; panics are expected. There is no error result.
                panic!("MockBackend::with_files: invalid path {}", path.display());
            };
            map.insert(validated, (now, data.into()));
        }
        Self {
            name: "mock".to_string(),
            storage: RwLock::new(map),
            writes: AtomicUsize::new(0),
        }
    }

    /// Overwrite the modification time of an existing file.
    pub async fn set_modified(&self, path: impl AsRef<Path>, modified: OffsetDateTime) -> Result<()> {
        let path = validate_path(path)?;
        let mut guard = self.storage.write().await;
        let entry = guard.get_mut(&path).ok_or_else(|| exn::Exn::from(ErrorKind::NotFound(path.clone())))?;
        entry.0 = modified;
        Ok(())
    }

    /// Number of writes performed through the [`StorageBackend`] interface.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}
impl Default for MockBackend {
    fn default() -> Self {
        let files: [(&str, &str); 0] = [];
        Self::with_files(files)
    }
}

#[async_trait]
impl StorageBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        let path = validate_path(path)?;
        Ok(self.storage.read().await.contains_key(&path))
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let path = validate_path(path)?;
        let (_modified, data) =
            self.storage.read().await.get(&path).cloned().ok_or_else(|| exn::Exn::from(ErrorKind::NotFound(path)))?;
        Ok(data)
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let path = validate_path(path)?;
        self.storage.write().await.insert(path, (OffsetDateTime::now_utc(), data.to_vec()));
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn stat(&self, path: &Path) -> Result<FileMeta> {
        let path = validate_path(path)?;
        let guard = self.storage.read().await;
        let (modified, data) = guard.get(&path).ok_or_else(|| exn::Exn::from(ErrorKind::NotFound(path.clone())))?;
        Ok(FileMeta::new(path.clone(), data.len() as u64, *modified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[tokio::test]
    async fn test_write_and_read() {
        let backend = MockBackend::default();
        backend.write(Path::new("videos.json"), b"[]").await.unwrap();
        assert_eq!(backend.read(Path::new("videos.json")).await.unwrap(), b"[]");
        assert_eq!(backend.writes(), 1);
    }

    #[tokio::test]
    async fn test_with_files_does_not_count_writes() {
        let backend = MockBackend::with_files([("videos.json", Vec::from(*b"[]"))]);
        assert!(backend.exists(Path::new("videos.json")).await.unwrap());
        assert!(!backend.exists(Path::new("details.json")).await.unwrap());
        assert_eq!(backend.writes(), 0);
    }

    #[tokio::test]
    async fn test_read_not_found() {
        let backend = MockBackend::default();
        let err = backend.read(Path::new("missing.json")).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[tokio::test]
    async fn test_set_modified() {
        let backend = MockBackend::with_files([("videos.json", Vec::from(*b"[]"))]);
        let past = datetime!(2020-01-01 00:00 UTC);
        backend.set_modified("videos.json", past).await.unwrap();
        let meta = backend.stat(Path::new("videos.json")).await.unwrap();
        assert_eq!(meta.modified, past);
        assert_eq!(meta.size, 2);
        // Writing refreshes the timestamp
        backend.write(Path::new("videos.json"), b"[1]").await.unwrap();
        assert!(backend.stat(Path::new("videos.json")).await.unwrap().modified > past);
    }

    #[tokio::test]
    async fn test_set_modified_not_found() {
        let backend = MockBackend::default();
        let err = backend.set_modified("missing.json", OffsetDateTime::now_utc()).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let backend = MockBackend::default();
        assert!(backend.read(Path::new("../etc/passwd")).await.is_err());
        assert!(backend.write(Path::new("../escape"), b"bad").await.is_err());
        assert_eq!(backend.writes(), 0);
    }

    #[test]
    #[should_panic(expected = "invalid path")]
    fn test_with_files_panics_on_bad_path() {
        MockBackend::with_files([("../escape", Vec::from(*b"bad"))]);
    }
}
