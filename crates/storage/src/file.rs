//! File metadata reported by storage backends.

use std::path::PathBuf;
use time::OffsetDateTime;

/// Metadata for a single stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    /// Relative path from storage root
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modified timestamp; the staleness clock for cache files
    pub modified: OffsetDateTime,
}
impl FileMeta {
    pub fn new(path: impl Into<PathBuf>, size: u64, modified: impl Into<OffsetDateTime>) -> Self {
        Self {
            path: path.into(),
            size,
            modified: modified.into(),
        }
    }
}
