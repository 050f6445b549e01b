//! Cache Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A cache error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Reading or writing a cache file through the storage backend failed.
    #[display("cache storage error: {}", _0.display())]
    Storage(#[error(not(source))] PathBuf),
    /// The cache file exists but does not hold a JSON array of the expected
    /// records. Delete it to have it rebuilt from scratch.
    #[display("invalid cache data: {}", _0.display())]
    InvalidData(#[error(not(source))] PathBuf),
    /// The records could not be encoded for writing.
    #[display("could not encode cache data: {}", _0.display())]
    Encode(#[error(not(source))] PathBuf),
    /// The metadata source failed (network, quota, authentication...). The
    /// cache makes no retry attempt; run again later.
    #[display("metadata fetch failed: {_0}")]
    Fetch(#[error(not(source))] String),
}
