//! Dataset Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A dataset error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for dataset operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A detail record belongs to no listed video: the two caches have
    /// diverged. Delete the detail cache and sync again.
    #[display("detail record for video {_0} matches no listed video, the caches have diverged")]
    Mismatch(#[error(not(source))] String),
    /// Writing the exported table failed.
    #[display("failed to export dataset")]
    Export,
}
