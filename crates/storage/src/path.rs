//! Path validation for backend-relative paths.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validates and normalizes a backend-relative path.
///
/// Cache locations come from user configuration, so a path must never be
/// allowed to climb out of the backend root. `.` components and repeated or
/// trailing separators are dropped, `..` is resolved as long as it stays
/// inside the root, and a leading `/` is treated as the root itself.
///
/// # Returns
/// The normalized path, or [`InvalidPath`](crate::error::ErrorKind::InvalidPath)
/// if it escapes the root, contains a null byte, or is empty.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use tubestat_storage::validate_path;
///
/// assert_eq!(validate_path("videos.json").unwrap(), Path::new("videos.json"));
/// assert_eq!(validate_path("./cache//details.json").unwrap(), Path::new("cache/details.json"));
/// assert!(validate_path("../videos.json").is_err());
/// assert!(validate_path("").is_err());
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let original = path.as_ref();
    let invalid = || ErrorKind::InvalidPath(original.to_path_buf());
    let mut components = Vec::new();
    for component in original.components() {
        match component {
            Component::Normal(segment) => {
                // Null bytes survive Path::components() on Unix but truncate
                // paths in the underlying syscalls.
                if segment.as_encoded_bytes().contains(&0) {
                    exn::bail!(invalid());
                }
                components.push(segment)
            },
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(invalid()),
            Component::ParentDir => {
                if components.pop().is_none() {
                    exn::bail!(invalid());
                }
            },
        }
    }
    if components.is_empty() {
        exn::bail!(invalid());
    }
    Ok(components.into_iter().collect())
}
