//! Storage backends for the cache files.
//!
//! Cache files are addressed by paths relative to a backend root. The
//! backend's last-modified timestamp for a file is what the caches use as
//! their staleness clock, so every backend must report it faithfully (and
//! only change it when the file is actually written).

pub mod backend;
pub mod error;
pub mod file;
mod path;

pub use crate::backend::StorageBackend;
pub use crate::file::FileMeta;
pub use crate::path::validate as validate_path;
use std::sync::Arc;

pub type BackendHandle = Arc<dyn StorageBackend + Send + Sync>;
