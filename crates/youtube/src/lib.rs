//! A minimal YouTube Data API v3 client.
//!
//! Only what the metadata caches need: searching a channel for videos
//! published after a date, and looking up one video's full metadata. The
//! client implements [`MetadataSource`](tubestat_cache::MetadataSource) so it
//! can be handed straight to the caches.

mod client;
mod data;
pub mod error;

pub use crate::client::{DEFAULT_BASE_URL, YoutubeClient};
