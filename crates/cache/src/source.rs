//! The upstream metadata API, as seen by the caches.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use time::OffsetDateTime;
use tubestat_models::{VideoDetail, VideoSummary};

/// Retrieves video metadata from the platform.
///
/// Implementations own authentication and quota handling. Any failure is
/// reported as [`Fetch`](crate::error::ErrorKind::Fetch) and propagated
/// untouched by the caches, which never retry.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// All videos on `channel_id` published after `published_after`, ordered
    /// by date. Implementations are free to include videos published exactly
    /// at `published_after`; callers deduplicate.
    async fn list_videos(&self, channel_id: &str, published_after: OffsetDateTime) -> Result<Vec<VideoSummary>>;

    /// Full metadata for one video (comments are never requested).
    async fn video_metadata(&self, video_id: &str) -> Result<VideoDetail>;
}

pub type SourceHandle = Arc<dyn MetadataSource>;
