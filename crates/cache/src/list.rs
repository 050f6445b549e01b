use crate::error::Result;
use crate::file::{CacheFile, CacheState};
use crate::source::SourceHandle;
use crate::staleness::StalenessPolicy;
use std::collections::HashSet;
use std::path::Path;
use time::OffsetDateTime;
use tracing::instrument;
use tubestat_models::VideoSummary;
use tubestat_storage::BackendHandle;

/// Persisted list of [`VideoSummary`] records for a set of channels.
///
/// The list only ever grows: records are never modified or removed once
/// cached, and each refresh asks the source only for videos published after
/// the newest one already known.
#[derive(Clone)]
pub struct VideoListCache {
    backend: BackendHandle,
    source: SourceHandle,
    policy: StalenessPolicy,
}
impl VideoListCache {
    pub fn new(backend: BackendHandle, source: SourceHandle, policy: StalenessPolicy) -> Self {
        Self { backend, source, policy }
    }

    /// Return every known video for `channel_ids`, topping up the cache at
    /// `location` first if it is missing or stale.
    ///
    /// 1. **Missing**: everything published since `earliest` is fetched and
    ///    persisted.
    /// 2. **Fresh**: the cache is returned untouched, without any fetch.
    /// 3. **Stale**: videos published after the newest cached video are
    ///    fetched; those not already cached are appended and persisted. When
    ///    nothing new turns up the file is left alone, modification time
    ///    included.
    #[instrument(skip_all, fields(path = %location.display(), channels = channel_ids.len()))]
    pub async fn channel_videos(
        &self,
        location: &Path,
        channel_ids: &[String],
        earliest: OffsetDateTime,
    ) -> Result<Vec<VideoSummary>> {
        let file = CacheFile::<VideoSummary>::new(self.backend.clone(), location);
        match file.open(&self.policy).await? {
            CacheState::Missing => {
                let fetched = self.fetch(channel_ids, earliest).await?;
                let videos = retain_unknown(&mut HashSet::new(), fetched);
                file.persist(&videos).await?;
                tracing::info!(videos = videos.len(), "Created video list cache");
                Ok(videos)
            },
            CacheState::Fresh(videos) => {
                tracing::info!(
                    videos = videos.len(),
                    max_age = %self.policy.max_age(),
                    "Video list cache is recent enough, no update performed"
                );
                Ok(videos)
            },
            CacheState::Stale(mut videos) => {
                let last_seen = latest_published(&videos, earliest);
                let fetched = self.fetch(channel_ids, last_seen).await?;
                let mut known = videos.iter().map(|video| video.video_id.clone()).collect();
                let new_videos = retain_unknown(&mut known, fetched);
                if new_videos.is_empty() {
                    tracing::info!(videos = videos.len(), %last_seen, "No new videos found");
                    return Ok(videos);
                }
                tracing::info!(new = new_videos.len(), %last_seen, "Appending new videos to list cache");
                videos.extend(new_videos);
                file.persist(&videos).await?;
                Ok(videos)
            },
        }
    }

    /// One search per channel, in order, concatenated.
    async fn fetch(&self, channel_ids: &[String], published_after: OffsetDateTime) -> Result<Vec<VideoSummary>> {
        let mut videos = Vec::new();
        for channel_id in channel_ids {
            let found = self.source.list_videos(channel_id, published_after).await?;
            tracing::debug!(channel = %channel_id, %published_after, found = found.len(), "Searched channel");
            videos.extend(found);
        }
        Ok(videos)
    }
}

/// The newest publish date in the cache, never earlier than `earliest`.
pub(crate) fn latest_published(videos: &[VideoSummary], earliest: OffsetDateTime) -> OffsetDateTime {
    videos.iter().map(|video| video.published_at).fold(earliest, OffsetDateTime::max)
}

/// Keep only videos whose id isn't in `known`, recording the kept ids so that
/// duplicates within `fetched` itself are dropped too.
fn retain_unknown(known: &mut HashSet<String>, fetched: Vec<VideoSummary>) -> Vec<VideoSummary> {
    fetched.into_iter().filter(|video| known.insert(video.video_id.clone())).collect()
}
