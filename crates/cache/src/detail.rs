use crate::error::Result;
use crate::file::{CacheFile, CacheState};
use crate::source::SourceHandle;
use crate::staleness::StalenessPolicy;
use std::collections::HashSet;
use std::path::Path;
use tracing::instrument;
use tubestat_models::{VideoDetail, VideoSummary};
use tubestat_storage::BackendHandle;

/// Persisted [`VideoDetail`] records, keyed by the video list.
///
/// Details are fetched one video at a time, and the upstream quota can run out
/// part way through a large backfill. Once a cache file exists, it is rewritten
/// after every successful fetch so that the next run only has to fetch what is
/// still missing.
#[derive(Clone)]
pub struct VideoDetailCache {
    backend: BackendHandle,
    source: SourceHandle,
    policy: StalenessPolicy,
}
impl VideoDetailCache {
    pub fn new(backend: BackendHandle, source: SourceHandle, policy: StalenessPolicy) -> Self {
        Self { backend, source, policy }
    }

    /// Return a detail record for every video in `videos`, topping up the
    /// cache at `location` first if it is missing or stale.
    ///
    /// A fetch error is returned as-is. Any details fetched and persisted
    /// before it stay in the cache file.
    #[instrument(skip_all, fields(path = %location.display(), videos = videos.len()))]
    pub async fn video_details(&self, location: &Path, videos: &[VideoSummary]) -> Result<Vec<VideoDetail>> {
        let file = CacheFile::<VideoDetail>::new(self.backend.clone(), location);
        match file.open(&self.policy).await? {
            CacheState::Missing => {
                // Nothing to lose yet, so the whole backfill is written once.
                let mut details = Vec::with_capacity(videos.len());
                for video_id in missing_ids(&mut HashSet::new(), videos) {
                    details.push(self.fetch(video_id).await?);
                }
                file.persist(&details).await?;
                tracing::info!(details = details.len(), "Created video detail cache");
                Ok(details)
            },
            CacheState::Fresh(details) => {
                tracing::info!(
                    details = details.len(),
                    max_age = %self.policy.max_age(),
                    "Video detail cache is recent enough, no update performed"
                );
                Ok(details)
            },
            CacheState::Stale(mut details) => {
                let mut known = details.iter().map(|detail| detail.video_id.clone()).collect();
                let missing = missing_ids(&mut known, videos);
                if missing.is_empty() {
                    tracing::info!(details = details.len(), "Video detail cache already complete");
                    return Ok(details);
                }
                tracing::info!(missing = missing.len(), cached = details.len(), "Fetching missing video details");
                for video_id in missing {
                    details.push(self.fetch(video_id).await?);
                    file.persist(&details).await?;
                }
                Ok(details)
            },
        }
    }

    async fn fetch(&self, video_id: &str) -> Result<VideoDetail> {
        tracing::debug!(video_id, "Fetching video details");
        self.source.video_metadata(video_id).await
    }
}

/// Ids from `videos` not yet in `known`, in list order, each at most once.
fn missing_ids<'a>(known: &mut HashSet<String>, videos: &'a [VideoSummary]) -> Vec<&'a str> {
    videos
        .iter()
        .map(|video| video.video_id.as_str())
        .filter(|id| known.insert(id.to_string()))
        .collect()
}
