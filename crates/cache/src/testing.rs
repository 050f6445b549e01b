//! In-memory metadata source for cache tests.

use crate::error::{ErrorKind, Result};
use crate::source::MetadataSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use time::OffsetDateTime;
use tubestat_models::{ContentDetails, Statistics, VideoDetail, VideoSummary};

pub(crate) fn summary(id: &str, channel: &str, published_at: OffsetDateTime) -> VideoSummary {
    VideoSummary::new(id, channel, published_at)
}

pub(crate) fn detail(summary: &VideoSummary) -> VideoDetail {
    VideoDetail {
        video_id: summary.video_id.clone(),
        title: format!("Video {}", summary.video_id),
        published_at: summary.published_at,
        content_details: ContentDetails::new("PT10M"),
        statistics: Statistics::new(100, 10, 1),
        live_streaming_details: None,
        extra: Default::default(),
    }
}

/// A fake channel catalogue that records every call made against it.
#[derive(Default)]
pub(crate) struct FakeSource {
    /// channel id -> videos on that channel
    catalogue: Mutex<HashMap<String, Vec<VideoSummary>>>,
    pub(crate) list_calls: Mutex<Vec<(String, OffsetDateTime)>>,
    pub(crate) detail_calls: Mutex<Vec<String>>,
    /// Fail every detail fetch once this many have succeeded.
    fail_details_after: Mutex<Option<usize>>,
}
impl FakeSource {
    pub(crate) fn publish(&self, channel_id: &str, video: VideoSummary) {
        self.catalogue.lock().unwrap().entry(channel_id.to_string()).or_default().push(video);
    }

    pub(crate) fn fail_details_after(&self, successes: Option<usize>) {
        *self.fail_details_after.lock().unwrap() = successes;
    }

    pub(crate) fn list_calls(&self) -> Vec<(String, OffsetDateTime)> {
        self.list_calls.lock().unwrap().clone()
    }

    pub(crate) fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }

    fn find(&self, video_id: &str) -> Option<VideoSummary> {
        let catalogue = self.catalogue.lock().unwrap();
        catalogue.values().flatten().find(|video| video.video_id == video_id).cloned()
    }
}

#[async_trait]
impl MetadataSource for FakeSource {
    async fn list_videos(&self, channel_id: &str, published_after: OffsetDateTime) -> Result<Vec<VideoSummary>> {
        self.list_calls.lock().unwrap().push((channel_id.to_string(), published_after));
        let catalogue = self.catalogue.lock().unwrap();
        // Inclusive, like the real API: the newest cached video comes back.
        let mut videos: Vec<_> = catalogue
            .get(channel_id)
            .into_iter()
            .flatten()
            .filter(|video| video.published_at >= published_after)
            .cloned()
            .collect();
        videos.sort_by_key(|video| video.published_at);
        Ok(videos)
    }

    async fn video_metadata(&self, video_id: &str) -> Result<VideoDetail> {
        let succeeded = self.detail_calls.lock().unwrap().len();
        if let Some(limit) = *self.fail_details_after.lock().unwrap()
            && succeeded >= limit
        {
            exn::bail!(ErrorKind::Fetch(format!("quota exhausted fetching {video_id}")));
        }
        let Some(video) = self.find(video_id) else {
            exn::bail!(ErrorKind::Fetch(format!("no such video {video_id}")));
        };
        self.detail_calls.lock().unwrap().push(video_id.to_string());
        Ok(detail(&video))
    }
}
