use super::Extra;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// List-level record for a video, as returned when searching a channel.
///
/// Unique by `video_id` within a channel's cache. Never modified once cached.
/// Anything else the list API returned (title, description, thumbnails...)
/// lives in `extra` and is written back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub video_id: String,
    /// Display name of the channel the video was published on.
    pub channel: String,
    #[serde(rename = "publishedAt", with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
    #[serde(flatten)]
    pub extra: Extra,
}
impl VideoSummary {
    pub fn new(video_id: impl Into<String>, channel: impl Into<String>, published_at: OffsetDateTime) -> Self {
        Self {
            video_id: video_id.into(),
            channel: channel.into(),
            published_at,
            extra: Extra::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
