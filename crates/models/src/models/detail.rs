use super::Extra;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Full per-video metadata record.
///
/// Expensive to fetch (one API call per video), so it is cached separately
/// from the [`VideoSummary`](super::VideoSummary) list and never refreshed once
/// stored. The `video_id` must match the summary it was fetched for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    #[serde(rename = "video_id")]
    pub video_id: String,
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
    pub content_details: ContentDetails,
    #[serde(default)]
    pub statistics: Statistics,
    /// Only present for videos that were (or are scheduled to be) broadcast
    /// live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_streaming_details: Option<Extra>,
    #[serde(flatten)]
    pub extra: Extra,
}
impl VideoDetail {
    /// The raw ISO-8601 duration string, eg. `PT12M34S`.
    pub fn duration(&self) -> &str {
        &self.content_details.duration
    }

    pub fn is_stream(&self) -> bool {
        self.live_streaming_details.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetails {
    pub duration: String,
    #[serde(flatten)]
    pub extra: Extra,
}
impl ContentDetails {
    pub fn new(duration: impl Into<String>) -> Self {
        Self {
            duration: duration.into(),
            extra: Extra::new(),
        }
    }
}

/// Engagement counters. `None` means the platform did not report the counter
/// (hidden likes, or dislikes which stopped being public).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default, with = "super::count", skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(default, with = "super::count", skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(default, with = "super::count", skip_serializing_if = "Option::is_none")]
    pub dislike_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}
impl Statistics {
    pub fn new(views: u64, likes: u64, dislikes: u64) -> Self {
        Self {
            view_count: Some(views),
            like_count: Some(likes),
            dislike_count: Some(dislikes),
            extra: Extra::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const CACHED: &str = r#"{
        "video_id": "xyz789",
        "title": "Slow Motion Bullets",
        "publishedAt": "2019-11-20T16:00:00Z",
        "description": "A very long description",
        "contentDetails": {"duration": "PT14M7S", "definition": "hd"},
        "statistics": {"viewCount": "1500000", "likeCount": "50000", "dislikeCount": "700", "commentCount": "4000"},
        "liveStreamingDetails": {"actualStartTime": "2019-11-20T16:00:00Z"}
    }"#;

    #[test]
    fn test_deserialize_cached_record() {
        let detail: VideoDetail = serde_json::from_str(CACHED).unwrap();
        assert_eq!(detail.video_id, "xyz789");
        assert_eq!(detail.title, "Slow Motion Bullets");
        assert_eq!(detail.published_at, datetime!(2019-11-20 16:00:00 UTC));
        assert_eq!(detail.duration(), "PT14M7S");
        assert_eq!(detail.statistics.view_count, Some(1_500_000));
        assert_eq!(detail.statistics.like_count, Some(50_000));
        assert_eq!(detail.statistics.dislike_count, Some(700));
        assert_eq!(detail.statistics.extra["commentCount"], "4000");
        assert_eq!(detail.content_details.extra["definition"], "hd");
        assert_eq!(detail.extra["description"], "A very long description");
        assert!(detail.is_stream());
    }

    #[test]
    fn test_round_trip_preserves_unknown_fields() {
        let detail: VideoDetail = serde_json::from_str(CACHED).unwrap();
        let original: serde_json::Value = serde_json::from_str(CACHED).unwrap();
        assert_eq!(serde_json::to_value(&detail).unwrap(), original);
    }

    #[test]
    fn test_optional_sections() {
        let json = r#"{
            "video_id": "v1",
            "title": "Regular upload",
            "publishedAt": "2022-02-02T10:00:00Z",
            "contentDetails": {"duration": "PT5M"},
            "statistics": {"viewCount": "10"}
        }"#;
        let detail: VideoDetail = serde_json::from_str(json).unwrap();
        assert!(!detail.is_stream());
        assert_eq!(detail.statistics.view_count, Some(10));
        assert_eq!(detail.statistics.dislike_count, None);
        let value = serde_json::to_value(&detail).unwrap();
        assert!(value.get("liveStreamingDetails").is_none());
        assert!(value["statistics"].get("dislikeCount").is_none());
    }
}
