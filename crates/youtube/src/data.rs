//! Response bodies of the YouTube Data API v3, and their conversion into the
//! cached records.

use serde::Deserialize;
use time::OffsetDateTime;
use tubestat_models::models::Extra;
use tubestat_models::{ContentDetails, Statistics, VideoDetail, VideoSummary};

/// One page of `/search` results.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchPage {
    #[serde(default)]
    pub items: Vec<SearchResult>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResult {
    pub id: ResourceId,
    pub snippet: SearchSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResourceId {
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchSnippet {
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
    #[serde(default)]
    pub channel_title: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl SearchResult {
    /// `None` for anything that isn't a video (search can't be trusted to
    /// honour `type=video` for every result).
    pub fn into_summary(self) -> Option<VideoSummary> {
        let video_id = self.id.video_id?;
        let SearchSnippet {
            published_at,
            channel_title,
            extra,
        } = self.snippet;
        Some(VideoSummary {
            video_id,
            channel: channel_title,
            published_at,
            extra,
        })
    }
}

/// `/videos` results.
#[derive(Debug, Deserialize)]
pub(crate) struct VideoPage {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoItem {
    pub id: String,
    pub snippet: VideoSnippet,
    pub content_details: ContentDetails,
    #[serde(default)]
    pub statistics: Statistics,
    pub live_streaming_details: Option<Extra>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoSnippet {
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
    #[serde(flatten)]
    pub extra: Extra,
}

impl From<VideoItem> for VideoDetail {
    fn from(item: VideoItem) -> Self {
        Self {
            video_id: item.id,
            title: item.snippet.title,
            published_at: item.snippet.published_at,
            content_details: item.content_details,
            statistics: item.statistics,
            live_streaming_details: item.live_streaming_details,
            extra: item.snippet.extra,
        }
    }
}

/// Body of an unsuccessful response.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub errors: Vec<ErrorReason>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorReason {
    #[serde(default)]
    pub reason: String,
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const SEARCH_PAGE: &str = r#"{
        "kind": "youtube#searchListResponse",
        "nextPageToken": "CAUQAA",
        "pageInfo": {"totalResults": 3, "resultsPerPage": 2},
        "items": [
            {
                "kind": "youtube#searchResult",
                "id": {"kind": "youtube#video", "videoId": "Fb4vTKkBNkk"},
                "snippet": {
                    "publishedAt": "2023-04-01T14:00:10Z",
                    "channelId": "UC6107grRI4m0o2-emgoDnAA",
                    "title": "Inside a Nuclear Submarine",
                    "channelTitle": "SmarterEveryDay",
                    "liveBroadcastContent": "none"
                }
            },
            {
                "kind": "youtube#searchResult",
                "id": {"kind": "youtube#playlist", "playlistId": "PL123"},
                "snippet": {"publishedAt": "2023-03-01T00:00:00Z", "title": "A playlist"}
            }
        ]
    }"#;

    pub const VIDEO_PAGE: &str = r#"{
        "kind": "youtube#videoListResponse",
        "items": [{
            "kind": "youtube#video",
            "id": "Fb4vTKkBNkk",
            "snippet": {
                "publishedAt": "2023-04-01T14:00:10Z",
                "channelId": "UC6107grRI4m0o2-emgoDnAA",
                "title": "Inside a Nuclear Submarine",
                "description": "Under the ice."
            },
            "contentDetails": {"duration": "PT27M44S", "definition": "hd"},
            "statistics": {"viewCount": "4500000", "likeCount": "160000", "favoriteCount": "0", "commentCount": "9000"}
        }]
    }"#;
}
