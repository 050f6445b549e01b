use crate::data::{SearchPage, SearchResult, VideoPage};
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::{OptionExt, ResultExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use tracing::instrument;
use tubestat_cache::MetadataSource;
use tubestat_cache::error::{ErrorKind as CacheErrorKind, Result as CacheResult};
use tubestat_models::{VideoDetail, VideoSummary};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const SEARCH_PAGE_SIZE: u8 = 50;
const VIDEO_PARTS: &str = "snippet,statistics,contentDetails,liveStreamingDetails";

/// Client for the two YouTube Data API v3 endpoints the caches need.
///
/// Every request costs quota (a search page costs 100 units, a video lookup
/// 1 unit) and nothing is retried here.
#[derive(Clone)]
pub struct YoutubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}
impl YoutubeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another API root (no trailing slash).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Every video on `channel_id` published after `published_after`, oldest
    /// first. Follows `nextPageToken` until the last page.
    #[instrument(skip(self), fields(channel = %channel_id))]
    pub async fn search_channel(&self, channel_id: &str, published_after: OffsetDateTime) -> Result<Vec<VideoSummary>> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Query<'a> {
            part: &'a str,
            channel_id: &'a str,
            #[serde(rename = "type")]
            kind: &'a str,
            order: &'a str,
            max_results: u8,
            #[serde(with = "time::serde::rfc3339")]
            published_after: OffsetDateTime,
            #[serde(skip_serializing_if = "Option::is_none")]
            page_token: Option<&'a str>,
            key: &'a str,
        }

        let mut videos = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let query = Query {
                part: "snippet",
                channel_id,
                kind: "video",
                order: "date",
                max_results: SEARCH_PAGE_SIZE,
                published_after,
                page_token: page_token.as_deref(),
                key: &self.api_key,
            };
            let page: SearchPage = self.get("search", &query).await?;
            tracing::debug!(results = page.items.len(), more = page.next_page_token.is_some(), "Fetched search page");
            videos.extend(page.items.into_iter().filter_map(SearchResult::into_summary));
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        videos.sort_by_key(|video| video.published_at);
        Ok(videos)
    }

    /// Full metadata for one video.
    #[instrument(skip(self))]
    pub async fn video(&self, video_id: &str) -> Result<VideoDetail> {
        #[derive(Serialize)]
        struct Query<'a> {
            id: &'a str,
            part: &'a str,
            key: &'a str,
        }

        let query = Query {
            id: video_id,
            part: VIDEO_PARTS,
            key: &self.api_key,
        };
        let page: VideoPage = self.get("videos", &query).await?;
        let item = page.items.into_iter().next().ok_or_raise(|| ErrorKind::NotFound(video_id.to_string()))?;
        Ok(item.into())
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &impl Serialize) -> Result<T> {
        let url = format!("{}/{endpoint}", self.base_url);
        let response = self.client.get(&url).query(query).send().await.or_raise(|| ErrorKind::Network)?;
        let status = response.status();
        let body = response.bytes().await.or_raise(|| ErrorKind::Network)?;
        if !status.is_success() {
            let kind = ErrorKind::from_response(status.as_u16(), &body);
            tracing::warn!(endpoint, status = status.as_u16(), error = %kind, "YouTube API request failed");
            exn::bail!(kind);
        }
        serde_json::from_slice(&body).or_raise(|| ErrorKind::InvalidResponse)
    }
}

#[async_trait]
impl MetadataSource for YoutubeClient {
    async fn list_videos(&self, channel_id: &str, published_after: OffsetDateTime) -> CacheResult<Vec<VideoSummary>> {
        self.search_channel(channel_id, published_after)
            .await
            .or_raise(|| CacheErrorKind::Fetch(format!("videos of channel {channel_id}")))
    }

    async fn video_metadata(&self, video_id: &str) -> CacheResult<VideoDetail> {
        self.video(video_id).await.or_raise(|| CacheErrorKind::Fetch(format!("details of video {video_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{SEARCH_PAGE, VIDEO_PAGE};
    use httptest::matchers::{all_of, contains, key, not, request, url_decoded};
    use httptest::responders::status_code;
    use httptest::{Expectation, Server};
    use time::macros::datetime;

    const CHANNEL: &str = "UC6107grRI4m0o2-emgoDnAA";
    const LAST_PAGE: &str = r#"{"items": [{
        "id": {"kind": "youtube#video", "videoId": "older"},
        "snippet": {"publishedAt": "2022-01-01T00:00:00Z", "channelTitle": "SmarterEveryDay"}
    }]}"#;

    fn client(server: &Server) -> YoutubeClient {
        YoutubeClient::new("secret").with_base_url(format!("http://{}", server.addr()))
    }

    fn json(body: &'static str) -> impl httptest::responders::Responder {
        status_code(200).body(body)
    }

    #[tokio::test]
    async fn test_search_follows_pages() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/search"),
                request::query(url_decoded(contains(("channelId", CHANNEL)))),
                request::query(url_decoded(contains(("publishedAfter", "2020-01-01T00:00:00Z")))),
                request::query(url_decoded(contains(("type", "video")))),
                request::query(url_decoded(contains(("maxResults", "50")))),
                request::query(url_decoded(contains(("key", "secret")))),
                request::query(url_decoded(not(contains(key("pageToken"))))),
            ])
            .respond_with(json(SEARCH_PAGE)),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/search"),
                request::query(url_decoded(contains(("pageToken", "CAUQAA")))),
            ])
            .respond_with(json(LAST_PAGE)),
        );

        let videos = client(&server).search_channel(CHANNEL, datetime!(2020-01-01 00:00 UTC)).await.unwrap();
        let ids: Vec<_> = videos.iter().map(|video| video.video_id.as_str()).collect();
        // The playlist result is dropped, and results come back oldest first.
        assert_eq!(ids, ["older", "Fb4vTKkBNkk"]);
    }

    #[tokio::test]
    async fn test_video() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/videos"),
                request::query(url_decoded(contains(("id", "Fb4vTKkBNkk")))),
                request::query(url_decoded(contains(("part", VIDEO_PARTS)))),
            ])
            .respond_with(json(VIDEO_PAGE)),
        );
        let detail = client(&server).video("Fb4vTKkBNkk").await.unwrap();
        assert_eq!(detail.duration(), "PT27M44S");
    }

    #[tokio::test]
    async fn test_video_not_found() {
        let server = Server::run();
        server.expect(Expectation::matching(request::method_path("GET", "/videos")).respond_with(json(r#"{"items": []}"#)));
        let err = client(&server).video("gone").await.unwrap_err();
        assert_eq!(*err, ErrorKind::NotFound("gone".to_string()));
    }

    #[tokio::test]
    async fn test_quota_exceeded() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/videos"))
                .respond_with(status_code(403).body(r#"{"error": {"code": 403, "errors": [{"reason": "quotaExceeded"}]}}"#)),
        );
        let err = client(&server).video("abc").await.unwrap_err();
        assert_eq!(*err, ErrorKind::Quota);
    }

    #[tokio::test]
    async fn test_invalid_response() {
        let server = Server::run();
        server.expect(Expectation::matching(request::method_path("GET", "/videos")).respond_with(json("<html></html>")));
        let err = client(&server).video("abc").await.unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidResponse);
    }

    #[tokio::test]
    async fn test_metadata_source_wraps_errors() {
        let server = Server::run();
        server.expect(Expectation::matching(request::method_path("GET", "/videos")).respond_with(status_code(401)));
        let source: &dyn MetadataSource = &client(&server);
        let err = source.video_metadata("abc").await.unwrap_err();
        assert!(matches!(&*err, CacheErrorKind::Fetch(what) if what.contains("abc")));
    }

    #[tokio::test]
    async fn test_unreachable() {
        let client = YoutubeClient::new("secret").with_base_url("http://127.0.0.1:1");
        let err = client.video("abc").await.unwrap_err();
        assert_eq!(*err, ErrorKind::Network);
    }
}
