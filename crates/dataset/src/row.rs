use serde::Serialize;
use time::OffsetDateTime;
use tubestat_models::{VideoDetail, VideoSummary};

/// One video's worth of the dataset.
///
/// Field order is column order; the serialized names are the CSV headers. A
/// counter the API didn't report (dislikes, hidden likes) is `None` and
/// exported as an empty cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    #[serde(rename = "Video ID")]
    pub video_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Channel")]
    pub channel: String,
    #[serde(rename = "Published Time", with = "time::serde::rfc3339")]
    pub published_time: OffsetDateTime,
    #[serde(rename = "Duration (s)")]
    pub duration_secs: f64,
    #[serde(rename = "Stream")]
    pub stream: bool,
    #[serde(rename = "Likes")]
    pub likes: Option<u64>,
    #[serde(rename = "Dislikes")]
    pub dislikes: Option<u64>,
    #[serde(rename = "Views")]
    pub views: Option<u64>,
    #[serde(rename = "Like:Dislike Ratio")]
    pub like_dislike_ratio: f64,
    #[serde(rename = "Like:Views Ratio")]
    pub like_views_ratio: f64,
    #[serde(rename = "Dislikes:Views Ratio")]
    pub dislikes_views_ratio: f64,
    #[serde(rename = "Views Seconds")]
    pub views_seconds: f64,
}
impl Row {
    /// Build a row from a matched summary/detail pair and the already parsed
    /// duration. Ratios follow IEEE division, so a zero denominator gives
    /// `inf` (or `NaN` for `0/0`). Anything computed from an unreported
    /// counter is `NaN`.
    pub fn new(summary: &VideoSummary, detail: &VideoDetail, duration_secs: f64) -> Self {
        let stats = &detail.statistics;
        let likes = stats.like_count;
        let dislikes = stats.dislike_count;
        let views = stats.view_count;
        Self {
            video_id: detail.video_id.clone(),
            title: detail.title.clone(),
            channel: summary.channel.clone(),
            published_time: detail.published_at,
            duration_secs,
            stream: detail.is_stream(),
            likes,
            dislikes,
            views,
            like_dislike_ratio: ratio(likes, dislikes),
            like_views_ratio: ratio(likes, views),
            dislikes_views_ratio: ratio(dislikes, views),
            views_seconds: views.map_or(f64::NAN, |views| duration_secs * views as f64),
        }
    }
}

fn ratio(numerator: Option<u64>, denominator: Option<u64>) -> f64 {
    match (numerator, denominator) {
        (Some(numerator), Some(denominator)) => numerator as f64 / denominator as f64,
        _ => f64::NAN,
    }
}
