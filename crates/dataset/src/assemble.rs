use crate::error::{ErrorKind, Result};
use crate::row::Row;
use std::collections::{HashMap, HashSet};
use tracing::instrument;
use tubestat_models::{VideoDetail, VideoSummary, parse_duration};

/// The assembled table: one [`Row`] per video, in video list order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Row>,
}
impl Dataset {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look a row up by video id.
    pub fn get(&self, video_id: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.video_id == video_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}
impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Join the video list with its detail records.
///
/// The detail cache is allowed to lag behind the video list, so a summary
/// without a detail record is left out until its details are fetched. A
/// detail record for a video that isn't listed means the caches have
/// diverged: assembly stops with [`ErrorKind::Mismatch`] and no partial table.
/// Videos whose duration can't be parsed are left out of the table.
#[instrument(skip_all, fields(videos = videos.len(), details = details.len()))]
pub fn assemble(videos: &[VideoSummary], details: &[VideoDetail]) -> Result<Dataset> {
    let listed: HashSet<&str> = videos.iter().map(|video| video.video_id.as_str()).collect();
    if let Some(orphan) = details.iter().find(|detail| !listed.contains(detail.video_id.as_str())) {
        exn::bail!(ErrorKind::Mismatch(orphan.video_id.clone()));
    }
    let by_id: HashMap<&str, &VideoDetail> = details.iter().map(|detail| (detail.video_id.as_str(), detail)).collect();
    let mut rows = Vec::with_capacity(videos.len());
    for summary in videos {
        let Some(detail) = by_id.get(summary.video_id.as_str()) else {
            tracing::debug!(video_id = %summary.video_id, "Details not fetched yet, skipping video");
            continue;
        };
        let Some(duration) = parse_duration(detail.duration()) else {
            tracing::warn!(video_id = %summary.video_id, duration = detail.duration(), "Skipping video");
            continue;
        };
        rows.push(Row::new(summary, detail, duration.as_seconds_f64()));
    }
    tracing::info!(rows = rows.len(), skipped = videos.len() - rows.len(), "Assembled dataset");
    Ok(Dataset { rows })
}
