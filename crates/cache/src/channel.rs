use crate::detail::VideoDetailCache;
use crate::error::Result;
use crate::file::CacheFile;
use crate::list::VideoListCache;
use crate::source::SourceHandle;
use crate::staleness::{Clock, DEFAULT_MAX_AGE, StalenessPolicy};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};
use tubestat_models::{VideoDetail, VideoSummary};
use tubestat_storage::BackendHandle;

/// Which channels to track, and where their caches live.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub channels: Vec<String>,
    /// Lower bound for the very first search.
    pub earliest: OffsetDateTime,
    pub videos_path: PathBuf,
    pub details_path: PathBuf,
    pub max_age: Duration,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            channels: vec!["UC6107grRI4m0o2-emgoDnAA".to_string()],
            earliest: datetime!(2010-09-01 00:00 UTC),
            videos_path: PathBuf::from("smarter_everyday_videos.json"),
            details_path: PathBuf::from("detailed_smarter_everyday_videos.json"),
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

/// The full content of both caches after a sync.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub videos: Vec<VideoSummary>,
    pub details: Vec<VideoDetail>,
}

/// Summary of one cache file, without touching the metadata source.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStatus {
    pub path: PathBuf,
    /// `None` when the file doesn't exist yet.
    pub records: Option<usize>,
    pub age: Option<Duration>,
    /// Whether the next sync would contact the API for this file.
    pub due: bool,
}

/// Both caches for one set of channels, synchronized together.
///
/// The metadata source is only needed to [`sync()`](Self::sync); reporting on
/// the cache files works offline.
pub struct ChannelCache {
    settings: Settings,
    backend: BackendHandle,
    policy: StalenessPolicy,
}
impl ChannelCache {
    pub fn new(settings: Settings, backend: BackendHandle) -> Self {
        let policy = StalenessPolicy::system(settings.max_age);
        Self { settings, backend, policy }
    }

    /// Like [`new()`](Self::new), but judging staleness against `clock`.
    pub fn with_clock(settings: Settings, backend: BackendHandle, clock: Arc<dyn Clock>) -> Self {
        let policy = StalenessPolicy::new(settings.max_age, clock);
        Self { settings, backend, policy }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Bring the video list up to date from `source`, then the details for
    /// every listed video.
    pub async fn sync(&self, source: SourceHandle) -> Result<Snapshot> {
        let settings = &self.settings;
        let list = VideoListCache::new(self.backend.clone(), source.clone(), self.policy.clone());
        let videos = list.channel_videos(&settings.videos_path, &settings.channels, settings.earliest).await?;
        let details = VideoDetailCache::new(self.backend.clone(), source, self.policy.clone());
        let details = details.video_details(&settings.details_path, &videos).await?;
        tracing::info!(videos = videos.len(), details = details.len(), "Channel caches synchronized");
        Ok(Snapshot { videos, details })
    }

    /// Report on both cache files, list first.
    pub async fn status(&self) -> Result<[CacheStatus; 2]> {
        Ok([
            self.file_status::<VideoSummary>(&self.settings.videos_path).await?,
            self.file_status::<VideoDetail>(&self.settings.details_path).await?,
        ])
    }

    async fn file_status<T>(&self, path: &Path) -> Result<CacheStatus>
    where
        T: Serialize + DeserializeOwned,
    {
        let file = CacheFile::<T>::new(self.backend.clone(), path);
        let Some(records) = file.load().await? else {
            return Ok(CacheStatus {
                path: path.to_path_buf(),
                records: None,
                age: None,
                due: true,
            });
        };
        let modified = file.modified().await?;
        Ok(CacheStatus {
            path: path.to_path_buf(),
            records: Some(records.len()),
            age: Some(self.policy.age(modified)),
            due: self.policy.is_due(modified),
        })
    }
}
