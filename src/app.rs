use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tubestat_cache::{CacheStatus, ChannelCache, Settings, Snapshot, SourceHandle};
use tubestat_config::Config;
use tubestat_dataset::{Dataset, assemble};
use tubestat_storage::BackendHandle;
use tubestat_storage::backend::{LocalBackend, ReadOnlyBackend};
use tubestat_youtube::YoutubeClient;

/// Output path meaning "standard output".
const STDOUT: &str = "-";

pub struct App {
    config: Config,
    backend: BackendHandle,
}
impl App {
    /// Open the cache directory. With `dry_run`, cache writes are dropped.
    pub fn new(config: Config, dry_run: bool) -> Result<Self> {
        let directory = std::env::current_dir()
            .map(|cwd| cwd.join(&config.cache.directory))
            .or_raise(|| ErrorKind::Storage(config.cache.directory.clone()))?;
        let local = LocalBackend::new("local", &directory).or_raise(|| ErrorKind::Storage(directory.clone()))?;
        let backend: BackendHandle = match dry_run {
            true => Arc::new(ReadOnlyBackend::new(Arc::new(local))),
            false => Arc::new(local),
        };
        tracing::debug!(directory = %directory.display(), dry_run, "Opened cache directory");
        Ok(Self { config, backend })
    }

    fn settings(&self) -> Settings {
        Settings {
            channels: self.config.channels.clone(),
            earliest: self.config.earliest,
            videos_path: self.config.cache.videos.clone(),
            details_path: self.config.cache.details.clone(),
            max_age: self.config.cache.max_age(),
        }
    }

    fn cache(&self) -> ChannelCache {
        ChannelCache::new(self.settings(), self.backend.clone())
    }

    fn youtube(&self) -> Result<SourceHandle> {
        let api_key = self.config.api_key().or_raise(|| ErrorKind::Config)?;
        Ok(Arc::new(YoutubeClient::new(api_key)))
    }

    pub async fn sync(&self) -> Result<Snapshot> {
        self.sync_with(self.youtube()?).await
    }

    pub async fn sync_with(&self, source: SourceHandle) -> Result<Snapshot> {
        self.cache().sync(source).await.or_raise(|| ErrorKind::Sync)
    }

    /// Sync, assemble, and write the CSV to `output` (or the configured
    /// output). Returns the number of rows written.
    pub async fn export(&self, output: Option<&Path>) -> Result<usize> {
        self.export_with(self.youtube()?, output).await
    }

    pub async fn export_with(&self, source: SourceHandle, output: Option<&Path>) -> Result<usize> {
        let snapshot = self.sync_with(source).await?;
        let dataset = assemble(&snapshot.videos, &snapshot.details).or_raise(|| ErrorKind::Dataset)?;
        let output = output.unwrap_or(self.config.output.as_path());
        write_dataset(&dataset, output)?;
        tracing::info!(rows = dataset.len(), output = %output.display(), "Exported dataset");
        Ok(dataset.len())
    }

    /// Cache file status; never touches the network or needs an API key.
    pub async fn status(&self) -> Result<[CacheStatus; 2]> {
        self.cache().status().await.or_raise(|| ErrorKind::Sync)
    }
}

fn write_dataset(dataset: &Dataset, output: &Path) -> Result<()> {
    if output == Path::new(STDOUT) {
        let stdout = std::io::stdout();
        return dataset.write_csv(stdout.lock()).or_raise(|| ErrorKind::Output(PathBuf::from(STDOUT)));
    }
    let file = File::create(output).or_raise(|| ErrorKind::Output(output.to_path_buf()))?;
    let mut writer = BufWriter::new(file);
    dataset.write_csv(&mut writer).or_raise(|| ErrorKind::Output(output.to_path_buf()))?;
    writer.flush().or_raise(|| ErrorKind::Output(output.to_path_buf()))
}
