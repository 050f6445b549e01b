//! Layered configuration for tubestat.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults (see [`Config::default()`]).
//! 2. A configuration file: either the one given explicitly, or any of
//!    `tubestat.toml`, `tubestat.yaml` and `tubestat.json` found in the
//!    platform configuration directory.
//! 3. Environment variables prefixed with `TUBESTAT_`. Nested keys are
//!    separated by a double underscore, eg. `TUBESTAT_CACHE__MAX_AGE_HOURS=48`.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

pub const ENV_PREFIX: &str = "TUBESTAT_";
const FILE_STEM: &str = "tubestat";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Channel ids whose videos are tracked.
    pub channels: Vec<String>,
    /// Nothing published before this is ever fetched.
    #[serde(with = "time::serde::rfc3339")]
    pub earliest: OffsetDateTime,
    /// Takes precedence over `api_key_file`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub api_key_file: PathBuf,
    pub cache: CacheConfig,
    /// Where `export` writes the CSV table.
    pub output: PathBuf,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            channels: vec!["UC6107grRI4m0o2-emgoDnAA".to_string()],
            earliest: datetime!(2010-09-01 00:00 UTC),
            api_key: None,
            api_key_file: PathBuf::from(".google_API_key"),
            cache: CacheConfig::default(),
            output: PathBuf::from("SmartEveryDayVideos.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory both cache files live in.
    pub directory: PathBuf,
    /// Video list cache file name, relative to `directory`.
    pub videos: PathBuf,
    /// Video detail cache file name, relative to `directory`.
    pub details: PathBuf,
    /// How long a cache file is trusted before the API is checked again.
    pub max_age_hours: u32,
}
impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            videos: PathBuf::from("smarter_everyday_videos.json"),
            details: PathBuf::from("detailed_smarter_everyday_videos.json"),
            max_age_hours: 24,
        }
    }
}
impl CacheConfig {
    pub fn max_age(&self) -> Duration {
        Duration::hours(i64::from(self.max_age_hours))
    }
}

impl Config {
    /// The platform configuration directory, if the platform has one.
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", FILE_STEM).map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Build the layered configuration sources without extracting them.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        match path {
            Some(path) => {
                if !path.is_file() {
                    exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
                }
                figment = match path.extension().and_then(|ext| ext.to_str()) {
                    Some("toml") => figment.merge(Toml::file_exact(path)),
                    Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
                    Some("json") => figment.merge(Json::file_exact(path)),
                    _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
                };
            },
            None => {
                if let Some(dir) = Self::default_dir() {
                    tracing::debug!(dir = %dir.display(), "Looking for configuration files");
                    figment = figment
                        .merge(Toml::file_exact(dir.join(format!("{FILE_STEM}.toml"))))
                        .merge(Yaml::file_exact(dir.join(format!("{FILE_STEM}.yaml"))))
                        .merge(Json::file_exact(dir.join(format!("{FILE_STEM}.json"))));
                }
            },
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extract and validate a configuration.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from every source, reading `path` instead of the platform
    /// configuration directory when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_figment(&Self::figment(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.channels.is_empty() || self.channels.iter().any(|channel| channel.trim().is_empty()) {
            exn::bail!(ErrorKind::Invalid("channels"));
        }
        if self.cache.max_age_hours == 0 {
            exn::bail!(ErrorKind::Invalid("cache.max_age_hours"));
        }
        if self.cache.videos.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid("cache.videos"));
        }
        if self.cache.details.as_os_str().is_empty() || self.cache.details == self.cache.videos {
            exn::bail!(ErrorKind::Invalid("cache.details"));
        }
        Ok(())
    }

    /// The API key: `api_key` if set, otherwise the first non-empty line of
    /// `api_key_file`.
    pub fn api_key(&self) -> Result<String> {
        if let Some(key) = self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty()) {
            return Ok(key.to_string());
        }
        let contents =
            std::fs::read_to_string(&self.api_key_file).or_raise(|| ErrorKind::ApiKey(self.api_key_file.clone()))?;
        match contents.lines().map(str::trim).find(|line| !line.is_empty()) {
            Some(key) => Ok(key.to_string()),
            None => exn::bail!(ErrorKind::ApiKey(self.api_key_file.clone())),
        }
    }
}
