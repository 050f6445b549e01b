//! Incrementally synchronized caches of channel video metadata.
//!
//! The upstream metadata API is heavily rate limited, so everything it returns
//! is kept in two local JSON cache files and only topped up, never refetched:
//!
//! - **Video list cache**: lightweight [`VideoSummary`] records for every video
//!   on the configured channels. Extended by searching for videos published
//!   after the newest one already cached.
//! - **Video detail cache**: full [`VideoDetail`] records. Extended by fetching
//!   details for every listed video that has no detail record yet, persisting
//!   after each fetch so an interrupted run keeps its progress.
//!
//! Both caches share one update policy (see [`StalenessPolicy`]): a cache file
//! written less than `max_age` ago (24 hours by default) is returned as-is
//! without contacting the API at all. The file's modification time is the only
//! clock, so a no-op refresh deliberately leaves it untouched.
//!
//! [`VideoSummary`]: tubestat_models::VideoSummary
//! [`VideoDetail`]: tubestat_models::VideoDetail

mod channel;
mod detail;
pub mod error;
mod file;
mod list;
pub mod source;
mod staleness;
#[cfg(test)]
mod testing;

pub use crate::channel::{CacheStatus, ChannelCache, Settings, Snapshot};
pub use crate::detail::VideoDetailCache;
pub use crate::file::{CacheFile, CacheState};
pub use crate::list::VideoListCache;
pub use crate::source::{MetadataSource, SourceHandle};
pub use crate::staleness::{Clock, DEFAULT_MAX_AGE, FixedClock, StalenessPolicy, SystemClock};
