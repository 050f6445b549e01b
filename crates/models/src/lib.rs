//! Video metadata records shared by the caches and the dataset assembler.
//!
//! Two tiers of metadata are tracked for every video:
//! - [`VideoSummary`]: the cheap, list-level record returned when searching a
//!   channel for videos published after a given date.
//! - [`VideoDetail`]: the expensive, per-video record carrying statistics,
//!   content details (duration) and live-streaming details.
//!
//! Both serialize to the JSON shape stored in the cache files, with unknown
//! fields passed through untouched.

mod consts;
pub mod duration;
pub mod error;
pub mod models;

pub use crate::duration::{IsoDuration, parse_duration};
pub use crate::models::{ContentDetails, Statistics, VideoDetail, VideoSummary};
