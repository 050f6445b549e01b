//! Turns the two metadata caches into one table per video.
//!
//! Each row carries the raw counters alongside a few derived columns (ratios
//! and `Views Seconds`, the total time spent watching a video), ready for CSV
//! export or plotting.

mod assemble;
pub mod error;
mod export;
mod row;

pub use crate::assemble::{Dataset, assemble};
pub use crate::row::Row;
