pub mod count;
mod detail;
mod summary;

pub use self::detail::{ContentDetails, Statistics, VideoDetail};
pub use self::summary::VideoSummary;

/// Fields not modelled explicitly; carried through the cache files untouched.
pub type Extra = serde_json::Map<String, serde_json::Value>;
