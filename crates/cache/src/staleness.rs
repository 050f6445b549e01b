//! When is a cache file due for a refresh?

use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};
use time::{Duration, OffsetDateTime};

/// Default time a cache file is trusted before the API is asked for updates.
pub const DEFAULT_MAX_AGE: Duration = Duration::hours(24);

/// Source of "now" for staleness checks.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// The wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock that only moves when told to.
///
/// Lets tests (here and in other crates) simulate a day passing without
/// touching real file timestamps, so it is deliberately not `#[cfg(test)]`.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<OffsetDateTime>,
}
impl FixedClock {
    pub fn new(now: OffsetDateTime) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn set(&self, now: OffsetDateTime) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}
impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Decides whether a cache file is stale, based on its last modification
/// time.
///
/// The threshold exists purely to preserve API quota: the cached data is
/// append-only and low-velocity (a few videos a day at most), so trading a
/// day of freshness for quota safety is acceptable.
#[derive(Debug, Clone)]
pub struct StalenessPolicy {
    max_age: Duration,
    clock: Arc<dyn Clock>,
}
impl StalenessPolicy {
    pub fn new(max_age: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { max_age, clock }
    }

    /// Policy using the wall clock.
    pub fn system(max_age: Duration) -> Self {
        Self::new(max_age, Arc::new(SystemClock))
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    /// Time elapsed since `modified`. Negative if the timestamp is in the
    /// future (clock skew, or a file copied from another machine).
    pub fn age(&self, modified: OffsetDateTime) -> Duration {
        self.clock.now() - modified
    }

    /// `true` once at least `max_age` has passed since `modified`.
    pub fn is_due(&self, modified: OffsetDateTime) -> bool {
        self.age(modified) >= self.max_age
    }
}
impl Default for StalenessPolicy {
    fn default() -> Self {
        Self::system(DEFAULT_MAX_AGE)
    }
}
