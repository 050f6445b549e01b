//! YouTube Client Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use crate::data::ErrorBody;
use derive_more::{Display, Error};

/// A YouTube API error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for YouTube API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never got a response (DNS, TLS, connection reset...).
    #[display("could not reach the YouTube API")]
    Network,
    /// The daily quota for the API key is used up. Try again tomorrow.
    #[display("YouTube API quota exceeded")]
    Quota,
    /// The API key was rejected (HTTP status attached). Check the key.
    #[display("YouTube API rejected the API key (HTTP {_0})")]
    Auth(#[error(not(source))] u16),
    /// Any other unsuccessful HTTP status.
    #[display("YouTube API request failed (HTTP {_0})")]
    Http(#[error(not(source))] u16),
    /// The API answered, but had nothing for this id.
    #[display("not found: {_0}")]
    NotFound(#[error(not(source))] String),
    /// The response body did not have the expected shape.
    #[display("unexpected response from the YouTube API")]
    InvalidResponse,
}

impl ErrorKind {
    /// Classify an unsuccessful response from its status and body.
    ///
    /// Quota exhaustion comes back as a `403`, so the error `reason` in the
    /// body is what tells it apart from a bad key.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let reasons = serde_json::from_slice::<ErrorBody>(body)
            .map(|body| body.error.errors.into_iter().map(|error| error.reason).collect())
            .unwrap_or_else(|_| Vec::new());
        let quota = reasons.iter().any(|reason| matches!(reason.as_str(), "quotaExceeded" | "dailyLimitExceeded"));
        match status {
            403 if quota => Self::Quota,
            401 | 403 => Self::Auth(status),
            _ => Self::Http(status),
        }
    }
}
