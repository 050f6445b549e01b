//! ISO-8601 relative durations, as reported for video lengths (`PT1H2M3S`).
//!
//! Only the time section (`PT...`) is understood. Anything else, including
//! durations with a date section such as `P1DT2H`, is rejected: video lengths
//! never carry one, so a value that does is treated as malformed.

use crate::consts;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use time::Duration;
use tracing::instrument;

const TIME_PREFIX: &str = "PT";

/// A parsed `PT<h>H<m>M<s>S` duration.
///
/// Components are kept as written; no normalization takes place, so `PT90S`
/// parses to 90 seconds and zero minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IsoDuration {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}
impl IsoDuration {
    /// Parse an ISO-8601 time duration.
    ///
    /// Fails with [`ParseError`](ErrorKind::ParseError) when the value does not
    /// start with `PT`. Components with a unit other than `H`, `M` or `S` are
    /// logged and ignored rather than failing the whole value. A unit that
    /// appears twice keeps its last value.
    ///
    /// ```
    /// use tubestat_models::IsoDuration;
    ///
    /// let duration = IsoDuration::parse("PT1H2M3S").unwrap();
    /// assert_eq!(duration.total_seconds(), 3723);
    /// assert!(IsoDuration::parse("invalid").is_err());
    /// ```
    #[instrument(level = "trace")]
    pub fn parse(value: &str) -> Result<Self> {
        let Some(components) = value.strip_prefix(TIME_PREFIX) else {
            exn::bail!(ErrorKind::ParseError {
                field: "duration",
                value: value.to_string(),
            });
        };
        let mut parsed = Self::default();
        for captures in consts::DURATION_COMPONENT_REGEX.captures_iter(components) {
            let (_, [amount, unit]) = captures.extract();
            let amount = amount.parse::<u64>().or_raise(|| ErrorKind::ParseError {
                field: "duration",
                value: value.to_string(),
            })?;
            match unit {
                "H" => parsed.hours = amount,
                "M" => parsed.minutes = amount,
                "S" => parsed.seconds = amount,
                unit => tracing::warn!(unit, value, "Ignoring unhandled duration component"),
            }
        }
        Ok(parsed)
    }

    /// Total length in whole seconds (saturating on absurd values).
    pub fn total_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
    }

    pub fn as_duration(&self) -> Duration {
        Duration::seconds(i64::try_from(self.total_seconds()).unwrap_or(i64::MAX))
    }
}
impl FromStr for IsoDuration {
    type Err = crate::error::Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
impl From<IsoDuration> for Duration {
    fn from(value: IsoDuration) -> Self {
        value.as_duration()
    }
}
impl Display for IsoDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{TIME_PREFIX}")?;
        if self.hours > 0 {
            write!(f, "{}H", self.hours)?;
        }
        if self.minutes > 0 {
            write!(f, "{}M", self.minutes)?;
        }
        if self.seconds > 0 || (self.hours == 0 && self.minutes == 0) {
            write!(f, "{}S", self.seconds)?;
        }
        Ok(())
    }
}

/// Lenient entrypoint: parse a duration or log why it couldn't be parsed.
///
/// A malformed duration must never abort the caller (one odd video should not
/// sink a whole dataset), so failures are reported through `tracing` and
/// turned into `None`.
pub fn parse_duration(value: &str) -> Option<Duration> {
    match IsoDuration::parse(value) {
        Ok(duration) => Some(duration.as_duration()),
        Err(err) => {
            tracing::warn!(value, error = ?err, "Failed to parse duration");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("PT1H2M3S", 3723)]
    #[case("PT45S", 45)]
    #[case("PT10M", 600)]
    #[case("PT2H", 7200)]
    #[case("PT1H30S", 3630)]
    #[case("PT90S", 90)]
    #[case("PT", 0)]
    #[case("PT0S", 0)]
    fn test_parse_total_seconds(#[case] input: &str, #[case] expected: u64) {
        let duration = IsoDuration::parse(input).unwrap();
        assert_eq!(duration.total_seconds(), expected);
        assert_eq!(duration.as_duration(), Duration::seconds(expected as i64));
    }

    #[rstest]
    #[case("invalid")]
    #[case("")]
    #[case("P")]
    #[case("P1DT2H")]
    #[case("pt1h")]
    #[case("1H2M3S")]
    fn test_parse_requires_time_prefix(#[case] input: &str) {
        let err = IsoDuration::parse(input).unwrap_err();
        assert!(matches!(&*err, ErrorKind::ParseError { field: "duration", .. }));
    }

    #[test]
    fn test_unknown_units_are_ignored() {
        // "D" has no place in a time section, but must not fail the parse.
        let duration = IsoDuration::parse("PT3D4M5S").unwrap();
        assert_eq!(duration, IsoDuration { hours: 0, minutes: 4, seconds: 5 });
    }

    #[test]
    fn test_components_keep_written_values() {
        let duration = IsoDuration::parse("PT0H75M0S").unwrap();
        assert_eq!(duration.minutes, 75);
        assert_eq!(duration.hours, 0);
        assert_eq!(duration.total_seconds(), 4500);
    }

    #[test]
    fn test_repeated_unit_keeps_last_value() {
        assert_eq!(IsoDuration::parse("PT1M2M").unwrap().minutes, 2);
    }

    #[test]
    fn test_overflowing_component_is_an_error() {
        assert!(IsoDuration::parse("PT99999999999999999999999S").is_err());
    }

    #[test]
    fn test_lenient_parse() {
        assert_eq!(parse_duration("PT1H2M3S"), Some(Duration::seconds(3723)));
        assert_eq!(parse_duration("invalid"), None);
        assert_eq!(parse_duration("P0D"), None);
    }

    #[rstest]
    #[case(IsoDuration { hours: 1, minutes: 2, seconds: 3 }, "PT1H2M3S")]
    #[case(IsoDuration { hours: 0, minutes: 10, seconds: 0 }, "PT10M")]
    #[case(IsoDuration { hours: 2, minutes: 0, seconds: 5 }, "PT2H5S")]
    #[case(IsoDuration::default(), "PT0S")]
    fn test_display(#[case] duration: IsoDuration, #[case] expected: &str) {
        assert_eq!(duration.to_string(), expected);
        assert_eq!(expected.parse::<IsoDuration>().unwrap(), duration);
    }
}
