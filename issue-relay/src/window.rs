//! Lookback window computation.
//!
//! The window ends at the trigger's reference time and reaches back by the
//! configured interval. Its start is the only filter passed to the issue source.

use crate::config::ConfigError;
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Length of the trailing lookback window, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    minutes: u64,
}

impl Interval {
    /// Creates an interval of `minutes` minutes.
    #[must_use]
    pub fn from_minutes(minutes: u64) -> Self {
        Self { minutes }
    }

    /// Returns the interval in minutes.
    #[must_use]
    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    /// Returns the interval as a signed time delta, or `None` if it doesn't fit.
    #[must_use]
    pub fn as_time_delta(&self) -> Option<TimeDelta> {
        i64::try_from(self.minutes)
            .ok()
            .and_then(TimeDelta::try_minutes)
    }

    /// Returns the period to schedule runs at, or `None` for a zero interval.
    ///
    /// Periods too long to represent saturate at the maximum duration.
    #[must_use]
    pub fn period(&self) -> Option<Duration> {
        (self.minutes > 0).then(|| Duration::from_secs(self.minutes.saturating_mul(60)))
    }
}

impl FromStr for Interval {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .parse::<u64>()
            .map(Self::from_minutes)
            .map_err(|source| ConfigError::InvalidInterval {
                value: value.to_string(),
                source,
            })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.minutes)
    }
}

/// Parses an interval given as a string of whole minutes.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidInterval`] if `value` is not a non-negative integer.
pub fn parse_interval(value: &str) -> Result<Interval, ConfigError> {
    value.parse()
}

/// Computes the start of the lookback window: `reference - interval`.
///
/// No clamping or timezone conversion is applied. A zero interval yields the
/// reference time itself.
///
/// # Errors
///
/// Returns [`ConfigError::IntervalOutOfRange`] if the result is not a
/// representable timestamp.
pub fn lookback_since(
    reference: DateTime<Utc>,
    interval: Interval,
) -> Result<DateTime<Utc>, ConfigError> {
    interval
        .as_time_delta()
        .and_then(|delta| reference.checked_sub_signed(delta))
        .ok_or(ConfigError::IntervalOutOfRange {
            minutes: interval.minutes,
        })
}

/// Computes the window start for a run that follows an earlier one.
///
/// Same as [`lookback_since`], except the window is widened back to
/// `previous` when the earlier run's reference time lies before it. Runs
/// that fall behind their schedule then leave no gap between windows.
///
/// # Errors
///
/// Returns [`ConfigError::IntervalOutOfRange`] if the lookback start is not
/// a representable timestamp.
pub fn continuing_since(
    reference: DateTime<Utc>,
    interval: Interval,
    previous: Option<DateTime<Utc>>,
) -> Result<DateTime<Utc>, ConfigError> {
    let since = lookback_since(reference, interval)?;
    Ok(match previous {
        Some(previous) if previous < since => previous,
        _ => since,
    })
}
