//! Parsing of the `<duration>` command-line argument.
//!
//! Accepted forms are an integer with an optional unit suffix:
//! - `h` hours
//! - `m` minutes (the default when no suffix is given)
//! - `s` seconds

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{FruttaError, Result};

static DURATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)([hms]?)$").expect("duration pattern is valid"));

/// Unit suffix of a duration argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Hours,
    Minutes,
    Seconds,
}

impl DurationUnit {
    fn from_suffix(suffix: &str) -> Self {
        match suffix {
            "h" => DurationUnit::Hours,
            "s" => DurationUnit::Seconds,
            _ => DurationUnit::Minutes,
        }
    }

    pub fn millis(self) -> u64 {
        match self {
            DurationUnit::Hours => 60 * 60 * 1000,
            DurationUnit::Minutes => 60 * 1000,
            DurationUnit::Seconds => 1000,
        }
    }
}

/// A validated, strictly positive timer length in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimerDuration(u64);

impl TimerDuration {
    /// Wrap a millisecond count, rejecting zero.
    pub fn from_millis(ms: u64) -> Result<Self> {
        if ms == 0 {
            return Err(FruttaError::invalid_duration(
                format!("{ms}ms"),
                "duration must be greater than 0",
            ));
        }
        Ok(Self(ms))
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0 / 1000;
        let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
        match (h, m, s) {
            (0, 0, _) => write!(f, "{s}s"),
            (0, _, 0) => write!(f, "{m}m"),
            (0, _, _) => write!(f, "{m}m{s}s"),
            (_, 0, 0) => write!(f, "{h}h"),
            _ => write!(f, "{h}h{m}m{s}s"),
        }
    }
}

/// Parse a duration argument such as `25`, `10m`, `90s` or `1h`.
pub fn parse_duration(input: &str) -> Result<TimerDuration> {
    let captures = DURATION_PATTERN.captures(input).ok_or_else(|| {
        FruttaError::invalid_duration(input, "expected a whole number with optional h, m or s")
    })?;

    let unit = DurationUnit::from_suffix(&captures[2]);
    let value: u64 = captures[1]
        .parse()
        .map_err(|_| FruttaError::invalid_duration(input, "number is too large"))?;
    let ms = value
        .checked_mul(unit.millis())
        .ok_or_else(|| FruttaError::invalid_duration(input, "number is too large"))?;

    if ms == 0 {
        return Err(FruttaError::invalid_duration(
            input,
            "duration must be greater than 0",
        ));
    }

    Ok(TimerDuration(ms))
}
