use crate::{Error, Result};
use std::time::{SystemTime, UNIX_EPOCH};

/// Supported candle durations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interval {
    Minute,
    Hour,
    Day,
}

impl Interval {
    pub fn duration_secs(self) -> i64 {
        match self {
            Interval::Minute => 60,
            Interval::Hour => 3_600,
            Interval::Day => 86_400,
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "minute" | "1m" => Ok(Interval::Minute),
            "hour" | "hourly" | "1h" => Ok(Interval::Hour),
            "day" | "daily" | "1d" => Ok(Interval::Day),
            other => Err(Error::invalid_config(format!(
                "interval must be minute, hour or day, got '{other}'"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Minute => "minute",
            Interval::Hour => "hour",
            Interval::Day => "day",
        }
    }

    /// Start time of the most recent fully elapsed candle as of `now`.
    /// Candle timestamps mark the interval start, so the candle opened at
    /// `floor(now / dur) * dur` is still in progress.
    pub fn latest_closed_candle_time(self, now: i64) -> i64 {
        let duration = self.duration_secs();
        now.div_euclid(duration) * duration - duration
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn unix_now() -> Result<i64> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| Error::invalid_config("system time before unix epoch"))?;
    Ok(now.as_secs() as i64)
}
