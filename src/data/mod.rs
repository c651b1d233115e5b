pub mod csv_writer;

use crate::{Error, Result};
use chrono::DateTime;

/// Accepts a unix-seconds integer or an RFC 3339 timestamp.
pub fn parse_time(value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_config("time value is empty"));
    }
    if let Ok(epoch) = trimmed.parse::<i64>() {
        return Ok(epoch);
    }
    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .map_err(|err| Error::invalid_config(format!("invalid time format: {err}")))?;
    Ok(parsed.timestamp())
}
