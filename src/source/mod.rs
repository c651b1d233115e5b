pub mod crypto_compare;
pub mod kraken;

use crate::data::csv_writer::write_candle_table;
use crate::models::interval::unix_now;
use crate::models::{CandleTable, Interval};
use crate::{Error, Result};
use rust_decimal::Decimal;

/// Contract every exchange data source implements: one blocking fetch that
/// validates before committing, plus accessors over the stored table.
///
/// On any fetch failure the stored table must stay unset, so accessors fail
/// closed instead of exposing stale data.
pub trait OhlcvSource {
    /// Performs the network call, validates the response, replaces the
    /// stored table wholesale and returns it.
    fn fetch(&mut self) -> Result<&CandleTable>;

    /// The table from the last successful fetch.
    fn table(&self) -> Result<&CandleTable>;

    /// Serializes the stored table as CSV (header row, no index column).
    fn write(&self, path: &str) -> Result<()> {
        write_candle_table(path, self.table()?)
    }

    fn time(&self) -> Result<Vec<i64>> {
        Ok(self.table()?.time())
    }

    fn open(&self) -> Result<Vec<Decimal>> {
        Ok(self.table()?.open())
    }

    fn high(&self) -> Result<Vec<Decimal>> {
        Ok(self.table()?.high())
    }

    fn low(&self) -> Result<Vec<Decimal>> {
        Ok(self.table()?.low())
    }

    fn close(&self) -> Result<Vec<Decimal>> {
        Ok(self.table()?.close())
    }

    fn volume(&self) -> Result<Vec<Decimal>> {
        Ok(self.table()?.volume())
    }
}

/// Completeness checks shared by the adapters, run after parsing and before
/// the table is committed.
///
/// `last_closed` is the exchange-reported timestamp of the most recent fully
/// closed candle; `None` skips the in-progress-candle check for exchanges
/// that do not report one.
pub fn validate_completeness(
    table: &CandleTable,
    rows: usize,
    last_closed: Option<i64>,
) -> Result<()> {
    if table.len() < rows {
        return Err(Error::insufficient_data(format!(
            "did not receive enough rows: got {}, want {rows}",
            table.len()
        )));
    }
    if let (Some(last_closed), Some(last)) = (last_closed, table.last()) {
        if last.time > last_closed {
            return Err(Error::incomplete_candle(format!(
                "last candle was not completed: row time {} is after last closed candle {last_closed}",
                last.time
            )));
        }
    }
    Ok(())
}

/// Rejects anchors pointing past the most recent closed candle for the
/// interval. Runs at construction, before any network call.
pub fn ensure_anchor_closed(anchor: i64, interval: Interval) -> Result<()> {
    let latest = interval.latest_closed_candle_time(unix_now()?);
    if anchor > latest {
        return Err(Error::invalid_config(format!(
            "anchor {anchor} must not be later than the last closed {interval} candle at {latest}"
        )));
    }
    Ok(())
}

pub(crate) fn missing_table() -> Error {
    Error::no_data("no candle data fetched yet")
}
