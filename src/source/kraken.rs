use crate::models::interval::unix_now;
use crate::models::{Candle, CandleTable, ColumnLayout, Interval, SymbolPair};
use crate::source::{ensure_anchor_closed, missing_table, validate_completeness, OhlcvSource};
use crate::{Error, Result};
use reqwest::blocking::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub const KRAKEN_BASE_URL: &str = "https://api.kraken.com";

#[derive(Clone, Debug)]
pub struct KrakenConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub interval: Interval,
    pub pair: SymbolPair,
    pub rows: usize,
    /// End of the query window, unix seconds. Defaults to wall-clock time at
    /// fetch when unset.
    pub anchor: Option<i64>,
}

impl KrakenConfig {
    pub fn new(interval: Interval, pair: SymbolPair, rows: usize) -> Self {
        Self {
            base_url: KRAKEN_BASE_URL.to_string(),
            timeout_secs: 30,
            interval,
            pair,
            rows,
            anchor: None,
        }
    }
}

#[derive(Debug)]
pub struct KrakenOhlcv {
    client: Client,
    config: KrakenConfig,
    table: Option<CandleTable>,
}

impl KrakenOhlcv {
    pub fn new(config: KrakenConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(Error::invalid_config("base_url must be set"));
        }
        if config.rows == 0 {
            return Err(Error::invalid_config("rows must be greater than zero"));
        }
        if let Some(anchor) = config.anchor {
            ensure_anchor_closed(anchor, config.interval)?;
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| Error::transport(format!("http client build failed: {err}")))?;
        Ok(Self {
            client,
            config,
            table: None,
        })
    }
}

impl OhlcvSource for KrakenOhlcv {
    fn fetch(&mut self) -> Result<&CandleTable> {
        self.table = None;

        let pair_code = self.config.pair.to_kraken();
        let granularity = kraken_granularity(self.config.interval);
        let anchor = match self.config.anchor {
            Some(value) => value,
            None => unix_now()?,
        };
        let since = kraken_since(anchor, self.config.interval, self.config.rows);

        let url = format!("{}/0/public/OHLC", self.config.base_url);
        let query = vec![
            ("pair".to_string(), pair_code.clone()),
            ("interval".to_string(), granularity.to_string()),
            ("since".to_string(), since.to_string()),
        ];
        debug!(pair = %pair_code, granularity, since, "requesting kraken ohlc");

        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .map_err(|err| Error::transport(format!("http request failed: {err}")))?;
        if !response.status().is_success() {
            return Err(Error::transport(format!(
                "kraken response status: {}",
                response.status()
            )));
        }
        let payload = response
            .text()
            .map_err(|err| Error::transport(format!("http read failed: {err}")))?;

        let parsed = parse_kraken_ohlc(&payload, &pair_code)?;
        let mut table = parsed.table;
        table.truncate(self.config.rows);
        validate_completeness(&table, self.config.rows, Some(parsed.last))?;

        debug!(rows = table.len(), "kraken ohlc fetch complete");
        Ok(&*self.table.insert(table))
    }

    fn table(&self) -> Result<&CandleTable> {
        self.table.as_ref().ok_or_else(missing_table)
    }
}

#[derive(Debug)]
pub struct KrakenParsed {
    pub table: CandleTable,
    /// Timestamp of the most recent fully closed candle, from `result.last`.
    pub last: i64,
}

/// Pure response-to-table mapping for `/0/public/OHLC`. Rows arrive as
/// fixed-position tuples `[time, open, high, low, close, vwap, volume,
/// count]` keyed under the converted pair code.
pub fn parse_kraken_ohlc(payload: &str, pair_code: &str) -> Result<KrakenParsed> {
    let data: Value = serde_json::from_str(payload)
        .map_err(|err| Error::parse(format!("json parse failed: {err}")))?;

    if let Some(errors) = data.get("error").and_then(|value| value.as_array()) {
        if let Some(first) = errors.first().and_then(|value| value.as_str()) {
            return Err(Error::parse(format!("kraken error: {first}")));
        }
    }

    let result = data
        .get("result")
        .ok_or_else(|| Error::parse("kraken result missing"))?;
    let rows = result
        .get(pair_code)
        .and_then(|value| value.as_array())
        .ok_or_else(|| Error::parse(format!("kraken result missing pair {pair_code}")))?;
    let last = value_to_i64(
        result
            .get("last")
            .ok_or_else(|| Error::parse("kraken result missing last"))?,
    )?;

    let mut candles = Vec::with_capacity(rows.len());
    for row in rows {
        let row = row
            .as_array()
            .ok_or_else(|| Error::parse("kraken ohlc row is not array"))?;
        if row.len() < 8 {
            return Err(Error::parse("kraken ohlc row has insufficient fields"));
        }
        candles.push(Candle {
            time: value_to_i64(&row[0])?,
            open: value_to_decimal(&row[1])?,
            high: value_to_decimal(&row[2])?,
            low: value_to_decimal(&row[3])?,
            close: value_to_decimal(&row[4])?,
            vwap: Some(value_to_decimal(&row[5])?),
            volume: value_to_decimal(&row[6])?,
            count: Some(value_to_i64(&row[7])?),
        });
    }

    Ok(KrakenParsed {
        table: CandleTable::new(candles, ColumnLayout::OHLCV_VWAP_COUNT),
        last,
    })
}

pub fn kraken_granularity(interval: Interval) -> i64 {
    match interval {
        Interval::Minute => 1,
        Interval::Hour => 60,
        Interval::Day => 1_440,
    }
}

/// Start of the query window: the anchor floored to an interval boundary,
/// minus the requested rows plus one spare interval.
pub fn kraken_since(anchor: i64, interval: Interval, rows: usize) -> i64 {
    let duration = interval.duration_secs();
    (anchor.div_euclid(duration) - rows as i64 - 1) * duration
}

fn value_to_i64(value: &Value) -> Result<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| Error::parse("number is not i64")),
        Value::String(text) => text
            .parse::<i64>()
            .map_err(|err| Error::parse(format!("invalid i64: {err}"))),
        _ => Err(Error::parse("unexpected value type for i64")),
    }
}

fn value_to_decimal(value: &Value) -> Result<Decimal> {
    match value {
        Value::Number(number) => decimal_from_text(&number.to_string()),
        Value::String(text) => decimal_from_text(text),
        _ => Err(Error::parse("unexpected value type for decimal")),
    }
}

fn decimal_from_text(text: &str) -> Result<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|err| Error::parse(format!("invalid decimal '{text}': {err}")))
}
