use crate::models::{Candle, CandleTable, ColumnLayout, Interval, SymbolPair};
use crate::source::{ensure_anchor_closed, missing_table, validate_completeness, OhlcvSource};
use crate::{Error, Result};
use reqwest::blocking::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const CRYPTO_COMPARE_BASE_URL: &str = "https://min-api.cryptocompare.com";

#[derive(Clone, Debug)]
pub struct CryptoCompareConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub interval: Interval,
    pub pair: SymbolPair,
    pub rows: usize,
    /// End of the query window, unix seconds; sent as `toTs`. Required, and
    /// must point at a closed candle.
    pub anchor: i64,
}

impl CryptoCompareConfig {
    pub fn new(interval: Interval, pair: SymbolPair, rows: usize, anchor: i64) -> Self {
        Self {
            base_url: CRYPTO_COMPARE_BASE_URL.to_string(),
            timeout_secs: 30,
            interval,
            pair,
            rows,
            anchor,
        }
    }
}

#[derive(Debug)]
pub struct CryptoCompareOhlcv {
    client: Client,
    config: CryptoCompareConfig,
    table: Option<CandleTable>,
}

impl CryptoCompareOhlcv {
    pub fn new(config: CryptoCompareConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(Error::invalid_config("base_url must be set"));
        }
        if config.rows == 0 {
            return Err(Error::invalid_config("rows must be greater than zero"));
        }
        ensure_anchor_closed(config.anchor, config.interval)?;
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

impl OhlcvSource for CryptoCompareOhlcv {
    fn fetch(&mut self) -> Result<&CandleTable> {
        self.table = None;

        let pair = self.config.pair.to_crypto_compare();
        let url = format!(
            "{}/{}",
            self.config.base_url,
            histo_endpoint(self.config.interval)
        );
        // The API returns limit + 1 records.
        let limit = self.config.rows - 1;
        let query = vec![
            ("fsym".to_string(), pair.fsym.clone()),
            ("tsym".to_string(), pair.tsym.clone()),
            ("limit".to_string(), limit.to_string()),
            ("toTs".to_string(), self.config.anchor.to_string()),
        ];
        debug!(fsym = %pair.fsym, tsym = %pair.tsym, limit, "requesting cryptocompare history");

        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .map_err(|err| Error::transport(format!("http request failed: {err}")))?;
        if !response.status().is_success() {
            return Err(Error::transport(format!(
                "cryptocompare response status: {}",
                response.status()
            )));
        }
        let payload = response
            .text()
            .map_err(|err| Error::transport(format!("http read failed: {err}")))?;

        let mut table = parse_histo_data(&payload)?;
        table.truncate(self.config.rows);
        validate_completeness(&table, self.config.rows, None)?;

        debug!(rows = table.len(), "cryptocompare fetch complete");
        Ok(&*self.table.insert(table))
    }

    fn table(&self) -> Result<&CandleTable> {
        self.table.as_ref().ok_or_else(missing_table)
    }
}

#[derive(Debug, Deserialize)]
struct HistoResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Message")]
    message: Option<String>,
    #[serde(rename = "Data")]
    data: Option<Vec<HistoCandle>>,
}

#[derive(Debug, Deserialize)]
struct HistoCandle {
    time: i64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    open: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    high: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    low: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    close: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    volumefrom: Decimal,
}

/// Pure response-to-table mapping for the histominute/histohour/histoday
/// endpoints. The exchange's `volumefrom` field becomes the `volume` column.
pub fn parse_histo_data(payload: &str) -> Result<CandleTable> {
    let body: HistoResponse = serde_json::from_str(payload)
        .map_err(|err| Error::parse(format!("json parse failed: {err}")))?;

    // The API reports its own failures with a 200 status.
    if body.response.as_deref() == Some("Error") {
        let message = body.message.unwrap_or_else(|| "unknown error".to_string());
        return Err(Error::parse(format!("cryptocompare error: {message}")));
    }

    let data = body
        .data
        .ok_or_else(|| Error::parse("cryptocompare Data missing"))?;

    let candles = data
        .into_iter()
        .map(|row| Candle {
            time: row.time,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            vwap: None,
            volume: row.volumefrom,
            count: None,
        })
        .collect();

    Ok(CandleTable::new(candles, ColumnLayout::OHLCV))
}

pub fn histo_endpoint(interval: Interval) -> &'static str {
    match interval {
        Interval::Minute => "data/histominute",
        Interval::Hour => "data/histohour",
        Interval::Day => "data/histoday",
    }
}
