use crate::models::{Interval, SymbolPair};
use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;

#[derive(Clone, Debug)]
pub struct OutputConfig {
    pub path: Option<String>,
}

#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub exchange: String,
    pub pair: String,
    pub interval: String,
    pub rows: u32,
    /// Unix seconds or RFC 3339; end of the query window.
    pub anchor: Option<String>,
    pub output: OutputConfig,
    pub http: HttpConfig,
}

#[derive(Clone, Debug, Deserialize)]
struct OutputConfigFile {
    path: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct HttpConfigFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Clone, Debug, Deserialize)]
struct ConfigFile {
    exchange: Option<String>,
    pair: Option<String>,
    interval: Option<String>,
    rows: Option<u32>,
    anchor: Option<String>,
    output: Option<OutputConfigFile>,
    http: Option<HttpConfigFile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exchange: "kraken".to_string(),
            pair: "BTC/USD".to_string(),
            interval: "minute".to_string(),
            rows: 60,
            anchor: None,
            output: OutputConfig { path: None },
            http: HttpConfig {
                base_url: None,
                timeout_secs: 30,
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|err| Error::invalid_config(format!("failed to read config: {err}")))?;
        let file: ConfigFile = toml::from_str(&content)
            .map_err(|err| Error::invalid_config(format!("failed to parse config: {err}")))?;
        let mut config = Config::from_file(file);
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(file: ConfigFile) -> Self {
        let mut config = Config::default();

        if let Some(exchange) = file.exchange {
            config.exchange = exchange;
        }
        if let Some(pair) = file.pair {
            config.pair = pair;
        }
        if let Some(interval) = file.interval {
            config.interval = interval;
        }
        if let Some(rows) = file.rows {
            config.rows = rows;
        }
        if let Some(anchor) = file.anchor {
            config.anchor = Some(anchor);
        }

        if let Some(output) = file.output {
            if let Some(value) = output.path {
                config.output.path = Some(value);
            }
        }

        if let Some(http) = file.http {
            if let Some(value) = http.base_url {
                config.http.base_url = Some(value);
            }
            if let Some(value) = http.timeout_secs {
                config.http.timeout_secs = value;
            }
        }

        config
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = read_string_env("CANDLEFEED_EXCHANGE")? {
            self.exchange = value;
        }
        if let Some(value) = read_string_env("CANDLEFEED_PAIR")? {
            self.pair = value;
        }
        if let Some(value) = read_string_env("CANDLEFEED_INTERVAL")? {
            self.interval = value;
        }
        if let Some(value) = read_u32_env("CANDLEFEED_ROWS")? {
            self.rows = value;
        }
        if let Some(value) = read_string_env("CANDLEFEED_ANCHOR")? {
            self.anchor = Some(value);
        }
        if let Some(value) = read_string_env("CANDLEFEED_OUTPUT")? {
            self.output.path = Some(value);
        }
        if let Some(value) = read_string_env("CANDLEFEED_BASE_URL")? {
            self.http.base_url = Some(value);
        }
        if let Some(value) = read_u64_env("CANDLEFEED_TIMEOUT_SECS")? {
            self.http.timeout_secs = value;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        match self.exchange.to_lowercase().as_str() {
            "kraken" | "cryptocompare" => {}
            other => {
                return Err(Error::invalid_config(format!(
                    "exchange must be kraken or cryptocompare, got '{other}'"
                )))
            }
        }
        Interval::parse(&self.interval)?;
        SymbolPair::parse(&self.pair)?;
        if self.rows == 0 {
            return Err(Error::invalid_config("rows must be greater than zero"));
        }
        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_config(
                "http.timeout_secs must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn read_string_env(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(Some(value)),
        _ => Ok(None),
    }
}

fn read_u32_env(key: &str) -> Result<Option<u32>> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| Error::invalid_config(format!("{key} must be a positive integer"))),
        _ => Ok(None),
    }
}

fn read_u64_env(key: &str) -> Result<Option<u64>> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| Error::invalid_config(format!("{key} must be a positive integer"))),
        _ => Ok(None),
    }
}
