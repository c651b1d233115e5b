use crate::config::Config;
use crate::data::parse_time;
use crate::models::{Interval, SymbolPair};
use crate::source::crypto_compare::{CryptoCompareConfig, CryptoCompareOhlcv};
use crate::source::kraken::{KrakenConfig, KrakenOhlcv};
use crate::source::OhlcvSource;
use crate::{Error, Result};
use std::env;
use tracing::info;

struct CliArgs {
    show_help: bool,
    config_path: Option<String>,
    exchange: Option<String>,
    pair: Option<String>,
    interval: Option<String>,
    rows: Option<u32>,
    anchor: Option<String>,
    output: Option<String>,
}

pub fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args)?;

    if cli.show_help {
        print_usage();
        return Ok(());
    }

    let mut config = match &cli.config_path {
        Some(path) => Config::load(path)?,
        None => {
            let mut config = Config::default();
            config.apply_env_overrides()?;
            config
        }
    };

    if let Some(value) = cli.exchange {
        config.exchange = value;
    }
    if let Some(value) = cli.pair {
        config.pair = value;
    }
    if let Some(value) = cli.interval {
        config.interval = value;
    }
    if let Some(value) = cli.rows {
        config.rows = value;
    }
    if let Some(value) = cli.anchor {
        config.anchor = Some(value);
    }
    if let Some(value) = cli.output {
        config.output.path = Some(value);
    }
    config.validate()?;

    let mut source = build_source(&config)?;
    let fetched = source.fetch()?.len();
    info!(
        rows = fetched,
        exchange = %config.exchange,
        pair = %config.pair,
        "fetched candle table"
    );

    match &config.output.path {
        Some(path) => {
            source.write(path)?;
            info!(path = %path, "wrote csv output");
        }
        None => {
            let times = source.time()?;
            let first = times.first().copied().unwrap_or_default();
            let last = times.last().copied().unwrap_or_default();
            println!(
                "{} {} candles for {} ({first}..{last})",
                fetched, config.interval, config.pair
            );
        }
    }

    Ok(())
}

fn build_source(config: &Config) -> Result<Box<dyn OhlcvSource>> {
    let interval = Interval::parse(&config.interval)?;
    let pair = SymbolPair::parse(&config.pair)?;
    let rows = config.rows as usize;
    let anchor = config.anchor.as_deref().map(parse_time).transpose()?;

    match config.exchange.to_lowercase().as_str() {
        "kraken" => {
            let mut kraken = KrakenConfig::new(interval, pair, rows);
            if let Some(base_url) = &config.http.base_url {
                kraken.base_url = base_url.clone();
            }
            kraken.timeout_secs = config.http.timeout_secs;
            kraken.anchor = anchor;
            Ok(Box::new(KrakenOhlcv::new(kraken)?))
        }
        "cryptocompare" => {
            let anchor = anchor.ok_or_else(|| {
                Error::invalid_config("anchor must be set for the cryptocompare exchange")
            })?;
            let mut cc = CryptoCompareConfig::new(interval, pair, rows, anchor);
            if let Some(base_url) = &config.http.base_url {
                cc.base_url = base_url.clone();
            }
            cc.timeout_secs = config.http.timeout_secs;
            Ok(Box::new(CryptoCompareOhlcv::new(cc)?))
        }
        other => Err(Error::invalid_config(format!(
            "exchange must be kraken or cryptocompare, got '{other}'"
        ))),
    }
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs {
        show_help: false,
        config_path: None,
        exchange: None,
        pair: None,
        interval: None,
        rows: None,
        anchor: None,
        output: None,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => cli.show_help = true,
            "--config" => cli.config_path = Some(required_value(&mut iter, "--config")?),
            "--exchange" => cli.exchange = Some(required_value(&mut iter, "--exchange")?),
            "--pair" => cli.pair = Some(required_value(&mut iter, "--pair")?),
            "--interval" => cli.interval = Some(required_value(&mut iter, "--interval")?),
            "--rows" => {
                let value = required_value(&mut iter, "--rows")?;
                let rows = value
                    .parse::<u32>()
                    .map_err(|_| Error::invalid_config("--rows must be a positive integer"))?;
                cli.rows = Some(rows);
            }
            "--anchor" => cli.anchor = Some(required_value(&mut iter, "--anchor")?),
            "--output" => cli.output = Some(required_value(&mut iter, "--output")?),
            other => {
                return Err(Error::invalid_config(format!(
                    "unknown argument '{other}', try --help"
                )))
            }
        }
    }

    Ok(cli)
}

fn required_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<String> {
    iter.next()
        .map(|value| value.to_string())
        .ok_or_else(|| Error::invalid_config(format!("{flag} requires a value")))
}

fn print_usage() {
    println!("candlefeed - fetch historical OHLCV candles from exchange REST APIs");
    println!();
    println!("Usage: candlefeed [options]");
    println!();
    println!("Options:");
    println!("  --config <path>      TOML config file");
    println!("  --exchange <name>    kraken or cryptocompare");
    println!("  --pair <base/quote>  symbol pair, e.g. BTC/USD");
    println!("  --interval <value>   minute, hour or day");
    println!("  --rows <n>           number of candles to fetch");
    println!("  --anchor <time>      query window end, unix seconds or RFC 3339");
    println!("  --output <path>      write the table as CSV");
    println!("  -h, --help           show this help");
}
