use candlefeed::config::Config;
use candlefeed::ErrorKind;
use std::env;
use std::fs;
use std::path::PathBuf;

fn write_temp_config(name: &str, content: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(name);
    fs::write(&path, content).expect("write temp config");
    path
}

#[test]
fn defaults_validate() {
    let config = Config::default();
    config.validate().expect("defaults");
}

#[test]
fn loads_toml_and_keeps_defaults_for_missing_fields() {
    let path = write_temp_config(
        "candlefeed_config_ok.toml",
        r#"
exchange = "cryptocompare"
pair = "ETH/USD"
rows = 24

[output]
path = "out/candles.csv"

[http]
timeout_secs = 10
"#,
    );

    let config = Config::load(path.to_str().expect("path")).expect("load");
    assert_eq!(config.exchange, "cryptocompare");
    assert_eq!(config.pair, "ETH/USD");
    assert_eq!(config.rows, 24);
    assert_eq!(config.interval, "minute");
    assert_eq!(config.output.path.as_deref(), Some("out/candles.csv"));
    assert_eq!(config.http.timeout_secs, 10);
    assert_eq!(config.http.base_url, None);

    let _ = fs::remove_file(&path);
}

#[test]
fn rejects_unknown_exchange() {
    let mut config = Config::default();
    config.exchange = "binance".to_string();
    let err = config.validate().expect_err("should fail");
    assert_eq!(err.kind, ErrorKind::InvalidConfig);
}

#[test]
fn rejects_bad_interval() {
    let mut config = Config::default();
    config.interval = "week".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn rejects_bad_pair() {
    let mut config = Config::default();
    config.pair = "BTCUSD".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn rejects_zero_rows() {
    let mut config = Config::default();
    config.rows = 0;
    assert!(config.validate().is_err());
}

#[test]
fn load_fails_on_malformed_toml() {
    let path = write_temp_config("candlefeed_config_bad.toml", "rows = \"sixty\"");
    let err = Config::load(path.to_str().expect("path")).expect_err("should fail");
    assert_eq!(err.kind, ErrorKind::InvalidConfig);
    let _ = fs::remove_file(&path);
}
