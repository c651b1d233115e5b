use candlefeed::models::{Candle, CandleTable, ColumnLayout};
use candlefeed::source::OhlcvSource;
use candlefeed::{ErrorKind, Result};
use rust_decimal_macros::dec;
use std::env;
use std::fs;

struct MockSource {
    table: Option<CandleTable>,
}

impl OhlcvSource for MockSource {
    fn fetch(&mut self) -> Result<&CandleTable> {
        let candles = vec![
            Candle {
                time: 1_560_123_000,
                open: dec!(100.0),
                high: dec!(105.0),
                low: dec!(99.5),
                close: dec!(104.0),
                vwap: None,
                volume: dec!(12.5),
                count: None,
            },
            Candle {
                time: 1_560_123_060,
                open: dec!(104.0),
                high: dec!(106.0),
                low: dec!(103.0),
                close: dec!(105.5),
                vwap: None,
                volume: dec!(7.25),
                count: None,
            },
        ];
        Ok(&*self
            .table
            .insert(CandleTable::new(candles, ColumnLayout::OHLCV)))
    }

    fn table(&self) -> Result<&CandleTable> {
        self.table
            .as_ref()
            .ok_or_else(|| candlefeed::Error::no_data("no candle data fetched yet"))
    }
}

#[test]
fn accessors_fail_closed_before_first_fetch() {
    let source = MockSource { table: None };

    assert_eq!(source.table().expect_err("table").kind, ErrorKind::NoData);
    assert_eq!(source.time().expect_err("time").kind, ErrorKind::NoData);
    assert_eq!(source.open().expect_err("open").kind, ErrorKind::NoData);
    assert_eq!(source.volume().expect_err("volume").kind, ErrorKind::NoData);
    assert_eq!(
        source.write("/tmp/never-written.csv").expect_err("write").kind,
        ErrorKind::NoData
    );
}

#[test]
fn accessors_return_stored_columns_after_fetch() {
    let mut source = MockSource { table: None };
    source.fetch().expect("fetch");

    assert_eq!(
        source.time().expect("time"),
        vec![1_560_123_000, 1_560_123_060]
    );
    assert_eq!(source.open().expect("open"), vec![dec!(100.0), dec!(104.0)]);
    assert_eq!(source.high().expect("high"), vec![dec!(105.0), dec!(106.0)]);
    assert_eq!(source.low().expect("low"), vec![dec!(99.5), dec!(103.0)]);
    assert_eq!(
        source.close().expect("close"),
        vec![dec!(104.0), dec!(105.5)]
    );
    assert_eq!(
        source.volume().expect("volume"),
        vec![dec!(12.5), dec!(7.25)]
    );
}

#[test]
fn write_serializes_stored_table() {
    let mut source = MockSource { table: None };
    source.fetch().expect("fetch");

    let mut path = env::temp_dir();
    path.push("candlefeed_contract_write.csv");
    source.write(path.to_str().expect("path")).expect("write");

    let content = fs::read_to_string(&path).expect("read back");
    assert!(content.starts_with("time,open,high,low,close,volume\n"));
    assert!(content.contains("1560123000,100.0,105.0,99.5,104.0,12.5\n"));

    let _ = fs::remove_file(&path);
}
