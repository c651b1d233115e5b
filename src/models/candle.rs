use rust_decimal::Decimal;

/// One fixed-duration aggregation of trading activity. Prices and volume are
/// kept as exact decimals; `vwap` and `count` exist only on exchanges that
/// report them.
#[derive(Clone, Debug, PartialEq)]
pub struct Candle {
    pub time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub vwap: Option<Decimal>,
    pub volume: Decimal,
    pub count: Option<i64>,
}

/// Which optional columns a table carries. Drives the CSV header and the
/// column order `time, open, high, low, close, [vwap,] volume, [count]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnLayout {
    pub has_vwap: bool,
    pub has_count: bool,
}

impl ColumnLayout {
    pub const OHLCV: ColumnLayout = ColumnLayout {
        has_vwap: false,
        has_count: false,
    };

    pub const OHLCV_VWAP_COUNT: ColumnLayout = ColumnLayout {
        has_vwap: true,
        has_count: true,
    };

    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = vec!["time", "open", "high", "low", "close"];
        if self.has_vwap {
            headers.push("vwap");
        }
        headers.push("volume");
        if self.has_count {
            headers.push("count");
        }
        headers
    }
}

/// An ordered candle sequence, ascending by time.
#[derive(Clone, Debug, PartialEq)]
pub struct CandleTable {
    candles: Vec<Candle>,
    layout: ColumnLayout,
}

impl CandleTable {
    pub fn new(mut candles: Vec<Candle>, layout: ColumnLayout) -> Self {
        candles.sort_by_key(|candle| candle.time);
        Self { candles, layout }
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Drops every row past the first `rows`.
    pub fn truncate(&mut self, rows: usize) {
        self.candles.truncate(rows);
    }

    pub fn time(&self) -> Vec<i64> {
        self.candles.iter().map(|candle| candle.time).collect()
    }

    pub fn open(&self) -> Vec<Decimal> {
        self.candles.iter().map(|candle| candle.open).collect()
    }

    pub fn high(&self) -> Vec<Decimal> {
        self.candles.iter().map(|candle| candle.high).collect()
    }

    pub fn low(&self) -> Vec<Decimal> {
        self.candles.iter().map(|candle| candle.low).collect()
    }

    pub fn close(&self) -> Vec<Decimal> {
        self.candles.iter().map(|candle| candle.close).collect()
    }

    pub fn volume(&self) -> Vec<Decimal> {
        self.candles.iter().map(|candle| candle.volume).collect()
    }
}
