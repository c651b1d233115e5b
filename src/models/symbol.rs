use crate::{Error, Result};

/// An exchange-agnostic base/quote currency pair. Tickers are stored
/// uppercased; each exchange adapter asks for its own wire format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolPair {
    base: String,
    quote: String,
}

/// CryptoCompare takes the pair as two separate query parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CryptoComparePair {
    pub fsym: String,
    pub tsym: String,
}

impl SymbolPair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Result<Self> {
        let base = base.into().trim().to_uppercase();
        let quote = quote.into().trim().to_uppercase();
        if base.is_empty() {
            return Err(Error::invalid_config("symbol pair base must be set"));
        }
        if quote.is_empty() {
            return Err(Error::invalid_config("symbol pair quote must be set"));
        }
        Ok(Self { base, quote })
    }

    /// Parses `BASE/QUOTE`, e.g. `BTC/USD`.
    pub fn parse(value: &str) -> Result<Self> {
        let mut parts = value.splitn(2, '/');
        let base = parts.next().unwrap_or("");
        let quote = parts.next().ok_or_else(|| {
            Error::invalid_config(format!("symbol pair must look like BASE/QUOTE, got '{value}'"))
        })?;
        SymbolPair::new(base, quote)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    pub fn to_crypto_compare(&self) -> CryptoComparePair {
        CryptoComparePair {
            fsym: self.base.clone(),
            tsym: self.quote.clone(),
        }
    }

    /// Kraken's concatenated classic pair code, e.g. `BTC/USD -> XXBTZUSD`.
    /// Assets without a classic alias (USDT, DAI, ...) keep their bare
    /// ticker, which is also what Kraken accepts for them.
    pub fn to_kraken(&self) -> String {
        format!(
            "{}{}",
            kraken_asset_code(&self.base),
            kraken_asset_code(&self.quote)
        )
    }
}

impl std::fmt::Display for SymbolPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

fn kraken_asset_code(ticker: &str) -> String {
    match ticker {
        "BTC" | "XBT" => "XXBT".to_string(),
        "ETH" => "XETH".to_string(),
        "LTC" => "XLTC".to_string(),
        "XRP" => "XXRP".to_string(),
        "XLM" => "XXLM".to_string(),
        "ETC" => "XETC".to_string(),
        "ZEC" => "XZEC".to_string(),
        "XMR" => "XXMR".to_string(),
        "USD" => "ZUSD".to_string(),
        "EUR" => "ZEUR".to_string(),
        "GBP" => "ZGBP".to_string(),
        "JPY" => "ZJPY".to_string(),
        "CAD" => "ZCAD".to_string(),
        "AUD" => "ZAUD".to_string(),
        other => other.to_string(),
    }
}
