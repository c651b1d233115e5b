use candlefeed::models::SymbolPair;

#[test]
fn parses_base_quote_and_uppercases() {
    let pair = SymbolPair::parse("btc/usd").expect("pair");
    assert_eq!(pair.base(), "BTC");
    assert_eq!(pair.quote(), "USD");
    assert_eq!(pair.to_string(), "BTC/USD");
}

#[test]
fn rejects_malformed_pairs() {
    assert!(SymbolPair::parse("BTCUSD").is_err());
    assert!(SymbolPair::parse("BTC/").is_err());
    assert!(SymbolPair::parse("/USD").is_err());
    assert!(SymbolPair::new("", "USD").is_err());
    assert!(SymbolPair::new("BTC", "  ").is_err());
}

#[test]
fn converts_to_crypto_compare_symbols() {
    let pair = SymbolPair::parse("BTC/USD").expect("pair");
    let converted = pair.to_crypto_compare();
    assert_eq!(converted.fsym, "BTC");
    assert_eq!(converted.tsym, "USD");
}

#[test]
fn converts_to_kraken_classic_codes() {
    assert_eq!(
        SymbolPair::parse("BTC/USD").expect("pair").to_kraken(),
        "XXBTZUSD"
    );
    assert_eq!(
        SymbolPair::parse("XBT/EUR").expect("pair").to_kraken(),
        "XXBTZEUR"
    );
    assert_eq!(
        SymbolPair::parse("ETH/USD").expect("pair").to_kraken(),
        "XETHZUSD"
    );
}

#[test]
fn assets_without_classic_codes_keep_their_ticker() {
    assert_eq!(
        SymbolPair::parse("ETH/USDT").expect("pair").to_kraken(),
        "XETHUSDT"
    );
    assert_eq!(
        SymbolPair::parse("SOL/USD").expect("pair").to_kraken(),
        "SOLZUSD"
    );
}
