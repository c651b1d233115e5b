use candlefeed::data::parse_time;
use candlefeed::models::Interval;

#[test]
fn durations_in_seconds() {
    assert_eq!(Interval::Minute.duration_secs(), 60);
    assert_eq!(Interval::Hour.duration_secs(), 3600);
    assert_eq!(Interval::Day.duration_secs(), 86400);
}

#[test]
fn parses_names_and_short_forms() {
    assert_eq!(Interval::parse("minute").expect("minute"), Interval::Minute);
    assert_eq!(Interval::parse("1m").expect("1m"), Interval::Minute);
    assert_eq!(Interval::parse("hourly").expect("hourly"), Interval::Hour);
    assert_eq!(Interval::parse("1H").expect("1H"), Interval::Hour);
    assert_eq!(Interval::parse("day").expect("day"), Interval::Day);
    assert!(Interval::parse("week").is_err());
}

#[test]
fn latest_closed_candle_is_one_full_interval_back() {
    // 1560123119 sits inside the minute candle opened at 1560123060, so the
    // latest closed minute candle opened at 1560123000.
    assert_eq!(
        Interval::Minute.latest_closed_candle_time(1_560_123_119),
        1_560_123_000
    );
    // Exactly on a boundary: that candle just opened and is not closed.
    assert_eq!(
        Interval::Minute.latest_closed_candle_time(1_560_123_060),
        1_560_123_000
    );
    assert_eq!(
        Interval::Day.latest_closed_candle_time(1_560_123_119),
        1_559_952_000
    );
}

#[test]
fn parse_time_accepts_epoch_and_rfc3339() {
    let epoch = parse_time("1704067200").expect("epoch");
    let rfc = parse_time("2024-01-01T00:00:00Z").expect("rfc3339");
    assert_eq!(epoch, rfc);
    assert!(parse_time("").is_err());
    assert!(parse_time("yesterday").is_err());
}
