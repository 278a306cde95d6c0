//! Unit tests for candle validation and series construction

use crate::support::{bar_time, uptrend};
use trendscan::models::{Candle, CandleSeries};
use trendscan::ScanError;

#[test]
fn test_from_fetched_drops_open_bar() {
    let series = CandleSeries::from_fetched("AAA", uptrend(5), 200).unwrap();
    assert_eq!(series.len(), 4);
    assert_eq!(series.last().unwrap().close, 103.0);
    assert_eq!(series.symbol(), "AAA");
}

#[test]
fn test_from_fetched_caps_to_lookback_keeping_latest() {
    let series = CandleSeries::from_fetched("AAA", uptrend(12), 5).unwrap();
    assert_eq!(series.len(), 5);
    assert_eq!(series.closes(), vec![106.0, 107.0, 108.0, 109.0, 110.0]);
}

#[test]
fn test_from_fetched_empty_response() {
    let series = CandleSeries::from_fetched("AAA", Vec::new(), 200).unwrap();
    assert!(series.is_empty());
}

#[test]
fn test_bar_with_close_above_high_is_rejected() {
    let mut candles = uptrend(6);
    candles[2].high = candles[2].close - 1.0;
    let err = CandleSeries::from_fetched("AAA", candles, 200).unwrap_err();
    assert!(matches!(err, ScanError::DataUnavailable { ref symbol, .. } if symbol == "AAA"));
}

#[test]
fn test_negative_and_nan_values_are_rejected() {
    let mut candles = uptrend(6);
    candles[1].volume = -1.0;
    assert!(CandleSeries::from_fetched("AAA", candles, 200).is_err());

    let mut candles = uptrend(6);
    candles[3].low = f64::NAN;
    assert!(CandleSeries::from_fetched("AAA", candles, 200).is_err());
}

#[test]
fn test_unordered_bars_are_rejected() {
    let mut candles = uptrend(6);
    candles.swap(1, 2);
    let err = CandleSeries::from_fetched("AAA", candles, 200).unwrap_err();
    assert_eq!(err.kind(), "data_unavailable");
}

#[test]
fn test_malformed_open_bar_is_ignored() {
    // The trailing bar is dropped before validation.
    let mut candles = uptrend(4);
    candles.push(Candle::new(1.0, 0.5, 2.0, 1.0, 0.0, bar_time(4)));
    assert_eq!(CandleSeries::from_fetched("AAA", candles, 200).unwrap().len(), 4);
}

#[test]
fn test_validate_accepts_doji() {
    let candle = Candle::new(5.0, 5.0, 5.0, 5.0, 0.0, bar_time(0));
    assert!(candle.validate().is_ok());
}
