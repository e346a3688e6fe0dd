//! Unit tests for EMA indicator

use crate::fakes::{rising_candles, zigzag_candles};
use contract_lens::indicators::trend::{calculate_ema, ema_series, latest_ema};

#[test]
fn test_ema_span_one_is_identity() {
    let closes = [3.0, 7.5, 1.25, 9.0, 4.0];
    assert_eq!(ema_series(&closes, 1), closes.to_vec());
}

#[test]
fn test_ema_seeded_with_first_value() {
    // span 3 -> alpha 0.5
    let ema = ema_series(&[10.0, 20.0, 20.0], 3);
    assert_eq!(ema, vec![10.0, 15.0, 17.5]);
}

#[test]
fn test_ema_constant_series() {
    let closes = vec![42.0; 60];
    let value = latest_ema(&closes, 50).unwrap();
    assert!((value - 42.0).abs() < 1e-12);
}

#[test]
fn test_ema_empty_or_zero_span() {
    assert!(ema_series(&[], 20).is_empty());
    assert!(ema_series(&[1.0, 2.0], 0).is_empty());
    assert!(latest_ema(&[1.0, 2.0], 0).is_none());
}

#[test]
fn test_ema_insufficient_data() {
    let candles = rising_candles(19, 100.0);
    assert!(calculate_ema(&candles, 20).is_none());
    assert!(calculate_ema(&rising_candles(20, 100.0), 20).is_some());
}

#[test]
fn test_ema_lags_rising_series() {
    let candles = rising_candles(60, 100.0);
    let fast = calculate_ema(&candles, 20).unwrap();
    let slow = calculate_ema(&candles, 50).unwrap();
    let last = candles.last().unwrap().close;
    assert!(fast < last);
    assert!(slow < fast);
}

#[test]
fn test_ema_stays_within_price_range() {
    let candles = zigzag_candles(80, 50.0);
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let min = closes.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = closes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    for value in ema_series(&closes, 20) {
        assert!(value >= min && value <= max);
    }
}
