//! Unit tests for the indicator snapshot

use crate::fakes::{falling_candles, rising_candles, zigzag_candles};
use contract_lens::indicators::build_snapshot;
use contract_lens::models::indicators::RsiZone;

#[test]
fn empty_series_has_no_snapshot() {
    assert!(build_snapshot(&[]).is_none());
}

#[test]
fn single_candle_reports_unknowns() {
    let candles = rising_candles(1, 100.0);
    let snapshot = build_snapshot(&candles).unwrap();

    assert_eq!(snapshot.last_close, 100.0);
    assert_eq!(snapshot.ema20, None);
    assert_eq!(snapshot.ema50, None);
    assert_eq!(snapshot.rsi14, None);
    assert_eq!(snapshot.above_ema20, None);
    assert_eq!(snapshot.above_ema50, None);
    assert_eq!(snapshot.rsi_zone, RsiZone::Neutral);
}

#[test]
fn short_history_degrades_each_value_independently() {
    let candles = rising_candles(30, 100.0);
    let snapshot = build_snapshot(&candles).unwrap();

    assert!(snapshot.ema20.is_some());
    assert_eq!(snapshot.above_ema20, Some(true));
    assert_eq!(snapshot.ema50, None);
    assert_eq!(snapshot.above_ema50, None);
    assert_eq!(snapshot.rsi14, Some(100.0));
    assert_eq!(snapshot.rsi_zone, RsiZone::Overbought);
}

#[test]
fn downtrend_is_below_both_emas_and_oversold() {
    let candles = falling_candles(60, 200.0);
    let snapshot = build_snapshot(&candles).unwrap();

    assert_eq!(snapshot.above_ema20, Some(false));
    assert_eq!(snapshot.above_ema50, Some(false));
    assert_eq!(snapshot.rsi14, Some(0.0));
    assert_eq!(snapshot.rsi_zone, RsiZone::Oversold);
}

#[test]
fn last_close_is_most_recent_candle() {
    let candles = zigzag_candles(75, 40.0);
    let snapshot = build_snapshot(&candles).unwrap();
    assert_eq!(snapshot.last_close, candles.last().unwrap().close);
    assert!(snapshot.ema20.is_some() && snapshot.ema50.is_some());
    let rsi = snapshot.rsi14.unwrap();
    assert!((0.0..=100.0).contains(&rsi));
}
