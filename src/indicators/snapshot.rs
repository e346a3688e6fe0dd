//! Indicator snapshot at the most recent candle.

use crate::indicators::momentum::{latest_rsi, DEFAULT_RSI_PERIOD};
use crate::indicators::trend::latest_ema;
use crate::models::indicators::{Candle, IndicatorSnapshot, RsiZone};

pub const FAST_EMA_SPAN: usize = 20;
pub const SLOW_EMA_SPAN: usize = 50;

/// Compute EMA20, EMA50 and RSI14 at the last candle. Each value is
/// independently unknown when its window lacks history. Returns `None`
/// only for an empty slice.
pub fn build_snapshot(candles: &[Candle]) -> Option<IndicatorSnapshot> {
    let last_close = candles.last()?.close;
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    let ema20 = latest_ema(&closes, FAST_EMA_SPAN);
    let ema50 = latest_ema(&closes, SLOW_EMA_SPAN);
    let rsi14 = latest_rsi(&closes, DEFAULT_RSI_PERIOD);

    Some(IndicatorSnapshot {
        last_close,
        ema20,
        ema50,
        rsi14,
        above_ema20: ema20.map(|ema| last_close > ema),
        above_ema50: ema50.map(|ema| last_close > ema),
        rsi_zone: RsiZone::classify(rsi14),
    })
}
