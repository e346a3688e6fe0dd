//! EMA (Exponential Moving Average) indicator

use crate::models::indicators::Candle;

/// EMA over the whole series with `alpha = 2 / (span + 1)`, seeded by the
/// first value.
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 || values.is_empty() {
        return Vec::new();
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut result = Vec::with_capacity(values.len());
    let mut prev = values[0];
    result.push(prev);

    for &value in &values[1..] {
        prev = alpha * value + (1.0 - alpha) * prev;
        result.push(prev);
    }

    result
}

/// EMA at the last value, or `None` with fewer than `span` values
pub fn latest_ema(values: &[f64], span: usize) -> Option<f64> {
    if span == 0 || values.len() < span {
        return None;
    }
    ema_series(values, span).last().copied()
}

/// EMA of candle closes at the last candle
pub fn calculate_ema(candles: &[Candle], span: usize) -> Option<f64> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    latest_ema(&closes, span)
}
