//! RSI (Relative Strength Index) indicator
//!
//! RSI = 100 - (100 / (1 + RS))
//! RS = mean gain / mean loss over a simple rolling window

use crate::models::indicators::Candle;

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Per-step gains and losses. The first point has no prior close and
/// contributes zero to both.
fn gains_and_losses(values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut gains = Vec::with_capacity(values.len());
    let mut losses = Vec::with_capacity(values.len());

    if !values.is_empty() {
        gains.push(0.0);
        losses.push(0.0);
    }

    for pair in values.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    (gains, losses)
}

fn rsi_from_means(mean_gain: f64, mean_loss: f64) -> Option<f64> {
    if mean_loss == 0.0 {
        // All gains pins RSI at 100; a flat window leaves RS undefined.
        return (mean_gain > 0.0).then_some(100.0);
    }
    let rs = mean_gain / mean_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

/// RSI for every point; `None` for the first `period - 1` points and for
/// flat windows.
pub fn rsi_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let (gains, losses) = gains_and_losses(values);

    (0..values.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let window = i + 1 - period..=i;
            let mean_gain = gains[window.clone()].iter().sum::<f64>() / period as f64;
            let mean_loss = losses[window].iter().sum::<f64>() / period as f64;
            rsi_from_means(mean_gain, mean_loss)
        })
        .collect()
}

/// RSI at the last value
pub fn latest_rsi(values: &[f64], period: usize) -> Option<f64> {
    rsi_series(values, period).last().copied().flatten()
}

/// RSI of candle closes at the last candle
pub fn calculate_rsi(candles: &[Candle], period: usize) -> Option<f64> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    latest_rsi(&closes, period)
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Option<f64> {
    calculate_rsi(candles, DEFAULT_RSI_PERIOD)
}
