//! Deterministic commentary used when no language model answers.

use crate::models::contract::{Contract, PLACEHOLDER};
use crate::models::indicators::{IndicatorSnapshot, RsiZone};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

impl Bias {
    /// Unknown EMA comparisons count as "not above".
    pub fn from_snapshot(snapshot: &IndicatorSnapshot) -> Self {
        let above_fast = snapshot.above_ema20 == Some(true);
        let above_slow = snapshot.above_ema50 == Some(true);
        match (above_fast, above_slow) {
            (true, true) => Bias::Bullish,
            (false, false) => Bias::Bearish,
            _ => Bias::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Bias::Bullish => "bullish",
            Bias::Bearish => "bearish",
            Bias::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn rsi_note(zone: RsiZone) -> &'static str {
    match zone {
        RsiZone::Overbought => "RSI is high (overbought): a pullback is possible.",
        RsiZone::Oversold => "RSI is low (oversold): a rebound is possible.",
        RsiZone::Neutral => "RSI is neutral.",
    }
}

pub(crate) fn flag(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    }
}

/// Contract direction agrees with the technical bias
fn is_aligned(option_type: Option<&str>, bias: Bias) -> bool {
    matches!(
        (option_type, bias),
        (Some("CALL"), Bias::Bullish) | (Some("PUT"), Bias::Bearish)
    )
}

pub fn fallback_commentary(
    symbol: &str,
    interval: &str,
    contract: &Contract,
    snapshot: &IndicatorSnapshot,
) -> String {
    let bias = Bias::from_snapshot(snapshot);
    let option_type = contract.option_type();
    let side = contract.side().unwrap_or_else(|| PLACEHOLDER.to_string());
    let strike = contract.field_or_placeholder("Strike");
    let iv = contract.field_or_placeholder("IV");

    let alignment = if is_aligned(option_type.as_deref(), bias) {
        "contract direction matches the technical bias."
    } else {
        "contract direction does not match the technical bias; proceed with caution."
    };

    format!(
        "Quick analysis ({symbol} | {interval})\n\
         - Technical bias: {bias}. Last close {last_close:.2}.\n\
         - Above EMA20/EMA50: {above20}/{above50}.\n\
         - {rsi}\n\
         - Contract: {typ} {side}, strike {strike}, IV={iv}.\n\
         - Note: {alignment}\n\
         This is an automated fallback summary produced without a language model.",
        last_close = snapshot.last_close,
        above20 = flag(snapshot.above_ema20),
        above50 = flag(snapshot.above_ema50),
        rsi = rsi_note(snapshot.rsi_zone),
        typ = option_type.as_deref().unwrap_or(PLACEHOLDER),
    )
}
