//! Unit tests for bias classification and the fallback commentary

use contract_lens::analysis::commentary::{fallback_commentary, rsi_note, Bias};
use contract_lens::models::contract::Contract;
use contract_lens::models::indicators::{IndicatorSnapshot, RsiZone};
use serde_json::json;

fn snapshot(last_close: f64, ema20: Option<f64>, ema50: Option<f64>) -> IndicatorSnapshot {
    IndicatorSnapshot {
        last_close,
        ema20,
        ema50,
        rsi14: Some(55.0),
        above_ema20: ema20.map(|e| last_close > e),
        above_ema50: ema50.map(|e| last_close > e),
        rsi_zone: RsiZone::Neutral,
    }
}

#[test]
fn bias_anchors() {
    assert_eq!(
        Bias::from_snapshot(&snapshot(110.0, Some(100.0), Some(105.0))),
        Bias::Bullish
    );
    assert_eq!(
        Bias::from_snapshot(&snapshot(90.0, Some(100.0), Some(105.0))),
        Bias::Bearish
    );
    assert_eq!(
        Bias::from_snapshot(&snapshot(102.0, Some(100.0), Some(105.0))),
        Bias::Neutral
    );
}

#[test]
fn bias_with_unknown_emas() {
    // One unknown, one above: mixed.
    assert_eq!(
        Bias::from_snapshot(&snapshot(110.0, Some(100.0), None)),
        Bias::Neutral
    );
    // Both unknown count as "not above".
    assert_eq!(Bias::from_snapshot(&snapshot(110.0, None, None)), Bias::Bearish);
}

#[test]
fn fallback_text_is_exact() {
    let contract = Contract::from_value(json!({
        "Type": "call",
        "Side": "buy",
        "Strike": "150",
        "IV": "0.35",
    }));
    let mut snap = snapshot(151.239, Some(149.0), Some(145.0));
    snap.rsi14 = Some(72.5);
    snap.rsi_zone = RsiZone::Overbought;

    let text = fallback_commentary("AAPL", "1h", &contract, &snap);
    let expected = "Quick analysis (AAPL | 1h)\n\
                    - Technical bias: bullish. Last close 151.24.\n\
                    - Above EMA20/EMA50: yes/yes.\n\
                    - RSI is high (overbought): a pullback is possible.\n\
                    - Contract: CALL BUY, strike 150, IV=0.35.\n\
                    - Note: contract direction matches the technical bias.\n\
                    This is an automated fallback summary produced without a language model.";
    assert_eq!(text, expected);
}

#[test]
fn missing_contract_fields_use_placeholders() {
    let text = fallback_commentary(
        "SPY",
        "4h",
        &Contract::default(),
        &snapshot(90.0, Some(100.0), Some(105.0)),
    );
    assert!(text.contains("- Contract: - -, strike -, IV=-."));
    assert!(text.contains("- Above EMA20/EMA50: no/no."));
    assert!(text.contains("does not match the technical bias; proceed with caution."));
}

#[test]
fn put_aligns_with_bearish_bias() {
    let contract = Contract::from_value(json!({"Type": "put"}));
    let text = fallback_commentary(
        "TSLA",
        "15m",
        &contract,
        &snapshot(90.0, Some(100.0), Some(105.0)),
    );
    assert!(text.contains("- Technical bias: bearish."));
    assert!(text.contains("- Note: contract direction matches the technical bias."));
}

#[test]
fn unknown_flags_render_as_unknown() {
    let mut snap = snapshot(10.0, None, None);
    snap.rsi14 = None;
    let text = fallback_commentary("XYZ", "5m", &Contract::default(), &snap);
    assert!(text.contains("- Above EMA20/EMA50: unknown/unknown."));
    assert!(text.contains("- RSI is neutral."));
}

#[test]
fn rsi_notes_per_zone() {
    assert!(rsi_note(RsiZone::Overbought).contains("pullback"));
    assert!(rsi_note(RsiZone::Oversold).contains("rebound"));
    assert_eq!(rsi_note(RsiZone::Neutral), "RSI is neutral.");
}
