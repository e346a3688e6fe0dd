//! Prompt sent to the language model for the natural-language analysis.

use crate::analysis::commentary::flag;
use crate::models::contract::Contract;
use crate::models::indicators::IndicatorSnapshot;
use crate::services::language_model::Prompt;

pub const SYSTEM_PROMPT: &str =
    "You are a professional technical analyst covering US equities and listed options.";

fn number(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.4}"))
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn build_prompt(
    symbol: &str,
    interval: &str,
    contract: &Contract,
    snapshot: &IndicatorSnapshot,
    language: &str,
) -> Prompt {
    let user = format!(
        "Analyze this contract in light of the current price action of {symbol} on the {interval} timeframe.\n\
         \n\
         Contract data (as supplied):\n\
         {contract_json}\n\
         \n\
         Indicator summary:\n\
         - Last close: {last_close:.4}\n\
         - EMA20: {ema20}\n\
         - EMA50: {ema50}\n\
         - RSI14: {rsi14} ({zone})\n\
         - Price above EMA20? {above20}\n\
         - Price above EMA50? {above50}\n\
         \n\
         Considerations:\n\
         - If the contract is weekly (7 days or less), focus on 15-minute momentum and quick reversal signals.\n\
         - If it expires within two weeks (14 days or less), use 1h to gauge the immediate trend and pullbacks.\n\
         - Otherwise, use 4h for the broader trend.\n\
         \n\
         Required:\n\
         - Expected short-term direction backed by at least two technical reasons.\n\
         - How this fits the contract type (CALL/PUT), the strike and the IV.\n\
         - Potential risks and an alternative plan (invalidations).\n\
         - Suggested indicative entry/exit levels, stating clearly that this is not a recommendation.\n\
         - Write concisely and clearly in professional {language}.",
        contract_json = contract.to_json(),
        last_close = snapshot.last_close,
        ema20 = number(snapshot.ema20),
        ema50 = number(snapshot.ema50),
        rsi14 = number(snapshot.rsi14),
        zone = snapshot.rsi_zone,
        above20 = flag(snapshot.above_ema20),
        above50 = flag(snapshot.above_ema50),
    );

    Prompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}
