//! Request and response payloads for the analysis and price endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::contract::Contract;
use super::indicators::{Candle, IndicatorSnapshot};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default, deserialize_with = "lenient_symbol")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_contract")]
    pub contract: Contract,
    /// Also return the trailing payload window, not just the preview
    #[serde(default)]
    pub include_candles: bool,
}

impl AnalysisRequest {
    pub fn new(symbol: impl Into<String>, contract: Contract) -> Self {
        Self {
            symbol: Some(symbol.into()),
            contract,
            include_candles: false,
        }
    }
}

fn lenient_symbol<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_contract<'de, D>(deserializer: D) -> Result<Contract, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Contract::from_value)
}

/// Where the `analysis` text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentarySource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub frame_used: String,
    pub tech: IndicatorSnapshot,
    pub analysis: String,
    pub source: CommentarySource,
    pub candles_preview: Vec<Candle>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub candles: Option<Vec<Candle>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: f64,
}
