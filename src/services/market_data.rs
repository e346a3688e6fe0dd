//! Market data provider interface.

use crate::models::indicators::Candle;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Unknown symbol or an empty result set
    #[error("No data for {0}")]
    NoData(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("unsupported {kind}: {value}")]
    Unsupported { kind: &'static str, value: String },

    #[error("timed out after {0}s")]
    Timeout(u64),
}

#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Historical candles for `symbol` covering `period` (e.g. `5d`, `1mo`)
    /// at `interval` (e.g. `5m`, `1h`), oldest first. Rows with missing
    /// fields are already dropped.
    async fn fetch_candles(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<Candle>, MarketDataError>;
}
