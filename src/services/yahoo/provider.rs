//! Yahoo Finance chart API market data provider

use crate::config::MarketDataConfig;
use crate::models::indicators::Candle;
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use chrono::DateTime;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::{debug, warn};

use super::messages::{ChartResponse, ChartResult};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const FOUR_HOURS_SECS: i64 = 4 * 60 * 60;

pub struct YahooMarketDataProvider {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl YahooMarketDataProvider {
    pub fn new(config: &MarketDataConfig) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;
        Ok(Self::with_client(config.base_url.clone(), client, config.timeout))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// `{base}/v8/finance/chart/{symbol}` with the symbol escaped as a
    /// single path segment
    fn chart_url(&self, symbol: &str) -> Result<Url, MarketDataError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| MarketDataError::Malformed(format!("invalid base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| MarketDataError::Malformed(format!("invalid base url: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart"])
            .push(symbol);
        Ok(url)
    }

    fn map_request_error(&self, error: reqwest::Error) -> MarketDataError {
        if error.is_timeout() {
            MarketDataError::Timeout(self.timeout.as_secs())
        } else {
            MarketDataError::Request(error)
        }
    }
}

/// Interval to request from the chart API, plus the bucket size to
/// aggregate into when the API lacks the interval natively.
pub(crate) fn resolve_interval(interval: &str) -> Result<(&'static str, Option<i64>), MarketDataError> {
    match interval {
        "1m" => Ok(("1m", None)),
        "2m" => Ok(("2m", None)),
        "5m" => Ok(("5m", None)),
        "15m" => Ok(("15m", None)),
        "30m" => Ok(("30m", None)),
        "1h" | "60m" => Ok(("1h", None)),
        "4h" => Ok(("1h", Some(FOUR_HOURS_SECS))),
        "1d" => Ok(("1d", None)),
        other => Err(MarketDataError::Unsupported {
            kind: "interval",
            value: other.to_string(),
        }),
    }
}

/// Validate a lookback `range` such as `5d`, `1mo`, `1y`, `ytd` or `max`.
/// The chart API counts ranges in trading sessions, so the value is passed
/// through unchanged rather than converted into timestamps.
pub(crate) fn resolve_range(period: &str) -> Result<&str, MarketDataError> {
    let unsupported = || MarketDataError::Unsupported {
        kind: "period",
        value: period.to_string(),
    };
    if matches!(period, "ytd" | "max") {
        return Ok(period);
    }

    let split = period
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(unsupported)?;
    let (count, unit) = period.split_at(split);
    if count.is_empty() || count.starts_with('0') || count.len() > 4 {
        return Err(unsupported());
    }
    match unit {
        "d" | "wk" | "mo" | "y" => Ok(period),
        _ => Err(unsupported()),
    }
}

/// Turn the column-oriented chart result into candles, dropping bars with
/// any missing field. Output is sorted with unique timestamps.
pub(crate) fn to_candles(result: &ChartResult) -> Vec<Candle> {
    let timestamps = match &result.timestamp {
        Some(ts) => ts,
        None => return Vec::new(),
    };
    let quote = match result.indicators.quote.first() {
        Some(q) => q,
        None => return Vec::new(),
    };

    let column = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

    let mut candles: Vec<Candle> = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let timestamp = DateTime::from_timestamp(ts, 0)?;
            Some(Candle::new(
                column(&quote.open, i)?,
                column(&quote.high, i)?,
                column(&quote.low, i)?,
                column(&quote.close, i)?,
                column(&quote.volume, i)?,
                timestamp,
            ))
        })
        .collect();

    candles.sort_by_key(|c| c.timestamp);
    candles.dedup_by_key(|c| c.timestamp);
    candles
}

/// Aggregate sorted candles into fixed UTC buckets of `bucket_secs`
pub fn resample(candles: &[Candle], bucket_secs: i64) -> Vec<Candle> {
    let mut buckets: Vec<(i64, Candle)> = Vec::new();

    for candle in candles {
        let key = candle.timestamp.timestamp().div_euclid(bucket_secs) * bucket_secs;
        if let Some((last_key, agg)) = buckets.last_mut() {
            if *last_key == key {
                agg.high = agg.high.max(candle.high);
                agg.low = agg.low.min(candle.low);
                agg.close = candle.close;
                agg.volume += candle.volume;
                continue;
            }
        }

        let mut agg = candle.clone();
        if let Some(start) = DateTime::from_timestamp(key, 0) {
            agg.timestamp = start;
        }
        buckets.push((key, agg));
    }

    buckets.into_iter().map(|(_, candle)| candle).collect()
}

#[async_trait::async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn fetch_candles(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let (request_interval, bucket) = resolve_interval(interval)?;
        let range = resolve_range(period)?;
        let url = self.chart_url(symbol)?;
        debug!(symbol = %symbol, period = %period, interval = %interval, "Fetching chart data");

        let response = self
            .client
            .get(url)
            .query(&[
                ("range", range),
                ("interval", request_interval),
                ("includePrePost", "false"),
            ])
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MarketDataError::NoData(symbol.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(symbol = %symbol, status = status.as_u16(), "Chart API error");
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        let body: ChartResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout(self.timeout.as_secs())
            } else {
                MarketDataError::Malformed(e.to_string())
            }
        })?;

        if let Some(error) = body.chart.error {
            return Err(if error.code == "Not Found" {
                MarketDataError::NoData(symbol.to_string())
            } else {
                MarketDataError::Malformed(error.description.unwrap_or(error.code))
            });
        }

        let candles = body
            .chart
            .result
            .as_ref()
            .and_then(|results| results.first())
            .map(to_candles)
            .unwrap_or_default();

        let candles = match bucket {
            Some(secs) => resample(&candles, secs),
            None => candles,
        };

        debug!(symbol = %symbol, count = candles.len(), "Fetched candles");
        Ok(candles)
    }
}
