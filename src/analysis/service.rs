//! Analysis orchestration: timeframe, candles, indicators, commentary.

use crate::analysis::commentary::fallback_commentary;
use crate::analysis::prompt::build_prompt;
use crate::analysis::timeframe::select_timeframe;
use crate::config::AppConfig;
use crate::error::AnalysisError;
use crate::indicators::build_snapshot;
use crate::metrics::Metrics;
use crate::models::analysis::{AnalysisRequest, AnalysisResult, CommentarySource, PriceQuote};
use crate::models::contract::Contract;
use crate::models::indicators::{Candle, IndicatorSnapshot};
use crate::services::language_model::{LanguageModel, LanguageModelError};
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use crate::services::openai::OpenAiClient;
use crate::services::yahoo::YahooMarketDataProvider;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Candles kept for indicator computation
pub const INDICATOR_WINDOW: usize = 120;
/// Trailing candles returned when the caller asks for them
pub const PAYLOAD_WINDOW: usize = 50;
pub const PREVIEW_WINDOW: usize = 10;

pub const PRICE_PERIOD: &str = "1d";
pub const PRICE_INTERVAL: &str = "1h";

fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// Trimmed and upper-cased, `None` when nothing is left
pub fn normalize_symbol(raw: Option<&str>) -> Option<String> {
    raw.map(|s| s.trim().to_uppercase()).filter(|s| !s.is_empty())
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Stateless service shared by all requests. Collaborators are injected so
/// tests can substitute fakes.
pub struct AnalysisService {
    market_data: Arc<dyn MarketDataProvider>,
    language_model: Option<Arc<dyn LanguageModel>>,
    metrics: Option<Arc<Metrics>>,
    fetch_timeout: Duration,
    model_timeout: Duration,
    language: String,
}

impl AnalysisService {
    pub fn new(market_data: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            market_data,
            language_model: None,
            metrics: None,
            fetch_timeout: Duration::from_secs(20),
            model_timeout: Duration::from_secs(30),
            language: "English".to_string(),
        }
    }

    /// Wire the production collaborators. The language model is only
    /// created when an API key is configured.
    pub fn from_config(
        config: &AppConfig,
        metrics: Option<Arc<Metrics>>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let provider = YahooMarketDataProvider::new(&config.market_data)?;
        let mut service = Self::new(Arc::new(provider))
            .with_fetch_timeout(config.market_data.timeout)
            .with_language(config.analysis_language.clone());

        if let Some(llm) = &config.language_model {
            let client = OpenAiClient::new(llm)?;
            info!(model = %client.model(), "Language model commentary enabled");
            service = service
                .with_language_model(Arc::new(client))
                .with_model_timeout(llm.timeout);
        } else {
            info!("OPENAI_API_KEY not set, serving fallback commentary only");
        }

        if let Some(metrics) = metrics {
            service = service.with_metrics(metrics);
        }

        Ok(service)
    }

    pub fn with_language_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.language_model = Some(model);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn has_language_model(&self) -> bool {
        self.language_model.is_some()
    }

    async fn fetch(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let fetch = self.market_data.fetch_candles(symbol, period, interval);
        let result = tokio::time::timeout(self.fetch_timeout, fetch)
            .await
            .unwrap_or_else(|_| Err(MarketDataError::Timeout(self.fetch_timeout.as_secs())));

        if result.as_ref().map_or(true, |candles| candles.is_empty()) {
            if let Some(metrics) = &self.metrics {
                metrics.market_data_failures_total.inc();
            }
        }
        result
    }

    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let symbol = normalize_symbol(request.symbol.as_deref())
            .ok_or_else(|| AnalysisError::Validation("symbol is required".to_string()))?;
        let contract = request.contract;

        let expiration = contract.expiration();
        let timeframe = select_timeframe(expiration.as_deref(), Utc::now());
        debug!(
            symbol = %symbol,
            interval = timeframe.interval,
            period = timeframe.period,
            "Selected timeframe"
        );

        let candles = self
            .fetch(&symbol, timeframe.period, timeframe.interval)
            .await
            .map_err(|e| {
                warn!(symbol = %symbol, error = %e, "Candle fetch failed");
                AnalysisError::DataFetch(e.to_string())
            })?;

        let window = tail(&candles, INDICATOR_WINDOW);
        let snapshot = build_snapshot(window)
            .ok_or_else(|| AnalysisError::DataFetch("No data".to_string()))?;

        let fallback = fallback_commentary(&symbol, timeframe.interval, &contract, &snapshot);
        let (analysis, source) = self
            .commentary(&symbol, timeframe.interval, &contract, &snapshot, fallback)
            .await;

        let payload = tail(window, PAYLOAD_WINDOW);
        let preview = tail(payload, PREVIEW_WINDOW);

        info!(
            symbol = %symbol,
            interval = timeframe.interval,
            candles = window.len(),
            source = ?source,
            "Analysis complete"
        );

        Ok(AnalysisResult {
            frame_used: timeframe.interval.to_string(),
            tech: snapshot,
            analysis,
            source,
            candles_preview: preview.to_vec(),
            candles: request.include_candles.then(|| payload.to_vec()),
        })
    }

    /// Model text when a model is configured and answers; the fallback
    /// otherwise. Model failures never reach the caller.
    async fn commentary(
        &self,
        symbol: &str,
        interval: &str,
        contract: &Contract,
        snapshot: &IndicatorSnapshot,
        fallback: String,
    ) -> (String, CommentarySource) {
        let Some(model) = &self.language_model else {
            return (fallback, CommentarySource::Fallback);
        };

        let prompt = build_prompt(symbol, interval, contract, snapshot, &self.language);
        let result = tokio::time::timeout(self.model_timeout, model.complete(&prompt))
            .await
            .unwrap_or_else(|_| Err(LanguageModelError::Timeout(self.model_timeout.as_secs())));

        match result {
            Ok(text) => (text, CommentarySource::Model),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Language model unavailable, using fallback commentary");
                if let Some(metrics) = &self.metrics {
                    metrics.commentary_fallbacks_total.inc();
                }
                (fallback, CommentarySource::Fallback)
            }
        }
    }

    /// Latest hourly close, rounded to cents
    pub async fn price(&self, symbol: &str) -> Result<PriceQuote, AnalysisError> {
        let symbol = normalize_symbol(Some(symbol))
            .ok_or_else(|| AnalysisError::Validation("symbol is required".to_string()))?;

        let candles = match self.fetch(&symbol, PRICE_PERIOD, PRICE_INTERVAL).await {
            Ok(candles) => candles,
            Err(MarketDataError::NoData(_)) => Vec::new(),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Price fetch failed");
                return Err(AnalysisError::DataFetch(e.to_string()));
            }
        };

        let last = candles
            .last()
            .ok_or_else(|| AnalysisError::NotFound(format!("No data for {symbol}")))?;

        Ok(PriceQuote {
            price: round_cents(last.close),
            symbol,
        })
    }
}
