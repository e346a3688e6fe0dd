//! Process configuration read from the environment once at startup.

use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MARKET_DATA_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Deployment environment name (`production`, `sandbox`, ...)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Settings for the chart-data provider
#[derive(Debug, Clone)]
pub struct MarketDataConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MARKET_DATA_BASE_URL.to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

/// Settings for the chat-completions client. Only built when a key is present.
#[derive(Debug, Clone)]
pub struct LanguageModelConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl LanguageModelConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            temperature: 0.3,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub port: u16,
    pub market_data: MarketDataConfig,
    pub language_model: Option<LanguageModelConfig>,
    /// Language the model is asked to answer in
    pub analysis_language: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: DEFAULT_PORT,
            market_data: MarketDataConfig::default(),
            language_model: None,
            analysis_language: "English".to_string(),
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything missing or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let market_data = MarketDataConfig {
            base_url: non_empty_var("MARKET_DATA_BASE_URL")
                .unwrap_or(defaults.market_data.base_url),
            timeout: parse_var::<u64>("MARKET_DATA_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.market_data.timeout),
        };

        let language_model = non_empty_var("OPENAI_API_KEY").map(|key| {
            let mut llm = LanguageModelConfig::new(key);
            if let Some(base_url) = non_empty_var("OPENAI_BASE_URL") {
                llm.base_url = base_url;
            }
            if let Some(model) = non_empty_var("OPENAI_MODEL") {
                llm.model = model;
            }
            if let Some(temperature) = parse_var::<f32>("OPENAI_TEMPERATURE") {
                llm.temperature = temperature;
            }
            if let Some(secs) = parse_var::<u64>("LLM_TIMEOUT_SECS") {
                llm.timeout = Duration::from_secs(secs);
            }
            llm
        });

        Self {
            environment: get_environment(),
            port: parse_var("PORT").unwrap_or(defaults.port),
            market_data,
            language_model,
            analysis_language: non_empty_var("ANALYSIS_LANGUAGE")
                .unwrap_or(defaults.analysis_language),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }
}
