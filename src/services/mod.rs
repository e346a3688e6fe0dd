//! External collaborators: market data and language model providers.

pub mod language_model;
pub mod market_data;
pub mod openai;
pub mod yahoo;

pub use language_model::{LanguageModel, LanguageModelError, Prompt};
pub use market_data::{MarketDataError, MarketDataProvider};
pub use openai::OpenAiClient;
pub use yahoo::YahooMarketDataProvider;
