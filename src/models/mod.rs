//! Shared data models spanning the service layers.

pub mod analysis;
pub mod contract;
pub mod indicators;

pub use analysis::{AnalysisRequest, AnalysisResult, CommentarySource, PriceQuote};
pub use contract::Contract;
pub use indicators::{Candle, IndicatorSnapshot, RsiZone};
