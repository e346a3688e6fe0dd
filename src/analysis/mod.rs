//! Timeframe selection, commentary and the analysis orchestrator.

pub mod commentary;
pub mod prompt;
pub mod service;
pub mod timeframe;

pub use commentary::{fallback_commentary, Bias};
pub use prompt::build_prompt;
pub use service::AnalysisService;
pub use timeframe::{select_timeframe, TimeframeChoice};
