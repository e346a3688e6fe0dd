//! Language model interface used for the optional natural-language analysis.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LanguageModelError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("model API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("model returned no content")]
    EmptyResponse,

    #[error("timed out after {0}s")]
    Timeout(u64),
}

/// A chat prompt: fixed system framing plus the user message
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LanguageModelError>;
}
