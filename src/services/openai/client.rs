//! Chat-completions client for OpenAI-compatible APIs

use crate::config::LanguageModelConfig;
use crate::services::language_model::{LanguageModel, LanguageModelError, Prompt};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(config: &LanguageModelConfig) -> Result<Self, LanguageModelError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: &LanguageModelConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: config.timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn map_request_error(&self, error: reqwest::Error) -> LanguageModelError {
        if error.is_timeout() {
            LanguageModelError::Timeout(self.timeout.as_secs())
        } else {
            LanguageModelError::Request(error)
        }
    }
}

#[async_trait::async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LanguageModelError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.temperature,
        };

        debug!(model = %self.model, "Requesting chat completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LanguageModelError::Status {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        let body: ChatResponse = response.json().await.map_err(|e| self.map_request_error(e))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(LanguageModelError::EmptyResponse)
    }
}
