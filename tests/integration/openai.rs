//! Integration tests for the chat-completions client against a mocked API.

use crate::fakes::rising_candles;
use crate::fakes::FakeMarketData;
use contract_lens::analysis::AnalysisService;
use contract_lens::config::LanguageModelConfig;
use contract_lens::models::analysis::{AnalysisRequest, CommentarySource};
use contract_lens::models::contract::Contract;
use contract_lens::services::language_model::{LanguageModel, LanguageModelError, Prompt};
use contract_lens::services::openai::OpenAiClient;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenAiClient {
    let config = LanguageModelConfig {
        base_url: server.uri(),
        ..LanguageModelConfig::new("sk-test")
    };
    OpenAiClient::new(&config).expect("client")
}

fn prompt() -> Prompt {
    Prompt {
        system: "You are an analyst.".to_string(),
        user: "Analyze AAPL.".to_string(),
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn completion_returns_trimmed_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "messages": [
                { "role": "system", "content": "You are an analyst." },
                { "role": "user", "content": "Analyze AAPL." }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("  Bullish above EMA20.\n")))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server).complete(&prompt()).await.expect("completion");
    assert_eq!(text, "Bullish above EMA20.");
}

#[tokio::test]
async fn rejected_key_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(&prompt()).await.unwrap_err();
    assert!(matches!(err, LanguageModelError::Status { status: 401, .. }));
}

#[tokio::test]
async fn empty_choices_are_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(&prompt()).await.unwrap_err();
    assert!(matches!(err, LanguageModelError::EmptyResponse));
}

#[tokio::test]
async fn analysis_uses_model_when_available() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Trend is up.")))
        .mount(&server)
        .await;

    let service = AnalysisService::new(Arc::new(FakeMarketData::with_candles(rising_candles(60, 100.0))))
        .with_language_model(Arc::new(client_for(&server)));

    let contract = Contract::from_value(json!({ "Type": "CALL", "Strike": "150" }));
    let result = service
        .analyze(AnalysisRequest::new("AAPL", contract))
        .await
        .expect("analysis");
    assert_eq!(result.source, CommentarySource::Model);
    assert_eq!(result.analysis, "Trend is up.");

    let requests = server.received_requests().await.expect("wiremock requests");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).expect("json body");
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains(r#"{"Type":"CALL","Strike":"150"}"#));
    assert!(user.contains("AAPL on the 1h timeframe"));
}

#[tokio::test]
async fn analysis_falls_back_when_model_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let service = AnalysisService::new(Arc::new(FakeMarketData::with_candles(rising_candles(60, 100.0))))
        .with_language_model(Arc::new(client_for(&server)));

    let result = service
        .analyze(AnalysisRequest::new("AAPL", Contract::default()))
        .await
        .expect("analysis");
    assert_eq!(result.source, CommentarySource::Fallback);
    assert!(result.analysis.starts_with("Quick analysis (AAPL | 1h)"));
}
