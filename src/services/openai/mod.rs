//! OpenAI chat-completions integration

pub mod client;

pub use client::OpenAiClient;
