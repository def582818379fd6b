//! Hosted model access: text embeddings and chat completions.

pub mod chat;
pub mod embeddings;

use std::future::Future;
use std::time::Duration;

use anyhow::Result;

use crate::config::LlmConfig;
use crate::models::ChatMessage;

/// Turns text into an embedding vector.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>>> + Send;
}

/// Produces a single assistant reply for a list of messages.
pub trait ChatModel: Send + Sync {
    fn complete(&self, messages: &[ChatMessage]) -> impl Future<Output = Result<String>> + Send;
}

/// HTTP client for an Ollama or OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }
}

impl Embedder for LlmClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        embeddings::embed_single(&self.http, &self.config, text).await
    }
}

impl ChatModel for LlmClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        chat::complete_chat(&self.http, &self.config, messages).await
    }
}
