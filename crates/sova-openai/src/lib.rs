// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible chat model and embedding adapter for Sova.
//!
//! One [`OpenAiProvider`] implements both [`ChatModelAdapter`] and
//! [`EmbeddingAdapter`] against any server exposing `/chat/completions`
//! and `/embeddings` with the OpenAI wire format.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use sova_config::model::ProviderConfig;
use sova_core::traits::{ChatModelAdapter, EmbeddingAdapter, PluginAdapter};
use sova_core::types::{ChatMessage, EmbeddingInput, EmbeddingOutput, Role};
use sova_core::SovaError;
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::{ApiMessage, ChatCompletionRequest, EmbeddingRequest};

/// Environment variable consulted when the config has no API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Chat and embedding provider for OpenAI-compatible endpoints.
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiProvider {
    client: OpenAiClient,
    chat_model: String,
    embedding_model: String,
    temperature: Option<f32>,
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, SovaError> {
        let api_key = resolve_api_key(config.api_key.as_deref())?;
        let client = OpenAiClient::new(
            &api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            config.max_retries,
        )?;

        info!(
            base_url = client.base_url(),
            chat_model = config.chat_model.as_str(),
            embedding_model = config.embedding_model.as_str(),
            "OpenAI-compatible provider initialized"
        );

        Ok(Self {
            client,
            chat_model: config.chat_model.clone(),
            embedding_model: config.embedding_model.clone(),
            temperature: config.temperature,
        })
    }
}

impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }
}

#[async_trait]
impl ChatModelAdapter for OpenAiProvider {
    async fn invoke(&self, messages: &[ChatMessage]) -> Result<ChatMessage, SovaError> {
        let request = ChatCompletionRequest {
            model: self.chat_model.clone(),
            messages: messages.iter().map(to_api_message).collect(),
            temperature: self.temperature,
        };

        let response = self.client.chat_completion(&request).await?;
        debug!(id = ?response.id, choices = response.choices.len(), "chat completion received");

        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SovaError::model("response contained no choices"))?
            .message
            .content
            .ok_or_else(|| SovaError::model("response contained no message content"))?;

        Ok(ChatMessage::Ai(content))
    }
}

#[async_trait]
impl EmbeddingAdapter for OpenAiProvider {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, SovaError> {
        let expected = input.texts.len();
        let request = EmbeddingRequest {
            model: self.embedding_model.clone(),
            input: input.texts,
        };

        let mut data = self.client.embeddings(&request).await?.data;
        if data.len() != expected {
            return Err(SovaError::embedding(format!(
                "expected {expected} embeddings, got {}",
                data.len()
            )));
        }
        data.sort_by_key(|d| d.index);

        Ok(EmbeddingOutput {
            embeddings: data.into_iter().map(|d| d.embedding).collect(),
        })
    }
}

fn to_api_message(message: &ChatMessage) -> ApiMessage {
    let role = match message.role() {
        Role::System => "system",
        Role::Human => "user",
        Role::Ai => "assistant",
    };
    ApiMessage {
        role: role.to_string(),
        content: message.content().to_string(),
    }
}

/// Resolves the API key from config, then the `OPENAI_API_KEY` environment variable.
pub fn resolve_api_key(config_key: Option<&str>) -> Result<String, SovaError> {
    pick_api_key(config_key, std::env::var(API_KEY_ENV).ok())
}

fn pick_api_key(config_key: Option<&str>, env_key: Option<String>) -> Result<String, SovaError> {
    if let Some(key) = config_key.filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }
    env_key.filter(|k| !k.is_empty()).ok_or_else(|| {
        SovaError::Config(format!(
            "API key not found. Set provider.api_key in config or {API_KEY_ENV} environment variable."
        ))
    })
}
