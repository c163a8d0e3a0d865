//! Chat-completion collaborator
//!
//! Sends the ordered role-tagged history and returns the single reply
//! message. No streaming, no function calling.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use parlo_session::ChatMessage;

use crate::error::{ClientError, Result};
use crate::ApiConfig;

/// The chat collaborator seam.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Complete the conversation, returning the assistant's reply text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// `POST /v1/chat/completions` implementation.
pub struct HttpChatClient {
    http: reqwest::Client,
    config: ApiConfig,
    model: String,
}

impl HttpChatClient {
    pub fn new(config: ApiConfig, model: String) -> Result<Self> {
        Ok(Self {
            http: config.build_http_client()?,
            config,
            model,
        })
    }
}

#[async_trait]
impl ChatCompletion for HttpChatClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        debug!(model = %self.model, turns = messages.len(), "requesting chat completion");

        let response = self
            .http
            .post(self.config.endpoint("/v1/chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ClientError::MissingContent)
    }
}
