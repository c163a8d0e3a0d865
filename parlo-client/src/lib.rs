//! Parlo Client
//!
//! The three external collaborators every interaction delegates to, each
//! behind a trait so the interaction handler can be driven by stubs in
//! tests: chat completion, audio transcription, and speech synthesis.
//!
//! One HTTP implementation each, against an OpenAI-style REST surface. A
//! single failed request aborts the current turn; there is no retry or
//! backoff policy.

pub mod chat;
pub mod error;
pub mod speech;
pub mod transcribe;

use std::time::Duration;

pub use chat::{ChatCompletion, HttpChatClient};
pub use error::{ClientError, Result};
pub use speech::{HttpSpeechClient, SpeechSynthesis};
pub use transcribe::{HttpTranscriptionClient, Transcription};

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings shared by the three HTTP collaborators.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://api.openai.com`
    pub base_url: String,
    /// Bearer token
    pub api_key: String,
    /// Per-request timeout; a slow collaborator fails the turn instead of
    /// hanging it
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new<S: Into<String>>(base_url: S, api_key: S) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Build the shared HTTP client with the configured timeout.
    pub fn build_http_client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder().timeout(self.timeout).build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        let config = ApiConfig::new("https://api.openai.com/", "sk-test");
        assert_eq!(
            config.endpoint("/v1/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_timeout_override() {
        let config =
            ApiConfig::new("https://api.openai.com", "sk-test").with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
