//! Transcription collaborator
//!
//! Uploads the normalized WAV recording as multipart form data and returns
//! the recognized text.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::ApiConfig;

/// The transcription collaborator seam.
#[async_trait]
pub trait Transcription: Send + Sync {
    /// Transcribe a PCM WAV file into plain text.
    async fn transcribe(&self, wav_path: &Path) -> Result<String>;
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// `POST /v1/audio/transcriptions` implementation.
pub struct HttpTranscriptionClient {
    http: reqwest::Client,
    config: ApiConfig,
    model: String,
}

impl HttpTranscriptionClient {
    pub fn new(config: ApiConfig, model: String) -> Result<Self> {
        Ok(Self {
            http: config.build_http_client()?,
            config,
            model,
        })
    }
}

#[async_trait]
impl Transcription for HttpTranscriptionClient {
    async fn transcribe(&self, wav_path: &Path) -> Result<String> {
        let wav_bytes = tokio::fs::read(wav_path).await?;
        debug!(
            model = %self.model,
            bytes = wav_bytes.len(),
            "uploading recording for transcription"
        );

        let file_part = Part::bytes(wav_bytes)
            .file_name("speech.wav")
            .mime_str("audio/wav")
            .map_err(ClientError::Transport)?;
        let form = Form::new()
            .text("model", self.model.clone())
            .part("file", file_part);

        let response = self
            .http
            .post(self.config.endpoint("/v1/audio/transcriptions"))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        let body: TranscriptionResponse = response.json().await?;
        Ok(body.text)
    }
}
