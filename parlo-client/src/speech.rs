//! Speech-synthesis collaborator
//!
//! Sends reply text plus a voice identifier and streams the returned audio
//! bytes into the transient MP3 file, overwriting the previous turn's.

use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::ApiConfig;

/// The speech-synthesis collaborator seam.
#[async_trait]
pub trait SpeechSynthesis: Send + Sync {
    /// Synthesize `text` into an audio file at `out_path`.
    async fn synthesize(&self, text: &str, out_path: &Path) -> Result<()>;
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

/// `POST /v1/audio/speech` implementation.
pub struct HttpSpeechClient {
    http: reqwest::Client,
    config: ApiConfig,
    model: String,
    voice: String,
}

impl HttpSpeechClient {
    pub fn new(config: ApiConfig, model: String, voice: String) -> Result<Self> {
        Ok(Self {
            http: config.build_http_client()?,
            config,
            model,
            voice,
        })
    }
}

#[async_trait]
impl SpeechSynthesis for HttpSpeechClient {
    async fn synthesize(&self, text: &str, out_path: &Path) -> Result<()> {
        debug!(
            model = %self.model,
            voice = %self.voice,
            chars = text.len(),
            "requesting speech synthesis"
        );

        let mut response = self
            .http
            .post(self.config.endpoint("/v1/audio/speech"))
            .bearer_auth(&self.config.api_key)
            .json(&SpeechRequest {
                model: &self.model,
                input: text,
                voice: &self.voice,
                response_format: "mp3",
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        let mut file = tokio::fs::File::create(out_path).await?;
        let mut written = 0usize;
        while let Some(chunk) = response.chunk().await? {
            written += chunk.len();
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        debug!(path = %out_path.display(), bytes = written, "wrote synthesized reply");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = SpeechRequest {
            model: "tts-1",
            input: "Guten Tag!",
            voice: "alloy",
            response_format: "mp3",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "tts-1");
        assert_eq!(json["input"], "Guten Tag!");
        assert_eq!(json["voice"], "alloy");
        assert_eq!(json["response_format"], "mp3");
    }
}
