//! Configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to configuration file
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Base URL of the hosted API
    pub api_base_url: String,

    /// Environment variable holding the API key (the key itself is never
    /// written to the config file)
    pub api_key_env: String,

    /// Chat-completion model
    pub chat_model: String,

    /// Transcription model
    pub transcription_model: String,

    /// Speech-synthesis model
    pub speech_model: String,

    /// Speech-synthesis voice identifier
    pub voice: String,

    /// Fixed WAV encode sample rate (Hz)
    pub encode_sample_rate: u32,

    /// Capture frame queue capacity
    pub queue_capacity: usize,

    /// Per-frame drain timeout in milliseconds
    pub drain_timeout_ms: u64,

    /// Per-request timeout for the hosted API, in seconds
    pub request_timeout_secs: u64,

    /// Audio device index (None = default device)
    pub audio_device_index: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_path: Self::default_config_path(),
            api_base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            transcription_model: "whisper-1".to_string(),
            speech_model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            encode_sample_rate: parlo_audio::ENCODE_SAMPLE_RATE,
            queue_capacity: parlo_audio::DEFAULT_QUEUE_CAPACITY,
            drain_timeout_ms: 250,
            request_timeout_secs: 60,
            audio_device_index: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_config_path())
    }

    /// Load configuration from an explicit path, or create default there
    pub fn load_from(config_path: PathBuf) -> Result<Self> {
        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;

            let mut config: AppConfig = toml::from_str(&contents)
                .context("Failed to parse config file")?;

            config.config_path = config_path;
            Ok(config)
        } else {
            let config = Self {
                config_path,
                ..Self::default()
            };
            config.save().context("Failed to save default config")?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(&self.config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Resolve the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env).with_context(|| {
            format!(
                "API key not found: set the {} environment variable",
                self.api_key_env
            )
        })
    }

    /// Get default config path
    fn default_config_path() -> PathBuf {
        parlo_paths::config_dir().join("config.toml")
    }
}
