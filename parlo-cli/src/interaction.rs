//! Record → normalize → transcribe → chat → synthesize → log pipeline
//!
//! The one interaction handler replacing the original's five near-duplicate
//! pages. It owns the session and the three collaborator seams; each entry
//! point runs one turn to completion. A failure aborts the turn and leaves
//! prior log entries intact.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use parlo_audio::{normalize_frames, resample_recording, write_wav, AudioError, Frame};
use parlo_client::{ChatCompletion, SpeechSynthesis, Transcription};
use parlo_session::{InputMode, Session};

/// Result of one interaction.
#[derive(Debug)]
pub enum TurnOutcome {
    /// A completed turn; `spoken` is the synthesized reply, present in
    /// voice mode.
    Reply {
        user: String,
        assistant: String,
        spoken: Option<PathBuf>,
    },
    /// The recording contained no frames; nothing was logged.
    NoAudio,
}

/// The consolidated interaction handler.
pub struct InteractionHandler {
    session: Session,
    chat: Arc<dyn ChatCompletion>,
    transcriber: Arc<dyn Transcription>,
    speech: Arc<dyn SpeechSynthesis>,
    wav_path: PathBuf,
    mp3_path: PathBuf,
    encode_sample_rate: u32,
}

impl InteractionHandler {
    pub fn new(
        session: Session,
        chat: Arc<dyn ChatCompletion>,
        transcriber: Arc<dyn Transcription>,
        speech: Arc<dyn SpeechSynthesis>,
        wav_path: PathBuf,
        mp3_path: PathBuf,
        encode_sample_rate: u32,
    ) -> Self {
        Self {
            session,
            chat,
            transcriber,
            speech,
            wav_path,
            mp3_path,
            encode_sample_rate,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Run one typed (or transcribed) turn.
    pub async fn handle_text(&mut self, text: &str) -> Result<TurnOutcome> {
        self.session.push_user(text);

        let reply = self
            .chat
            .complete(self.session.history())
            .await
            .context("Chat completion failed")?;

        self.session.push_assistant(reply.clone());
        self.session.record(text, reply.clone());

        let spoken = if self.session.options().input_mode == InputMode::Voice {
            self.speech
                .synthesize(&reply, &self.mp3_path)
                .await
                .context("Speech synthesis failed")?;
            Some(self.mp3_path.clone())
        } else {
            None
        };

        info!(chars = reply.len(), "turn completed");
        Ok(TurnOutcome::Reply {
            user: text.to_string(),
            assistant: reply,
            spoken,
        })
    }

    /// Run one spoken turn from captured frames.
    ///
    /// `capture_rate` is the device rate the frames were recorded at; the
    /// recording is resampled to the fixed encode rate when they differ.
    pub async fn handle_recording(
        &mut self,
        frames: Vec<Frame>,
        capture_rate: u32,
    ) -> Result<TurnOutcome> {
        let samples = match normalize_frames(frames) {
            Ok(samples) => samples,
            Err(AudioError::EmptyCapture) => {
                warn!("no audio captured, aborting interaction");
                return Ok(TurnOutcome::NoAudio);
            }
            Err(e) => return Err(e).context("Failed to normalize recording"),
        };

        let samples = if capture_rate != self.encode_sample_rate {
            resample_recording(&samples, capture_rate, self.encode_sample_rate)
                .context("Failed to resample recording")?
        } else {
            samples
        };

        write_wav(&samples, self.encode_sample_rate, &self.wav_path)
            .context("Failed to encode recording")?;

        let transcript = self
            .transcriber
            .transcribe(&self.wav_path)
            .await
            .context("Transcription failed")?;
        info!(chars = transcript.len(), "recording transcribed");

        self.handle_text(&transcript).await
    }
}
