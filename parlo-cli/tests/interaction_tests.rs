//! End-to-end interaction tests against stubbed collaborators

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ndarray::Array2;

use parlo_audio::{read_wav, Frame, SampleData, ENCODE_SAMPLE_RATE};
use parlo_client::{ChatCompletion, ClientError, SpeechSynthesis, Transcription};
use parlo_cli::{InteractionHandler, TurnOutcome};
use parlo_session::{ChatMessage, InputMode, Language, Role, Session, SessionOptions, TaskContext};

struct StubChat {
    reply: String,
    seen: Mutex<Vec<ChatMessage>>,
}

impl StubChat {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ChatCompletion for StubChat {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ClientError> {
        *self.seen.lock().unwrap() = messages.to_vec();
        Ok(self.reply.clone())
    }
}

struct StubTranscriber {
    text: String,
}

#[async_trait]
impl Transcription for StubTranscriber {
    async fn transcribe(&self, wav_path: &Path) -> Result<String, ClientError> {
        assert!(wav_path.exists(), "recording must be written before upload");
        Ok(self.text.clone())
    }
}

struct StubSpeech;

#[async_trait]
impl SpeechSynthesis for StubSpeech {
    async fn synthesize(&self, _text: &str, out_path: &Path) -> Result<(), ClientError> {
        tokio::fs::write(out_path, b"mp3").await?;
        Ok(())
    }
}

struct Fixture {
    handler: InteractionHandler,
    chat: Arc<StubChat>,
    wav_path: PathBuf,
    mp3_path: PathBuf,
    _dir: tempfile::TempDir,
}

fn fixture(options: SessionOptions, reply: &str, transcript: &str) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let wav_path = dir.path().join("input.wav");
    let mp3_path = dir.path().join("reply.mp3");

    let chat = StubChat::new(reply);
    let handler = InteractionHandler::new(
        Session::new(options),
        chat.clone(),
        Arc::new(StubTranscriber {
            text: transcript.to_string(),
        }),
        Arc::new(StubSpeech),
        wav_path.clone(),
        mp3_path.clone(),
        ENCODE_SAMPLE_RATE,
    );

    Fixture {
        handler,
        chat,
        wav_path,
        mp3_path,
        _dir: dir,
    }
}

fn text_options() -> SessionOptions {
    SessionOptions {
        language: Language::German,
        task: TaskContext::Conversation,
        feedback_mode: false,
        input_mode: InputMode::Text,
    }
}

fn voice_options() -> SessionOptions {
    SessionOptions {
        input_mode: InputMode::Voice,
        ..text_options()
    }
}

#[tokio::test]
async fn text_turn_logs_mocked_reply_verbatim() {
    let mut fx = fixture(text_options(), "Hallo! Wie kann ich helfen?", "");

    let outcome = fx.handler.handle_text("Hallo Bot").await.unwrap();

    match outcome {
        TurnOutcome::Reply {
            user,
            assistant,
            spoken,
        } => {
            assert_eq!(user, "Hallo Bot");
            assert_eq!(assistant, "Hallo! Wie kann ich helfen?");
            assert!(spoken.is_none(), "text mode must not synthesize");
        }
        other => panic!("expected Reply, got {other:?}"),
    }

    let entries = fx.handler.session().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].user, "Hallo Bot");
    assert_eq!(entries[0].assistant, "Hallo! Wie kann ich helfen?");
    assert_eq!(entries[0].language, "German");
}

#[tokio::test]
async fn chat_sees_seeded_system_prompt_then_user_text() {
    let mut fx = fixture(text_options(), "ok", "");
    fx.handler.handle_text("Guten Tag").await.unwrap();

    let seen = fx.chat.seen.lock().unwrap().clone();
    assert_eq!(seen[0].role, Role::System);
    assert!(seen[0].content.contains("German"));
    assert_eq!(seen.last().unwrap().role, Role::User);
    assert_eq!(seen.last().unwrap().content, "Guten Tag");
}

#[tokio::test]
async fn empty_recording_yields_no_audio_and_no_log_entry() {
    let mut fx = fixture(voice_options(), "unused", "unused");

    let outcome = fx
        .handler
        .handle_recording(Vec::new(), ENCODE_SAMPLE_RATE)
        .await
        .unwrap();

    assert!(matches!(outcome, TurnOutcome::NoAudio));
    assert!(fx.handler.session().entries().is_empty());
    assert!(!fx.wav_path.exists(), "no file may be written");
}

#[tokio::test]
async fn voice_turn_writes_wav_transcribes_and_speaks() {
    let mut fx = fixture(
        voice_options(),
        "Bonjour! Très bien.",
        "bonjour je voudrais un café",
    );

    // three frames of 2 channels x 100 samples, constant 0.5
    let frames: Vec<Frame> = (0..3)
        .map(|_| Frame::new(SampleData::F32(Array2::from_elem((2, 100), 0.5))))
        .collect();

    let outcome = fx
        .handler
        .handle_recording(frames, ENCODE_SAMPLE_RATE)
        .await
        .unwrap();

    match outcome {
        TurnOutcome::Reply {
            user,
            assistant,
            spoken,
        } => {
            assert_eq!(user, "bonjour je voudrais un café");
            assert_eq!(assistant, "Bonjour! Très bien.");
            assert_eq!(spoken.as_deref(), Some(fx.mp3_path.as_path()));
        }
        other => panic!("expected Reply, got {other:?}"),
    }

    // the normalized recording: (300, 2) constant 0.5 within quantization
    let (decoded, rate) = read_wav(&fx.wav_path).unwrap();
    assert_eq!(rate, ENCODE_SAMPLE_RATE);
    assert_eq!(decoded.dim(), (300, 2));
    for &s in decoded.iter() {
        assert!((s - 0.5).abs() <= 1.0 / 32768.0);
    }

    assert!(fx.mp3_path.exists(), "spoken reply must be written");

    let entries = fx.handler.session().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].user, "bonjour je voudrais un café");
}

#[tokio::test]
async fn device_rate_recording_is_resampled_to_encode_rate() {
    let mut fx = fixture(voice_options(), "ok", "hola");

    // one second of silence at a 16 kHz device rate
    let frames = vec![Frame::new(SampleData::F32(Array2::zeros((16_000, 1))))];

    fx.handler.handle_recording(frames, 16_000).await.unwrap();

    let (decoded, rate) = read_wav(&fx.wav_path).unwrap();
    assert_eq!(rate, ENCODE_SAMPLE_RATE);
    // about three times as many frames after 16k -> 48k
    assert!(
        decoded.nrows() > 40_000 && decoded.nrows() < 55_000,
        "unexpected resampled length {}",
        decoded.nrows()
    );
}

#[tokio::test]
async fn failed_turn_leaves_prior_entries_intact() {
    struct FailingChat;

    #[async_trait]
    impl ChatCompletion for FailingChat {
        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, ClientError> {
            Err(ClientError::Api {
                status: 429,
                body: "rate limited".to_string(),
            })
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let mut handler = InteractionHandler::new(
        Session::new(text_options()),
        Arc::new(FailingChat),
        Arc::new(StubTranscriber {
            text: String::new(),
        }),
        Arc::new(StubSpeech),
        dir.path().join("input.wav"),
        dir.path().join("reply.mp3"),
        ENCODE_SAMPLE_RATE,
    );

    handler.session_mut().record("earlier", "entry");
    assert!(handler.handle_text("hello").await.is_err());
    assert_eq!(handler.session().entries().len(), 1);
}
