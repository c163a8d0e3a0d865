//! Parlo - practice a language from the terminal
//!
//! Thin shell over the interaction handler: typed lines run a chat turn,
//! `:record`/`:stop` drive the microphone, `:export` writes the session log
//! as CSV. Rendering is plain stdout; everything else lives in the library
//! crates.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use parlo_audio::{CaptureConfig, FrameReceiver, MicCapture};
use parlo_client::{
    ApiConfig, HttpChatClient, HttpSpeechClient, HttpTranscriptionClient,
};
use parlo_cli::{AppConfig, InteractionHandler, TurnOutcome};
use parlo_session::{InputMode, Language, Session, SessionOptions, TaskContext};

#[derive(Parser, Debug)]
#[command(name = "parlo", about = "Voice-enabled language practice", version)]
struct Cli {
    /// Path to the config file (default: platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Practice language: german, french, spanish, english
    #[arg(long, default_value = "german")]
    language: String,

    /// Task context: vocabulary, grammar, conversation
    #[arg(long, default_value = "conversation")]
    task: String,

    /// Ask for grammar/vocabulary feedback in every reply
    #[arg(long)]
    feedback: bool,

    /// Voice mode: record spoken input and speak the replies
    #[arg(long)]
    voice: bool,

    /// List audio input devices and exit
    #[arg(long)]
    list_devices: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    if cli.list_devices {
        for device in MicCapture::list_devices().context("Failed to enumerate devices")? {
            let default_marker = if device.is_default { " [DEFAULT]" } else { "" };
            println!(
                "{:3}: {}{} ({} ch, {} Hz)",
                device.index,
                device.name,
                default_marker,
                device.max_input_channels,
                device.default_sample_rate
            );
        }
        return Ok(());
    }

    info!("🗣️ Starting Parlo v{}", env!("CARGO_PKG_VERSION"));

    let config = match cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("Failed to load configuration")?;
    info!("📋 Configuration loaded from {}", config.config_path.display());

    let options = SessionOptions {
        language: cli.language.parse::<Language>()?,
        task: cli.task.parse::<TaskContext>()?,
        feedback_mode: cli.feedback,
        input_mode: if cli.voice {
            InputMode::Voice
        } else {
            InputMode::Text
        },
    };

    let mut handler = build_handler(&config, options).context("Failed to initialize handler")?;

    println!("Parlo — {} / {} practice", options.language, options.task);
    println!("{}", parlo_session::context_notice(options.task));
    println!("Type a message, or :help for commands.");

    let mut recording: Option<(MicCapture, FrameReceiver)> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        match line.split_once(' ').map_or((line.as_str(), ""), |(a, b)| (a, b)) {
            (":quit", _) | (":q", _) => break,
            (":help", _) => print_help(),
            (":record", _) => {
                if recording.is_some() {
                    warn!("already recording, use :stop first");
                    continue;
                }
                let capture_config = CaptureConfig {
                    device_index: config.audio_device_index,
                    queue_capacity: config.queue_capacity,
                };
                match MicCapture::start(capture_config) {
                    Ok(started) => {
                        println!("● recording… type :stop to finish");
                        recording = Some(started);
                    }
                    Err(e) => error!("failed to start recording: {e}"),
                }
            }
            (":stop", _) => {
                let Some((mut capture, mut receiver)) = recording.take() else {
                    warn!("not recording");
                    continue;
                };
                capture.stop();
                let frames = receiver
                    .drain(Duration::from_millis(config.drain_timeout_ms))
                    .await;
                let outcome = handler
                    .handle_recording(frames, capture.sample_rate())
                    .await;
                report(outcome);
            }
            (":task", rest) => match rest.parse::<TaskContext>() {
                Ok(task) => {
                    handler.session_mut().set_task(task);
                    println!("{}", parlo_session::context_notice(task));
                }
                Err(e) => error!("{e}"),
            },
            (":export", rest) => {
                let path = if rest.is_empty() {
                    parlo_paths::get_export_dir()
                        .context("Failed to resolve export directory")?
                        .join("session.csv")
                } else {
                    PathBuf::from(rest)
                };
                match handler.session().export_csv(&path) {
                    Ok(()) => println!("exported {} entries to {}",
                        handler.session().entries().len(), path.display()),
                    Err(e) => error!("export failed: {e}"),
                }
            }
            (":clear", _) => {
                handler.session_mut().clear();
                println!("session cleared");
            }
            _ => {
                let outcome = handler.handle_text(&line).await;
                report(outcome);
            }
        }
    }

    info!("👋 Parlo stopped");
    Ok(())
}

/// Wire the HTTP collaborators and the session into one handler.
fn build_handler(config: &AppConfig, options: SessionOptions) -> Result<InteractionHandler> {
    let api_config = ApiConfig::new(config.api_base_url.clone(), config.api_key()?)
        .with_timeout(Duration::from_secs(config.request_timeout_secs));

    let chat = HttpChatClient::new(api_config.clone(), config.chat_model.clone())?;
    let transcriber =
        HttpTranscriptionClient::new(api_config.clone(), config.transcription_model.clone())?;
    let speech = HttpSpeechClient::new(
        api_config,
        config.speech_model.clone(),
        config.voice.clone(),
    )?;

    Ok(InteractionHandler::new(
        Session::new(options),
        Arc::new(chat),
        Arc::new(transcriber),
        Arc::new(speech),
        parlo_paths::get_input_wav_path()?,
        parlo_paths::get_reply_mp3_path()?,
        config.encode_sample_rate,
    ))
}

fn report(outcome: Result<TurnOutcome>) {
    match outcome {
        Ok(TurnOutcome::Reply {
            assistant, spoken, ..
        }) => {
            println!("{assistant}");
            if let Some(path) = spoken {
                println!("🔊 reply audio: {}", path.display());
            }
        }
        Ok(TurnOutcome::NoAudio) => {
            println!("⚠️ no audio captured — please record again");
        }
        Err(e) => error!("interaction failed: {e:#}"),
    }
}

fn print_help() {
    println!(":record        start recording spoken input");
    println!(":stop          stop recording and run the turn");
    println!(":task <name>   switch context (vocabulary, grammar, conversation)");
    println!(":export [path] write the session log as CSV");
    println!(":clear         drop the log and restart the conversation");
    println!(":quit          exit");
}
