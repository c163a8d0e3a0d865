//! Parlo Audio
//!
//! Microphone frame capture and the raw-audio-to-WAV normalization pipeline:
//! heterogeneous capture frames are concatenated, axis-reconciled, mapped to
//! a canonical floating-point range, and written as a fixed-format 16-bit
//! PCM file for the transcription service.
//!
//! ## Architecture
//!
//! ```text
//! Audio Device (cpal)
//!   │
//!   ├─> FrameSender ─ bounded queue, drop on overflow
//!   │        │
//!   │        └─> FrameReceiver::drain (timeout per frame)
//!   │                 │
//!   │                 └─> normalize_frames ─> resample ─> write_wav
//!   │
//!   └─> MicCapture (start/stop handle)
//! ```

pub mod capture;
pub mod error;
pub mod frame;
pub mod normalize;
pub mod queue;
pub mod resampler;
pub mod wav;

pub use capture::{CaptureConfig, DeviceInfo, MicCapture};
pub use error::{AudioError, Result};
pub use frame::{Frame, SampleData, SampleFormat};
pub use normalize::normalize_frames;
pub use queue::{frame_queue, FrameReceiver, FrameSender, DEFAULT_QUEUE_CAPACITY};
pub use resampler::resample_recording;
pub use wav::{read_wav, write_wav, ENCODE_BITS_PER_SAMPLE, ENCODE_SAMPLE_RATE};
