//! Microphone capture with cpal
//!
//! Builds an input stream in the device's native sample format and feeds the
//! bounded frame queue. Each callback buffer becomes one [`Frame`] of shape
//! samples x channels; frames are dropped (never blocked on) when the queue
//! is not drained promptly.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat as CpalSampleFormat, Stream, StreamConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{AudioError, Result};
use crate::frame::Frame;
use crate::queue::{frame_queue, FrameReceiver, FrameSender, DEFAULT_QUEUE_CAPACITY};

/// Capture configuration.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Device index (None = default device)
    pub device_index: Option<usize>,
    /// Frame queue capacity
    pub queue_capacity: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device_index: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Audio device information.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub index: usize,
    pub name: String,
    pub is_default: bool,
    pub max_input_channels: u16,
    pub default_sample_rate: u32,
}

/// Microphone capture handle.
///
/// Holds the cpal stream for the duration of a recording; the matching
/// [`FrameReceiver`] is returned by [`MicCapture::start`]. Stopping (or
/// dropping) the handle tears down the stream and closes the queue, which
/// ends the consumer's drain.
pub struct MicCapture {
    stream: Option<Stream>,
    // dropped on stop so the receiver's drain sees a closed queue
    sender: Option<FrameSender>,
    is_recording: Arc<AtomicBool>,
    sample_rate: u32,
    channels: u16,
}

impl MicCapture {
    /// List all available input devices.
    pub fn list_devices() -> Result<Vec<DeviceInfo>> {
        let host = cpal::default_host();
        let mut devices = Vec::new();

        let default_input = host.default_input_device();
        let default_name = default_input.as_ref().and_then(|d| d.name().ok());

        for (index, device) in host
            .input_devices()
            .map_err(|e| AudioError::device(format!("Failed to enumerate devices: {e}")))?
            .enumerate()
        {
            let name = device
                .name()
                .unwrap_or_else(|_| format!("Unknown Device {index}"));

            let (max_input_channels, default_sample_rate) =
                match device.default_input_config() {
                    Ok(config) => (config.channels(), config.sample_rate().0),
                    Err(_) => (0, 0),
                };

            devices.push(DeviceInfo {
                index,
                is_default: default_name.as_deref() == Some(name.as_str()),
                name,
                max_input_channels,
                default_sample_rate,
            });
        }

        Ok(devices)
    }

    /// Start capturing from the configured device.
    ///
    /// Returns the capture handle and the receiving half of the frame queue.
    pub fn start(config: CaptureConfig) -> Result<(Self, FrameReceiver)> {
        let host = cpal::default_host();

        let device = if let Some(index) = config.device_index {
            let mut devices = host
                .input_devices()
                .map_err(|e| AudioError::device(format!("Failed to enumerate devices: {e}")))?;
            devices
                .nth(index)
                .ok_or_else(|| AudioError::device(format!("Device index {index} not found")))?
        } else {
            host.default_input_device()
                .ok_or_else(|| AudioError::device("No default input device found"))?
        };

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        let supported_config = device
            .default_input_config()
            .map_err(|e| AudioError::device(format!("Failed to get device config: {e}")))?;

        let sample_rate = supported_config.sample_rate().0;
        let channels = supported_config.channels();
        let sample_format = supported_config.sample_format();

        info!(
            device = %device_name,
            sample_rate,
            channels,
            format = ?sample_format,
            "starting audio capture"
        );

        let stream_config = StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let (sender, receiver) = frame_queue(config.queue_capacity);
        let is_recording = Arc::new(AtomicBool::new(true));

        let stream = match sample_format {
            CpalSampleFormat::F32 => Self::build_stream(
                &device,
                &stream_config,
                sender.clone(),
                is_recording.clone(),
                channels,
                Frame::from_interleaved_f32,
            )?,
            CpalSampleFormat::I16 => Self::build_stream(
                &device,
                &stream_config,
                sender.clone(),
                is_recording.clone(),
                channels,
                Frame::from_interleaved_i16,
            )?,
            other => {
                return Err(AudioError::device(format!(
                    "Unsupported device sample format: {other:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|e| AudioError::stream(format!("Failed to start stream: {e}")))?;

        Ok((
            Self {
                stream: Some(stream),
                sender: Some(sender),
                is_recording,
                sample_rate,
                channels,
            },
            receiver,
        ))
    }

    fn build_stream<T>(
        device: &Device,
        stream_config: &StreamConfig,
        sender: FrameSender,
        is_recording: Arc<AtomicBool>,
        channels: u16,
        make_frame: fn(&[T], u16) -> Result<Frame>,
    ) -> Result<Stream>
    where
        T: cpal::SizedSample + Send + 'static,
    {
        device
            .build_input_stream(
                stream_config,
                move |data: &[T], _: &cpal::InputCallbackInfo| {
                    if !is_recording.load(Ordering::Relaxed) {
                        return;
                    }
                    // runs on the audio thread: drop malformed buffers, never block
                    if let Ok(frame) = make_frame(data, channels) {
                        sender.push(frame);
                    }
                },
                |err| {
                    warn!("audio stream error: {err}");
                },
                None,
            )
            .map_err(|e| AudioError::stream(format!("Failed to build stream: {e}")))
    }

    /// Stop capturing and close the frame queue.
    pub fn stop(&mut self) {
        if !self.is_recording.swap(false, Ordering::Relaxed) {
            return;
        }

        if let Some(stream) = self.stream.take() {
            drop(stream);
        }

        if let Some(sender) = self.sender.take() {
            let dropped = sender.dropped();
            if dropped > 0 {
                warn!(dropped, "frames dropped during recording");
            }
        }
        info!("audio capture stopped");
    }

    /// Device sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Device channel count.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Check if currently recording.
    pub fn is_active(&self) -> bool {
        self.is_recording.load(Ordering::Relaxed)
    }
}

impl Drop for MicCapture {
    fn drop(&mut self) {
        self.stop();
    }
}
