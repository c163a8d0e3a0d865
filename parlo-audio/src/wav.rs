//! Fixed-format PCM encoding
//!
//! One 16-bit signed WAV file per invocation, overwriting any prior file at
//! the same path. The sample rate is fixed per configuration (48 kHz
//! default); values are clamped to [-1.0, 1.0] at encode time.

use std::path::Path;

use hound::{SampleFormat as WavSampleFormat, WavReader, WavSpec, WavWriter};
use ndarray::Array2;
use tracing::info;

use crate::error::{AudioError, Result};

/// Default encode sample rate in Hz.
pub const ENCODE_SAMPLE_RATE: u32 = 48_000;

/// Encode bit depth.
pub const ENCODE_BITS_PER_SAMPLE: u16 = 16;

/// Write a samples x channels array as a 16-bit PCM WAV file.
///
/// Rows are samples, columns are channels, so row-major iteration gives the
/// interleaved order hound expects.
pub fn write_wav<P: AsRef<Path>>(samples: &Array2<f32>, sample_rate: u32, path: P) -> Result<()> {
    if samples.ncols() == 0 || samples.ncols() > u16::MAX as usize {
        return Err(AudioError::shape(format!(
            "cannot encode {} channels",
            samples.ncols()
        )));
    }

    let spec = WavSpec {
        channels: samples.ncols() as u16,
        sample_rate,
        bits_per_sample: ENCODE_BITS_PER_SAMPLE,
        sample_format: WavSampleFormat::Int,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;
    for &sample in samples.iter() {
        // decoders divide by 32768; +1.0 saturates to i16::MAX
        let clamped = sample.clamp(-1.0, 1.0);
        let quantized = (clamped * 32768.0).round().clamp(-32768.0, 32767.0);
        writer.write_sample(quantized as i16)?;
    }
    writer.finalize()?;

    info!(
        path = %path.as_ref().display(),
        frames = samples.nrows(),
        channels = samples.ncols(),
        sample_rate,
        "wrote recording"
    );

    Ok(())
}

/// Read a 16-bit PCM WAV file back into a samples x channels array.
///
/// Counterpart of [`write_wav`], used to verify round-trips.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Array2<f32>, u32)> {
    let mut reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();

    if spec.bits_per_sample != 16 {
        return Err(AudioError::shape(format!(
            "unsupported bit depth: {}",
            spec.bits_per_sample
        )));
    }

    let interleaved = reader
        .samples::<i16>()
        .map(|s| s.map(|sample| sample as f32 / 32768.0))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let channels = spec.channels as usize;
    let rows = interleaved.len() / channels;
    let samples = Array2::from_shape_vec((rows, channels), interleaved)
        .map_err(|e| AudioError::shape(e.to_string()))?;

    Ok((samples, spec.sample_rate))
}
