//! Audio resampling with rubato
//!
//! Converts a finished recording from the capture device's native rate to
//! the fixed encode rate. Pass-through when the rates already match.

use ndarray::Array2;
use rubato::{
    Resampler as RubatoResampler, SincFixedIn, SincInterpolationParameters,
    SincInterpolationType, WindowFunction,
};

use crate::error::{AudioError, Result};

/// Frames fed to the resampler per chunk.
const CHUNK_FRAMES: usize = 1024;

/// Resample a samples x channels recording to `target_rate`.
///
/// Returns the input unchanged when `source_rate == target_rate`.
pub fn resample_recording(
    samples: &Array2<f32>,
    source_rate: u32,
    target_rate: u32,
) -> Result<Array2<f32>> {
    if source_rate == 0 || target_rate == 0 {
        return Err(AudioError::invalid_config("Sample rate cannot be zero"));
    }
    if source_rate == target_rate {
        return Ok(samples.clone());
    }
    if samples.ncols() == 0 {
        return Err(AudioError::invalid_config("Channel count cannot be zero"));
    }

    let channels = samples.ncols();

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(
        target_rate as f64 / source_rate as f64,
        2.0,
        params,
        CHUNK_FRAMES,
        channels,
    )
    .map_err(|e| AudioError::ResampleError(format!("Failed to create resampler: {e:?}")))?;

    // samples x channels -> planar Vec<Vec<f32>> (rubato's input layout)
    let planar: Vec<Vec<f32>> = (0..channels)
        .map(|c| samples.column(c).to_vec())
        .collect();
    let total_frames = samples.nrows();

    let mut output: Vec<Vec<f32>> = vec![Vec::new(); channels];
    let mut pos = 0;

    while pos + CHUNK_FRAMES <= total_frames {
        let chunk: Vec<&[f32]> = planar
            .iter()
            .map(|ch| &ch[pos..pos + CHUNK_FRAMES])
            .collect();
        let resampled = resampler
            .process(&chunk, None)
            .map_err(|e| AudioError::ResampleError(format!("Resampling failed: {e:?}")))?;
        append_planar(&mut output, resampled);
        pos += CHUNK_FRAMES;
    }

    if pos < total_frames {
        let tail: Vec<&[f32]> = planar.iter().map(|ch| &ch[pos..]).collect();
        let resampled = resampler
            .process_partial(Some(&tail), None)
            .map_err(|e| AudioError::ResampleError(format!("Resampling failed: {e:?}")))?;
        append_planar(&mut output, resampled);
    }

    // flush the sinc filter delay line
    let flushed = resampler
        .process_partial::<&[f32]>(None, None)
        .map_err(|e| AudioError::ResampleError(format!("Resampling failed: {e:?}")))?;
    append_planar(&mut output, flushed);

    let out_frames = output[0].len();
    let mut interleaved = Vec::with_capacity(out_frames * channels);
    for frame_idx in 0..out_frames {
        for channel_data in output.iter() {
            interleaved.push(channel_data[frame_idx]);
        }
    }

    Array2::from_shape_vec((out_frames, channels), interleaved)
        .map_err(|e| AudioError::ResampleError(e.to_string()))
}

fn append_planar(output: &mut [Vec<f32>], resampled: Vec<Vec<f32>>) {
    for (out, chunk) in output.iter_mut().zip(resampled) {
        out.extend(chunk);
    }
}
