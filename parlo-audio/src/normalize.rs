//! Raw-frame normalization
//!
//! Turns the heterogeneous frames collected between a start and stop signal
//! into one canonical samples x channels f32 array ready for WAV encoding:
//!
//! 1. per-frame axis reconciliation (see [`Frame::reconcile_axes`])
//! 2. concatenation along the sample axis
//! 3. element-type normalization into roughly [-1.0, 1.0]

use ndarray::{concatenate, Array2, Axis};
use tracing::debug;

use crate::error::{AudioError, Result};
use crate::frame::{Frame, SampleData, SampleFormat};

/// Scale factor for 16-bit samples.
const I16_SCALE: f32 = 32768.0;

/// Scale factor for 32-bit samples.
const I32_SCALE: f32 = 2147483648.0;

/// Normalize a recording into a canonical samples x channels f32 array.
///
/// Returns [`AudioError::EmptyCapture`] for an empty sequence; the caller is
/// expected to surface that as a warning rather than a failure. Frames that
/// disagree on element type or channel count after reconciliation are a
/// [`AudioError::ShapeMismatch`].
///
/// Integer samples are divided by the maximum representable magnitude of
/// their type, so the result lies in [-1.0, 1.0]. f32 passes through
/// unchanged and f64 is cast without scaling; neither is range-checked here,
/// clamping happens at encode time.
pub fn normalize_frames(frames: Vec<Frame>) -> Result<Array2<f32>> {
    if frames.is_empty() {
        return Err(AudioError::EmptyCapture);
    }

    let format = frames[0].format();
    let mut reconciled = Vec::with_capacity(frames.len());
    let mut channels = None;

    for frame in frames {
        if frame.format() != format {
            return Err(AudioError::shape(format!(
                "mixed sample formats in one recording: {} then {}",
                format,
                frame.format()
            )));
        }

        let data = frame.reconcile_axes();
        let (_, cols) = data.shape();
        match channels {
            None => channels = Some(cols),
            Some(expected) if expected != cols => {
                return Err(AudioError::shape(format!(
                    "inconsistent channel count: expected {expected}, got {cols}"
                )));
            }
            Some(_) => {}
        }
        reconciled.push(data);
    }

    let samples = match format {
        SampleFormat::I16 => {
            let concatenated = concat_frames(&reconciled, |d| match d {
                SampleData::I16(a) => a,
                _ => unreachable!("format checked above"),
            })?;
            concatenated.mapv(|s| s as f32 / I16_SCALE)
        }
        SampleFormat::I32 => {
            let concatenated = concat_frames(&reconciled, |d| match d {
                SampleData::I32(a) => a,
                _ => unreachable!("format checked above"),
            })?;
            concatenated.mapv(|s| s as f32 / I32_SCALE)
        }
        SampleFormat::F32 => concat_frames(&reconciled, |d| match d {
            SampleData::F32(a) => a,
            _ => unreachable!("format checked above"),
        })?,
        SampleFormat::F64 => {
            let concatenated = concat_frames(&reconciled, |d| match d {
                SampleData::F64(a) => a,
                _ => unreachable!("format checked above"),
            })?;
            concatenated.mapv(|s| s as f32)
        }
    };

    debug!(
        samples = samples.nrows(),
        channels = samples.ncols(),
        format = %format,
        "normalized recording"
    );

    Ok(samples)
}

fn concat_frames<T: Clone>(
    frames: &[SampleData],
    view: fn(&SampleData) -> &Array2<T>,
) -> Result<Array2<T>> {
    let views: Vec<_> = frames.iter().map(|d| view(d).view()).collect();
    concatenate(Axis(0), &views).map_err(|e| AudioError::shape(e.to_string()))
}
