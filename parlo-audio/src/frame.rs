//! Capture frames
//!
//! A [`Frame`] is one chunk of samples as delivered by the capture source: a
//! 2-D numeric array whose element type and axis order are whatever the
//! device handed us. Axis order is reconciled and the element type is
//! normalized in [`crate::normalize`].

use ndarray::Array2;

use crate::error::{AudioError, Result};

/// Element type of a frame's samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    I16,
    I32,
    F32,
    F64,
}

impl std::fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleFormat::I16 => write!(f, "i16"),
            SampleFormat::I32 => write!(f, "i32"),
            SampleFormat::F32 => write!(f, "f32"),
            SampleFormat::F64 => write!(f, "f64"),
        }
    }
}

/// Sample storage for one frame, tagged by element type.
#[derive(Debug, Clone)]
pub enum SampleData {
    I16(Array2<i16>),
    I32(Array2<i32>),
    F32(Array2<f32>),
    F64(Array2<f64>),
}

impl SampleData {
    pub fn format(&self) -> SampleFormat {
        match self {
            SampleData::I16(_) => SampleFormat::I16,
            SampleData::I32(_) => SampleFormat::I32,
            SampleData::F32(_) => SampleFormat::F32,
            SampleData::F64(_) => SampleFormat::F64,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        let dim = match self {
            SampleData::I16(a) => a.dim(),
            SampleData::I32(a) => a.dim(),
            SampleData::F32(a) => a.dim(),
            SampleData::F64(a) => a.dim(),
        };
        (dim.0, dim.1)
    }

    /// Transpose in place (logical axes only, no data movement).
    fn reversed_axes(self) -> Self {
        match self {
            SampleData::I16(a) => SampleData::I16(a.reversed_axes()),
            SampleData::I32(a) => SampleData::I32(a.reversed_axes()),
            SampleData::F32(a) => SampleData::F32(a.reversed_axes()),
            SampleData::F64(a) => SampleData::F64(a.reversed_axes()),
        }
    }
}

/// One capture unit from the audio source.
///
/// The source does not guarantee whether the first axis is channels or
/// samples; [`Frame::reconcile_axes`] applies the canonicalization heuristic.
#[derive(Debug, Clone)]
pub struct Frame {
    data: SampleData,
}

impl Frame {
    pub fn new(data: SampleData) -> Self {
        Self { data }
    }

    /// Build a frame from interleaved f32 device data.
    ///
    /// The resulting shape is samples x channels (already canonical).
    pub fn from_interleaved_f32(data: &[f32], channels: u16) -> Result<Self> {
        Self::from_interleaved(data, channels, SampleData::F32)
    }

    /// Build a frame from interleaved i16 device data.
    pub fn from_interleaved_i16(data: &[i16], channels: u16) -> Result<Self> {
        Self::from_interleaved(data, channels, SampleData::I16)
    }

    fn from_interleaved<T: Clone>(
        data: &[T],
        channels: u16,
        wrap: fn(Array2<T>) -> SampleData,
    ) -> Result<Self> {
        if channels == 0 {
            return Err(AudioError::invalid_config("Channel count cannot be zero"));
        }
        let channels = channels as usize;
        if !data.len().is_multiple_of(channels) {
            return Err(AudioError::shape(format!(
                "{} interleaved samples do not divide into {} channels",
                data.len(),
                channels
            )));
        }

        let rows = data.len() / channels;
        let array = Array2::from_shape_vec((rows, channels), data.to_vec())
            .map_err(|e| AudioError::shape(e.to_string()))?;
        Ok(Self { data: wrap(array) })
    }

    pub fn format(&self) -> SampleFormat {
        self.data.format()
    }

    /// Shape as delivered: (first axis, second axis).
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    /// Reconcile axis order into samples x channels.
    ///
    /// Heuristic: if the first dimension is strictly smaller than the second,
    /// the frame is assumed to be channels x samples and is transposed. This
    /// relies on channel count being less than sample count and misfires for
    /// very short recordings with many channels; a square frame passes
    /// through as delivered.
    pub fn reconcile_axes(self) -> SampleData {
        let (rows, cols) = self.data.shape();
        if rows < cols {
            self.data.reversed_axes()
        } else {
            self.data
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_interleaved_shape() {
        // 3 sample frames, 2 channels
        let data = [0.1f32, 0.2, 0.3, 0.4, 0.5, 0.6];
        let frame = Frame::from_interleaved_f32(&data, 2).unwrap();
        assert_eq!(frame.shape(), (3, 2));
        assert_eq!(frame.format(), SampleFormat::F32);
    }

    #[test]
    fn test_from_interleaved_rejects_ragged() {
        let data = [0.1f32, 0.2, 0.3];
        assert!(Frame::from_interleaved_f32(&data, 2).is_err());
        assert!(Frame::from_interleaved_f32(&data, 0).is_err());
    }

    #[test]
    fn test_reconcile_transposes_channel_major() {
        // 2 channels x 5 samples: first dim smaller, so transpose
        let array = Array2::from_shape_fn((2, 5), |(c, s)| (c * 10 + s) as f32);
        let reconciled = Frame::new(SampleData::F32(array)).reconcile_axes();
        assert_eq!(reconciled.shape(), (5, 2));
        if let SampleData::F32(a) = reconciled {
            assert_eq!(a[[3, 1]], 13.0);
        } else {
            panic!("format changed");
        }
    }

    #[test]
    fn test_reconcile_keeps_sample_major() {
        let array = Array2::<f32>::zeros((100, 2));
        let reconciled = Frame::new(SampleData::F32(array)).reconcile_axes();
        assert_eq!(reconciled.shape(), (100, 2));
    }

    #[test]
    fn test_reconcile_square_passes_through() {
        let array = Array2::<i16>::zeros((4, 4));
        let reconciled = Frame::new(SampleData::I16(array)).reconcile_axes();
        assert_eq!(reconciled.shape(), (4, 4));
    }
}
