//! Procedural audio synthesis
//!
//! This module provides the primitives every track is built from:
//! a shared time axis, oscillators, windowed voices, envelopes,
//! mixing/normalization and a 16-bit PCM WAV writer.
//!
//! # Example
//! ```
//! use arcade_synth::audio::*;
//! use rand::SeedableRng;
//!
//! // Half a second of axis at the game's sample rate
//! let axis = TimeAxis::new(SAMPLE_RATE, 0.5)?;
//! let mut layer = axis.zeros();
//!
//! // A decaying A4 note over the first 200ms
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! Voice::tone(Waveform::Sine, 440.0, 0.0, 0.2)
//!     .with_envelope(Envelope::Decay { rate: 2.0 })
//!     .render(&axis, &mut layer, &mut rng)?;
//!
//! normalize_peak(&mut layer, 0.8);
//! let buffer = SampleBuffer::mono(SAMPLE_RATE, layer)?.into_stereo();
//! assert_eq!(buffer.channel_count(), 2);
//! # Ok::<(), SynthError>(())
//! ```

mod envelope;
mod error;
mod export;
mod oscillators;
mod timeline;
mod voice;
pub mod wav;

/// Sample rate of every generated track (44.1kHz)
pub const SAMPLE_RATE: u32 = 44100;

// Oscillators
pub use oscillators::{Noise, Waveform};

// Envelopes
pub use envelope::{decay, ramp, scale, Envelope};

// Time axis and voices
pub use timeline::{linspace, samples_for, TimeAxis};
pub use voice::{Frequency, Phase, Source, Voice};

// Utilities and export
pub use export::{fade_out, mix, normalize_peak, peak, to_pcm_i16, Quantization, NORMALIZE_EPSILON};
pub use wav::{encode_wav, stage_wav, write_wav, PcmHeader, StagedWav};

pub use error::SynthError;

use crate::Result;

/// Audio sample buffer: one or more equal-length channels sharing a sample rate
///
/// Samples are nominally in -1.0 to 1.0; the writer clips anything outside.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f64>>,
}

impl SampleBuffer {
    /// Single-channel buffer
    pub fn mono(sample_rate: u32, samples: Vec<f64>) -> Result<Self> {
        Self::from_channels(sample_rate, vec![samples])
    }

    /// Buffer from parallel channels, which must all have the same length
    pub fn from_channels(sample_rate: u32, channels: Vec<Vec<f64>>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate(sample_rate));
        }
        let expected = channels.first().ok_or(SynthError::NoChannels)?.len();
        if let Some((index, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != expected)
        {
            return Err(SynthError::ChannelMismatch {
                index,
                len: channel.len(),
                expected,
            });
        }

        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// Promote a mono buffer to stereo by duplicating its channel
    ///
    /// Buffers that already have more than one channel are returned as-is.
    pub fn into_stereo(mut self) -> Self {
        if self.channels.len() == 1 {
            let copy = self.channels[0].clone();
            self.channels.push(copy);
        }
        self
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Check if buffer holds no frames
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    pub fn channel(&self, index: usize) -> Option<&[f64]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channels(&self) -> &[Vec<f64>] {
        &self.channels
    }

    /// Frame-major interleave: ch0[0], ch1[0], ch0[1], ch1[1], ...
    pub fn interleaved(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.frames() * self.channels.len());
        for frame in 0..self.frames() {
            for channel in &self.channels {
                out.push(channel[frame]);
            }
        }
        out
    }

    /// Largest absolute sample over all channels
    pub fn peak(&self) -> f64 {
        self.channels.iter().map(|c| peak(c)).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_buffer_mono() {
        let buf = SampleBuffer::mono(SAMPLE_RATE, vec![0.0, 0.5, 1.0, -1.0]).unwrap();
        assert_eq!(buf.sample_rate(), SAMPLE_RATE);
        assert_eq!(buf.channel_count(), 1);
        assert_eq!(buf.frames(), 4);
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_sample_buffer_duration() {
        let buf = SampleBuffer::mono(SAMPLE_RATE, vec![0.0; SAMPLE_RATE as usize]).unwrap();
        assert!((buf.duration() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_buffer_rejects_mismatched_channels() {
        let err = SampleBuffer::from_channels(SAMPLE_RATE, vec![vec![0.0; 4], vec![0.0; 3]])
            .unwrap_err();
        assert!(matches!(
            err,
            SynthError::ChannelMismatch {
                index: 1,
                len: 3,
                expected: 4
            }
        ));
    }

    #[test]
    fn test_sample_buffer_rejects_empty_layout() {
        assert!(matches!(
            SampleBuffer::from_channels(SAMPLE_RATE, vec![]),
            Err(SynthError::NoChannels)
        ));
        assert!(matches!(
            SampleBuffer::mono(0, vec![0.0]),
            Err(SynthError::InvalidSampleRate(0))
        ));
    }

    #[test]
    fn test_into_stereo_duplicates() {
        let buf = SampleBuffer::mono(SAMPLE_RATE, vec![0.1, 0.2, 0.3])
            .unwrap()
            .into_stereo();
        assert_eq!(buf.channel_count(), 2);
        assert_eq!(buf.channel(0), buf.channel(1));

        let again = buf.clone().into_stereo();
        assert_eq!(again, buf);
    }

    #[test]
    fn test_interleave_alternates_channels() {
        let buf =
            SampleBuffer::from_channels(SAMPLE_RATE, vec![vec![1.0, 2.0, 3.0], vec![-1.0, -2.0, -3.0]])
                .unwrap();
        let interleaved = buf.interleaved();
        assert_eq!(interleaved.len(), 2 * 3);
        assert_eq!(interleaved, vec![1.0, -1.0, 2.0, -2.0, 3.0, -3.0]);
    }

    #[test]
    fn test_peak_spans_channels() {
        let buf =
            SampleBuffer::from_channels(SAMPLE_RATE, vec![vec![0.1, -0.3], vec![0.7, 0.0]]).unwrap();
        assert_eq!(buf.peak(), 0.7);
    }
}
