//! Mixing, loudness and PCM conversion
//!
//! Provides the final stages shared by every track: layer mixing,
//! peak normalization, fade-out and 16-bit quantization.

use super::envelope::ramp;
use super::timeline::TimeAxis;

/// Added to the peak before dividing, so silence normalizes to silence
pub const NORMALIZE_EPSILON: f64 = 0.001;

/// How float samples are mapped onto 16-bit integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quantization {
    /// Truncate toward zero. Matches the assets already shipped with the game.
    #[default]
    Truncate,
    /// Round to nearest, for slightly lower quantization error
    Round,
}

/// Convert samples to PCM i16, clipping to -1.0..=1.0 first
///
/// Full scale is ±32767, so -1.0 maps to -32767 rather than -32768.
pub fn to_pcm_i16(samples: &[f64], quantization: Quantization) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| {
            let scaled = s.clamp(-1.0, 1.0) * i16::MAX as f64;
            match quantization {
                Quantization::Truncate => scaled as i16,
                Quantization::Round => scaled.round() as i16,
            }
        })
        .collect()
}

/// Mix equal-length layers, each scaled by its weight
///
/// Layers are summed in order. The result is NOT normalized - use
/// [`normalize_peak`] if needed.
pub fn mix(layers: &[(&[f64], f64)]) -> Vec<f64> {
    let len = layers.iter().map(|(s, _)| s.len()).max().unwrap_or(0);
    let mut result = vec![0.0; len];

    for (samples, weight) in layers {
        for (out, &sample) in result.iter_mut().zip(samples.iter()) {
            *out += sample * weight;
        }
    }

    result
}

/// Scale so the peak lands just under `target`
///
/// Computes `x / (max|x| + ε) * target`. An all-zero buffer stays all-zero.
pub fn normalize_peak(samples: &mut [f64], target: f64) {
    let peak = peak(samples);
    for sample in samples.iter_mut() {
        *sample = *sample / (peak + NORMALIZE_EPSILON) * target;
    }
    tracing::trace!(peak, target, "normalized");
}

/// Largest absolute sample value, zero for an empty slice
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0f64, |acc, s| acc.max(s.abs()))
}

/// Ramp linearly to silence over the last `fade` seconds of the axis
///
/// Every sample whose time is at or after `duration - fade` is scaled by a
/// line from 1 down to 0; the final sample ends at exactly zero.
pub fn fade_out(samples: &mut [f64], axis: &TimeAxis, fade: f64) {
    let range = axis.from(axis.duration() - fade);
    if let Some(tail) = samples.get_mut(range) {
        ramp(tail, 1.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pcm_i16() {
        let samples = vec![0.0, 0.5, 1.0, -1.0, -0.5];
        let pcm = to_pcm_i16(&samples, Quantization::Truncate);

        assert_eq!(pcm.len(), 5);
        assert_eq!(pcm[0], 0);
        assert_eq!(pcm[1], 16383); // 16383.5 truncated
        assert_eq!(pcm[2], i16::MAX);
        assert_eq!(pcm[3], -i16::MAX); // Note: -32767, not -32768
        assert_eq!(pcm[4], -16383);
    }

    #[test]
    fn test_to_pcm_i16_round() {
        let pcm = to_pcm_i16(&[0.5, -0.5, 0.99999], Quantization::Round);
        assert_eq!(pcm, vec![16384, -16384, 32767]);
    }

    #[test]
    fn test_to_pcm_i16_clamp() {
        let samples = vec![2.0, -2.0, f64::INFINITY];
        let pcm = to_pcm_i16(&samples, Quantization::Truncate);

        assert_eq!(pcm, vec![i16::MAX, -i16::MAX, i16::MAX]);
    }

    #[test]
    fn test_mix() {
        let signal1 = vec![1.0, 1.0, 1.0];
        let signal2 = vec![0.5, 0.5];

        let mixed = mix(&[(&signal1, 0.5), (&signal2, 0.5)]);

        assert_eq!(mixed.len(), 3);
        assert!((mixed[0] - 0.75).abs() < 1e-12); // 0.5 + 0.25
        assert!((mixed[1] - 0.75).abs() < 1e-12);
        assert!((mixed[2] - 0.5).abs() < 1e-12); // Only signal1
    }

    #[test]
    fn test_mix_empty() {
        let mixed = mix(&[]);
        assert!(mixed.is_empty());
    }

    #[test]
    fn test_normalize_peak() {
        let mut samples = vec![0.5, -0.25, 0.25];
        normalize_peak(&mut samples, 0.85);

        let expected = 0.5 / (0.5 + NORMALIZE_EPSILON) * 0.85;
        assert!((samples[0] - expected).abs() < 1e-12);
        assert!((samples[1] + expected / 2.0).abs() < 1e-12);
        assert!(peak(&samples) < 0.85);
    }

    #[test]
    fn test_normalize_silent() {
        let mut samples = vec![0.0; 16];
        normalize_peak(&mut samples, 0.7);
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_peak() {
        assert_eq!(peak(&[]), 0.0);
        assert_eq!(peak(&[0.1, -0.9, 0.4]), 0.9);
    }

    #[test]
    fn test_fade_out() {
        let axis = TimeAxis::new(11, 1.0).unwrap(); // t = 0.0, 0.1, ..., 1.0
        let mut samples = vec![1.0; axis.len()];
        fade_out(&mut samples, &axis, 0.25);

        // t >= 0.75 covers 0.8, 0.9, 1.0
        assert!(samples[..8].iter().all(|&s| s == 1.0));
        assert_eq!(&samples[8..], &[1.0, 0.5, 0.0]);
    }
}
