//! Envelope shaping
//!
//! Two flavours are used by the arrangements:
//! - [`Envelope`] is evaluated per sample inside a voice's window.
//! - [`ramp`], [`decay`] and [`scale`] shape a whole slice in place, for
//!   effects whose envelope is defined over explicit sample counts.

use std::f64::consts::TAU;

use super::timeline::linspace;

/// Per-voice gain curve
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Envelope {
    /// Constant unit gain
    #[default]
    Flat,
    /// `exp(-rate * (t - start))`, measured from the voice's window start
    Decay { rate: f64 },
    /// Slow sinusoidal gain `0.5 + 0.5 * sin(2π * rate_hz * t)` on buffer
    /// time, heard as a filter sweep across successive notes
    Sweep { rate_hz: f64 },
}

impl Envelope {
    /// Gain at buffer time `t` for a voice starting at `start`
    pub fn gain(self, t: f64, start: f64) -> f64 {
        match self {
            Envelope::Flat => 1.0,
            Envelope::Decay { rate } => (-rate * (t - start)).exp(),
            Envelope::Sweep { rate_hz } => 0.5 + 0.5 * (TAU * rate_hz * t).sin(),
        }
    }
}

/// Multiply `samples` by a straight line from `from` to `to`
///
/// Both endpoints are hit exactly: the first sample is scaled by `from` and
/// the last by `to`.
pub fn ramp(samples: &mut [f64], from: f64, to: f64) {
    let curve = linspace(from, to, samples.len());
    for (sample, gain) in samples.iter_mut().zip(curve) {
        *sample *= gain;
    }
}

/// Multiply `samples` by `exp(-k * (t - origin) / span)` at their sample times
///
/// `k` is the number of time constants that fit in `span` seconds.
pub fn decay(samples: &mut [f64], times: &[f64], k: f64, origin: f64, span: f64) {
    for (sample, &t) in samples.iter_mut().zip(times) {
        *sample *= (-k * (t - origin) / span).exp();
    }
}

/// Multiply every sample by `gain`
pub fn scale(samples: &mut [f64], gain: f64) {
    for sample in samples.iter_mut() {
        *sample *= gain;
    }
}
