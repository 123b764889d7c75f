//! Audio oscillators and noise sources
//!
//! Oscillators are evaluated at an explicit time rather than by stepping a
//! phase accumulator, so a voice placed anywhere on the time axis lines up
//! with every other layer of the track.

use std::f64::consts::TAU;

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{Result, SynthError};

/// Waveform types for tonal voices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    /// Pure sine wave
    Sine,
    /// Half hard square, half sine: a softened retro square
    Square,
    /// Rising ramp from -1 to 1 every period
    Saw,
    /// Sine plus its octave at half amplitude, used for melodic stabs
    OctaveStab,
}

impl Waveform {
    /// Value of the waveform at time `t` seconds for `frequency` Hz
    pub fn eval(self, frequency: f64, t: f64) -> f64 {
        match self {
            Waveform::Sine => (TAU * frequency * t).sin(),
            Waveform::Square => {
                let s = (TAU * frequency * t).sin();
                sign(s) * 0.5 + s * 0.5
            }
            Waveform::Saw => (t * frequency).rem_euclid(1.0) * 2.0 - 1.0,
            Waveform::OctaveStab => {
                (TAU * frequency * t).sin() + 0.5 * (TAU * frequency * 2.0 * t).sin()
            }
        }
    }
}

/// Sign with `sign(0) == 0`, unlike `f64::signum`
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Random noise distributions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Noise {
    /// Uniform in `[-1, 1)`
    Uniform,
    /// Gaussian around zero
    Normal { std_dev: f64 },
}

impl Noise {
    /// Draw `len` independent samples
    pub fn samples<R: Rng + ?Sized>(self, len: usize, rng: &mut R) -> Result<Vec<f64>> {
        match self {
            Noise::Uniform => Ok((0..len).map(|_| rng.random_range(-1.0..1.0)).collect()),
            Noise::Normal { std_dev } => {
                let normal = Normal::new(0.0, std_dev)
                    .map_err(|e| SynthError::InvalidNoise(e.to_string()))?;
                Ok((0..len).map(|_| normal.sample(rng)).collect())
            }
        }
    }
}
