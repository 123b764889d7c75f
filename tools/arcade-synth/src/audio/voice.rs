//! Windowed voices
//!
//! A voice is one note, drum hit or burst: a source placed on `[start, end)`
//! of the shared time axis, scaled by a gain and an envelope, and summed into
//! a layer. Samples outside the window are left untouched.

use rand::Rng;

use super::envelope::Envelope;
use super::oscillators::{Noise, Waveform};
use super::timeline::TimeAxis;
use crate::Result;

/// Pitch of a tonal voice
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frequency {
    /// Constant pitch in Hz
    Fixed(f64),
    /// Linear glide across the samples of the window, endpoints included
    Glide { from: f64, to: f64 },
    /// Linear in buffer time: `from` at 0, `to` at the end of the axis
    Sweep { from: f64, to: f64 },
}

impl Frequency {
    /// Pitch for sample `index` of a window holding `len` samples, at buffer
    /// time `t` on an axis lasting `duration`
    fn at(self, index: usize, len: usize, t: f64, duration: f64) -> f64 {
        match self {
            Frequency::Fixed(hz) => hz,
            Frequency::Sweep { from, to } => from + (to - from) * (t / duration),
            Frequency::Glide { from, to } => {
                if len < 2 {
                    from
                } else if index + 1 == len {
                    to
                } else {
                    from + index as f64 * ((to - from) / (len - 1) as f64)
                }
            }
        }
    }
}

/// Where a tonal voice's oscillator time starts counting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Oscillator runs on buffer time, so repeated notes stay phase-locked
    Buffer,
    /// Oscillator restarts at the window start
    Window,
}

/// What a voice plays
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source {
    Tone {
        waveform: Waveform,
        frequency: Frequency,
    },
    Noise(Noise),
}

/// A source placed on a window of the time axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub source: Source,
    pub start: f64,
    pub end: f64,
    pub gain: f64,
    pub envelope: Envelope,
    pub phase: Phase,
}

impl Voice {
    /// Constant-pitch tone on buffer time
    pub fn tone(waveform: Waveform, frequency: f64, start: f64, end: f64) -> Self {
        Self::new(
            Source::Tone {
                waveform,
                frequency: Frequency::Fixed(frequency),
            },
            start,
            end,
            Phase::Buffer,
        )
    }

    /// Gliding tone, restarted at the window start
    pub fn glide(waveform: Waveform, from: f64, to: f64, start: f64, end: f64) -> Self {
        Self::new(
            Source::Tone {
                waveform,
                frequency: Frequency::Glide { from, to },
            },
            start,
            end,
            Phase::Window,
        )
    }

    /// Tone sweeping across the whole axis on buffer time
    pub fn sweep(waveform: Waveform, from: f64, to: f64) -> Self {
        Self::new(
            Source::Tone {
                waveform,
                frequency: Frequency::Sweep { from, to },
            },
            0.0,
            f64::INFINITY,
            Phase::Buffer,
        )
    }

    /// Noise burst
    pub fn noise(noise: Noise, start: f64, end: f64) -> Self {
        Self::new(Source::Noise(noise), start, end, Phase::Buffer)
    }

    fn new(source: Source, start: f64, end: f64, phase: Phase) -> Self {
        Self {
            source,
            start,
            end,
            gain: 1.0,
            envelope: Envelope::Flat,
            phase,
        }
    }

    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    /// Add this voice into `layer`, which must span the whole axis
    pub fn render<R: Rng + ?Sized>(
        &self,
        axis: &TimeAxis,
        layer: &mut [f64],
        rng: &mut R,
    ) -> Result<()> {
        debug_assert_eq!(layer.len(), axis.len(), "layer must span the time axis");

        let range = axis.window(self.start, self.end);
        let times = &axis.times()[range.clone()];
        let target = &mut layer[range];
        let len = times.len();
        let duration = axis.duration();

        match self.source {
            Source::Tone {
                waveform,
                frequency,
            } => {
                for (index, (out, &t)) in target.iter_mut().zip(times).enumerate() {
                    let clock = match self.phase {
                        Phase::Buffer => t,
                        Phase::Window => t - self.start,
                    };
                    let value = waveform.eval(frequency.at(index, len, t, duration), clock);
                    *out += value * self.gain * self.envelope.gain(t, self.start);
                }
            }
            Source::Noise(noise) => {
                let burst = noise.samples(len, rng)?;
                for ((out, &t), value) in target.iter_mut().zip(times).zip(burst) {
                    *out += value * self.gain * self.envelope.gain(t, self.start);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn axis() -> TimeAxis {
        TimeAxis::new(1000, 1.0).unwrap()
    }

    #[test]
    fn test_render_only_touches_window() {
        let axis = axis();
        let mut layer = axis.zeros();
        let mut rng = Pcg64::seed_from_u64(0);
        Voice::tone(Waveform::Square, 50.0, 0.25, 0.5)
            .render(&axis, &mut layer, &mut rng)
            .unwrap();

        let window = axis.window(0.25, 0.5);
        for (i, &s) in layer.iter().enumerate() {
            if !window.contains(&i) {
                assert_eq!(s, 0.0, "sample {i} outside the window changed");
            }
        }
        assert!(layer[window].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_render_adds_to_existing_layer() {
        let axis = axis();
        let mut layer = vec![0.25; axis.len()];
        let mut rng = Pcg64::seed_from_u64(0);
        let voice = Voice::tone(Waveform::Sine, 5.0, 0.0, 1.0).with_gain(0.5);
        voice.render(&axis, &mut layer, &mut rng).unwrap();

        let t = axis.times()[10];
        let expected = 0.25 + Waveform::Sine.eval(5.0, t) * 0.5;
        assert!((layer[10] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_glide_restarts_phase_and_hits_endpoints() {
        let axis = axis();
        let mut layer = axis.zeros();
        let mut rng = Pcg64::seed_from_u64(0);
        Voice::glide(Waveform::Sine, 150.0, 50.0, 0.5, 0.6)
            .render(&axis, &mut layer, &mut rng)
            .unwrap();

        // Window phase: the oscillator clock is t - start, at the opening pitch
        let i = axis.window(0.5, 0.6).start;
        let t = axis.times()[i];
        let expected = Waveform::Sine.eval(150.0, t - 0.5);
        assert!((layer[i] - expected).abs() < 1e-12);

        let glide = Frequency::Glide { from: 150.0, to: 50.0 };
        assert_eq!(glide.at(0, 100, 0.5, 1.0), 150.0);
        assert_eq!(glide.at(99, 100, 0.6, 1.0), 50.0);
        assert_eq!(glide.at(0, 1, 0.5, 1.0), 150.0);
    }

    #[test]
    fn test_sweep_follows_buffer_time() {
        let axis = TimeAxis::new(44100, 0.15).unwrap();
        let mut layer = axis.zeros();
        let mut rng = Pcg64::seed_from_u64(0);
        Voice::sweep(Waveform::Sine, 800.0, 200.0)
            .render(&axis, &mut layer, &mut rng)
            .unwrap();

        // Bit-exact against f0 - (f0 - f1) * (t / d), then sin(2π f t)
        for (i, &t) in axis.times().iter().enumerate() {
            let hz = 800.0 - (800.0 - 200.0) * (t / 0.15);
            assert_eq!(layer[i], (std::f64::consts::TAU * hz * t).sin(), "sample {i}");
        }

        let sweep = Frequency::Sweep { from: 300.0, to: 1200.0 };
        assert_eq!(sweep.at(0, 0, 0.0, 0.1), 300.0);
        assert_eq!(sweep.at(0, 0, 0.1, 0.1), 1200.0);
    }

    #[test]
    fn test_decay_envelope_measured_from_start() {
        let axis = axis();
        let mut layer = axis.zeros();
        let mut rng = Pcg64::seed_from_u64(0);
        Voice::tone(Waveform::Saw, 1.0, 0.5, 1.0)
            .with_envelope(Envelope::Decay { rate: 3.0 })
            .render(&axis, &mut layer, &mut rng)
            .unwrap();

        let i = axis.window(0.7, 1.0).start;
        let t = axis.times()[i];
        let expected = Waveform::Saw.eval(1.0, t) * (-3.0 * (t - 0.5)).exp();
        assert!((layer[i] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_noise_voice_is_bounded_by_gain() {
        let axis = axis();
        let mut layer = axis.zeros();
        let mut rng = Pcg64::seed_from_u64(9);
        Voice::noise(Noise::Uniform, 0.0, 0.02)
            .with_gain(0.15)
            .render(&axis, &mut layer, &mut rng)
            .unwrap();

        let window = axis.window(0.0, 0.02);
        assert!(layer[window.clone()].iter().all(|s| s.abs() <= 0.15));
        assert!(layer[window.end..].iter().all(|&s| s == 0.0));
    }
}
