//! Shared time axis and window selection
//!
//! Every voice of a track is evaluated on the same axis so layers can be
//! summed sample by sample.

use std::ops::Range;

use crate::{Result, SynthError};

/// Evenly spaced sample times from `0` to `duration`, both ends included
#[derive(Debug, Clone)]
pub struct TimeAxis {
    sample_rate: u32,
    duration: f64,
    times: Vec<f64>,
}

impl TimeAxis {
    /// Build the axis for `round(sample_rate * duration)` samples
    pub fn new(sample_rate: u32, duration: f64) -> Result<Self> {
        if sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate(sample_rate));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(SynthError::InvalidDuration(duration));
        }

        let len = (sample_rate as f64 * duration).round() as usize;
        if len == 0 {
            return Err(SynthError::InvalidDuration(duration));
        }

        Ok(Self {
            sample_rate,
            duration,
            times: linspace(0.0, duration, len),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sample times in seconds
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Silent layer with one slot per sample
    pub fn zeros(&self) -> Vec<f64> {
        vec![0.0; self.times.len()]
    }

    /// Indices whose time lies in `[start, end)`
    ///
    /// The axis is monotonic, so this is two binary searches rather than a
    /// scan. An inverted window selects nothing.
    pub fn window(&self, start: f64, end: f64) -> Range<usize> {
        let lo = self.times.partition_point(|&t| t < start);
        let hi = self.times.partition_point(|&t| t < end);
        lo..hi.max(lo)
    }

    /// Indices whose time is at or after `start`
    pub fn from(&self, start: f64) -> Range<usize> {
        self.times.partition_point(|&t| t < start)..self.times.len()
    }
}

/// `num` evenly spaced values over `[start, stop]`
///
/// The last value is exactly `stop`. A single value is `start`.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    if num < 2 {
        return vec![start; num];
    }

    let step = (stop - start) / (num - 1) as f64;
    let mut values: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
    if let Some(last) = values.last_mut() {
        *last = stop;
    }
    values
}

/// Whole samples covered by `seconds`, truncated
pub fn samples_for(seconds: f64, sample_rate: u32) -> usize {
    (seconds * sample_rate as f64) as usize
}
