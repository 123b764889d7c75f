//! Sound effect arrangements
//!
//! Effects span the whole axis and shape it with explicit sample-count
//! envelopes. They are not normalized.

use rand::RngCore;

use crate::audio::{decay, ramp, samples_for, scale, Noise, TimeAxis, Voice, Waveform};
use crate::Result;

/// Player shot: rising 300 -> 1200 Hz "pew"
pub(crate) fn shooting(axis: &TimeAxis, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
    let mut sound = axis.zeros();
    Voice::sweep(Waveform::Sine, 300.0, 1200.0).render(axis, &mut sound, rng)?;

    // 5ms linear attack, then a steep exponential decay
    let attack_time = 0.005;
    let attack = samples_for(attack_time, axis.sample_rate()).min(sound.len());
    ramp(&mut sound[..attack], 0.0, 1.0);
    decay(
        &mut sound[attack..],
        &axis.times()[attack..],
        15.0,
        attack_time,
        axis.duration(),
    );

    scale(&mut sound, 0.6);
    Ok(sound)
}

/// Player hit: falling 600 -> 150 Hz impact with a noisy thud
pub(crate) fn damage(axis: &TimeAxis, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
    let mut sound = axis.zeros();
    Voice::sweep(Waveform::Sine, 600.0, 150.0)
        .with_gain(0.7)
        .render(axis, &mut sound, rng)?;
    Voice::noise(Noise::Normal { std_dev: 0.3 }, 0.0, f64::INFINITY)
        .with_gain(0.3)
        .render(axis, &mut sound, rng)?;

    // 10ms attack, flat sustain, 50ms release
    let attack = samples_for(0.01, axis.sample_rate()).min(sound.len());
    let release = samples_for(axis.duration() - 0.05, axis.sample_rate()).clamp(attack, sound.len());
    ramp(&mut sound[..attack], 0.0, 1.0);
    ramp(&mut sound[release..], 1.0, 0.0);

    scale(&mut sound, 0.8);
    Ok(sound)
}

/// Enemy shot: lower, falling 800 -> 200 Hz "pew"
pub(crate) fn enemy_bullet(axis: &TimeAxis, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
    let mut sound = axis.zeros();
    Voice::sweep(Waveform::Sine, 800.0, 200.0).render(axis, &mut sound, rng)?;

    decay(&mut sound, axis.times(), 8.0, 0.0, axis.duration());
    scale(&mut sound, 0.5);
    Ok(sound)
}

/// Game over: three descending tones (A4, G4, F4), the last fading out
pub(crate) fn game_over(axis: &TimeAxis, _rng: &mut dyn RngCore) -> Result<Vec<f64>> {
    let segment = axis.len() / 3;
    let tones = [440.0, 392.0, 349.0];

    let mut sound: Vec<f64> = axis
        .times()
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let hz = tones[(i / segment.max(1)).min(2)];
            Waveform::Sine.eval(hz, t)
        })
        .collect();

    let (_, rest) = sound.split_at_mut(segment);
    let (second, third) = rest.split_at_mut(segment.min(rest.len()));
    scale(second, 0.8);
    ramp(third, 0.8, 0.0);

    scale(&mut sound, 0.3);
    Ok(sound)
}
