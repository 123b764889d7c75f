//! Music loop arrangements
//!
//! Each function lays its layers on the shared axis and returns the raw mix.
//! Normalization, fade-out and stereo promotion are applied by the composer
//! from the track descriptor.

use rand::RngCore;

use super::notes::{NoteTable, A_MINOR, C_MAJOR, D_MINOR, E_MINOR_BLUES};
use super::pattern::{BeatGrid, Pattern};
use crate::audio::{mix, Envelope, Noise, TimeAxis, Voice, Waveform};
use crate::Result;

/// Frequency of the note `pattern` plays in `slot`, falling back to `root`
fn pitch(table: &NoteTable, pattern: Pattern, slot: usize, root: &str) -> f64 {
    table.frequency_or(pattern.note_at(slot).unwrap_or(root), root)
}

// ============================================================================
// Action loop (E minor, 150 BPM)
// ============================================================================

/// Pulsing E2 with a G2 pickup every half bar
const ACTION_BASS: Pattern = Pattern::Held(&[("E2", 6), ("G2", 1), ("E2", 1)]);

const ACTION_ARP: Pattern = Pattern::Even(&["E3", "G3", "B3", "E4", "B3", "G3", "E3", "B2"]);

/// Each stab is held for a bar of quarter notes
const ACTION_STABS: Pattern = Pattern::Held(&[("E4", 4), ("G4", 4), ("A4", 4), ("B4", 4)]);

/// High-energy loop for the main game
pub(crate) fn action(axis: &TimeAxis, beat: f64, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
    let notes = &E_MINOR_BLUES;
    let sixteenth = beat / 4.0;
    let sixteenths = BeatGrid::fitted(sixteenth, axis.duration());
    let beats = BeatGrid::fitted(beat, axis.duration());

    // Driving bass: staccato square sixteenths
    let mut bass = axis.zeros();
    for (i, start) in sixteenths.slots() {
        let hz = pitch(notes, ACTION_BASS, i, "E2");
        Voice::tone(Waveform::Square, hz, start, start + sixteenth * 0.8)
            .with_gain(0.6)
            .render(axis, &mut bass, rng)?;
    }

    // Saw arpeggio under a slow filter sweep
    let mut arp = axis.zeros();
    for (i, start) in sixteenths.slots() {
        let hz = pitch(notes, ACTION_ARP, i, "E3");
        Voice::tone(Waveform::Saw, hz, start, start + sixteenth * 0.9)
            .with_gain(0.3)
            .with_envelope(Envelope::Sweep { rate_hz: 0.1 })
            .render(axis, &mut arp, rng)?;
    }

    // Stabs on the second half of every 16-beat phrase
    let mut melody = axis.zeros();
    for (i, start) in beats.slots().filter(|(i, _)| i % 16 >= 8) {
        let hz = pitch(notes, ACTION_STABS, i, "E4");
        Voice::tone(Waveform::OctaveStab, hz, start, start + beat * 0.5)
            .with_gain(0.4)
            .render(axis, &mut melody, rng)?;
    }

    // Noise hi-hats on the off eighths
    let mut hats = axis.zeros();
    for (_, start) in sixteenths.slots().filter(|(i, _)| i % 2 == 1) {
        Voice::noise(Noise::Uniform, start, start + sixteenth * 0.2)
            .with_gain(0.15)
            .render(axis, &mut hats, rng)?;
    }

    // Kick: 100ms pitch drop on every beat
    let mut kick = axis.zeros();
    for (_, start) in beats.slots() {
        Voice::glide(Waveform::Sine, 150.0, 50.0, start, start + 0.1)
            .with_gain(0.8)
            .render(axis, &mut kick, rng)?;
    }

    Ok(mix(&[
        (&bass, 1.0),
        (&arp, 1.0),
        (&melody, 1.0),
        (&hats, 1.0),
        (&kick, 1.0),
    ]))
}

// ============================================================================
// Level loop (A minor, 130 BPM)
// ============================================================================

const LEVEL_BASS: Pattern = Pattern::Even(&["A2", "A2", "E3", "E3", "D3", "D3", "E3", "E3"]);

const LEVEL_MELODY: Pattern = Pattern::Even(&[
    "A4", "E4", "A4", "B4", "C5", "B4", "A4", "E4", // Rising phrase
    "G4", "D4", "G4", "A4", "G4", "F4", "E4", "D4", // Answer phrase
    "A4", "A4", "C5", "C5", "D5", "E5", "D5", "C5", // Climax
    "B4", "A4", "G4", "E4", "A4", "A4", "A4", "A4", // Resolution
]);

/// Earlier, lighter loop for the first levels
pub(crate) fn level(axis: &TimeAxis, beat: f64, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
    let notes = &A_MINOR;
    let beats = BeatGrid::covering(beat, axis.duration());

    let mut bass = axis.zeros();
    for (i, start) in beats.slots() {
        let hz = pitch(notes, LEVEL_BASS, i, "A2");
        Voice::tone(Waveform::Sine, hz, start, start + beat * 0.4).render(axis, &mut bass, rng)?;
    }

    let mut melody = axis.zeros();
    for (i, start) in beats.slots() {
        let hz = pitch(notes, LEVEL_MELODY, i, "A4");
        Voice::tone(Waveform::Sine, hz, start, start + beat * 0.7)
            .with_envelope(Envelope::Decay { rate: 2.0 })
            .render(axis, &mut melody, rng)?;
    }

    // 20ms low thumps on every eighth
    let mut percussion = axis.zeros();
    for (_, start) in BeatGrid::fitted(beat / 2.0, axis.duration()).slots() {
        Voice::tone(Waveform::Sine, 80.0, start, start + 0.02)
            .with_gain(0.3)
            .render(axis, &mut percussion, rng)?;
    }

    Ok(mix(&[(&bass, 0.5), (&melody, 0.6), (&percussion, 0.2)]))
}

// ============================================================================
// Boss loop (D minor, 140 BPM)
// ============================================================================

const BOSS_BASS: Pattern = Pattern::Even(&["D3"]);

const BOSS_MELODY: Pattern = Pattern::Even(&[
    "D4", "D4", "E4", "F4", "G4", "F4", "E4", "D4", //
    "A4", "A4", "Bb4", "C5", "Bb4", "A4", "G4", "F4",
]);

/// Intense loop for boss fights
pub(crate) fn boss(axis: &TimeAxis, beat: f64, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
    let notes = &D_MINOR;

    // Pedal D3 on every eighth, held for a sixteenth
    let mut bass = axis.zeros();
    for (i, start) in BeatGrid::fitted(beat / 2.0, axis.duration()).slots() {
        let hz = pitch(notes, BOSS_BASS, i, "D3");
        Voice::tone(Waveform::Sine, hz, start, start + beat / 4.0).render(axis, &mut bass, rng)?;
    }

    let mut melody = axis.zeros();
    for (i, start) in BeatGrid::covering(beat, axis.duration()).slots() {
        let hz = pitch(notes, BOSS_MELODY, i, "D4");
        Voice::tone(Waveform::Sine, hz, start, start + beat * 0.8)
            .with_envelope(Envelope::Decay { rate: 3.0 })
            .render(axis, &mut melody, rng)?;
    }

    Ok(mix(&[(&bass, 0.4), (&melody, 0.6)]))
}

// ============================================================================
// Victory fanfare (C major, 120 BPM)
// ============================================================================

const VICTORY_MELODY: Pattern = Pattern::Even(&[
    "C4", "E4", "G4", "C5", // Rising arpeggio
    "G4", "E4", "C5", "C5", // Emphatic
    "D5", "D5", "C5", "B4", // Descending
    "C5", "C5", "C5", "C5", // Resolution
]);

/// Thirds under the melody
const VICTORY_HARMONY: Pattern = Pattern::Even(&[
    "E4", "C4", "E4", "G4", //
    "E4", "C4", "A4", "A4", //
    "B4", "B4", "A4", "G4", //
    "E4", "E4", "E4", "E4",
]);

/// Played an octave below the table
const VICTORY_BASS: Pattern = Pattern::Even(&["C4", "C4", "G4", "G4", "A4", "A4", "C4", "C4"]);

/// Short triumphant fanfare after a won wave
pub(crate) fn victory(axis: &TimeAxis, beat: f64, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
    let notes = &C_MAJOR;
    let beats = BeatGrid::covering(beat, axis.duration());

    let mut melody = axis.zeros();
    let mut harmony = axis.zeros();
    for (i, start) in beats.slots() {
        let end = start + beat * 0.9;
        let decay = Envelope::Decay { rate: 2.0 };

        Voice::tone(Waveform::Sine, pitch(notes, VICTORY_MELODY, i, "C4"), start, end)
            .with_envelope(decay)
            .render(axis, &mut melody, rng)?;
        Voice::tone(Waveform::Sine, pitch(notes, VICTORY_HARMONY, i, "C4"), start, end)
            .with_envelope(decay)
            .render(axis, &mut harmony, rng)?;
    }

    let mut bass = axis.zeros();
    for (i, start) in beats.slots() {
        let hz = pitch(notes, VICTORY_BASS, i, "C4") / 2.0;
        Voice::tone(Waveform::Sine, hz, start, start + beat / 2.0).render(axis, &mut bass, rng)?;
    }

    Ok(mix(&[(&melody, 0.6), (&harmony, 0.4), (&bass, 0.3)]))
}
