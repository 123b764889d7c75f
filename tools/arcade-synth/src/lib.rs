//! Procedural audio for the arcade shooter
//!
//! This library synthesizes the game's sound effects and music loops from
//! oscillators, envelopes and note patterns, and writes them as 16-bit PCM
//! WAV files.
//!
//! - [`audio`] holds the building blocks: time axis, oscillators, voices,
//!   envelopes, mixing and the WAV writer.
//! - [`tracks`] holds the hand-composed arrangements, one per [`TrackId`].
//!
//! # Example
//! ```no_run
//! use arcade_synth::{compose, write_wav, Quantization, TrackId};
//! use std::path::Path;
//!
//! // Compose the boss fight loop (30s, stereo)
//! let music = compose(TrackId::BossMusic)?;
//!
//! // Write it next to the other game assets
//! write_wav(&music, Path::new("src/assets/music_boss.wav"), Quantization::Truncate)?;
//! # Ok::<(), arcade_synth::SynthError>(())
//! ```

pub mod audio;
pub mod tracks;

pub use audio::{
    encode_wav, stage_wav, write_wav, Quantization, SampleBuffer, StagedWav, SynthError,
    SAMPLE_RATE,
};
pub use tracks::{compose, compose_with_rng, TrackDescriptor, TrackId, TRACKS};

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, SynthError>;
