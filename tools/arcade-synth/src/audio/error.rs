//! Error type shared by synthesis and export

use std::path::PathBuf;

/// Errors raised while composing or writing audio
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// Duration must be finite and long enough to hold at least one sample
    #[error("invalid duration {0}s (must be finite and hold at least one sample)")]
    InvalidDuration(f64),

    /// Sample rate of zero
    #[error("invalid sample rate {0} (must be greater than zero)")]
    InvalidSampleRate(u32),

    /// A buffer was built without any channel
    #[error("sample buffer needs at least one channel")]
    NoChannels,

    /// Channels of one buffer must all have the same length
    #[error("channel {index} has {len} samples, expected {expected}")]
    ChannelMismatch {
        index: usize,
        len: usize,
        expected: usize,
    },

    /// Noise distribution rejected its parameters
    #[error("invalid noise parameters: {0}")]
    InvalidNoise(String),

    /// Payload or header field exceeds what a RIFF container can describe
    #[error("{0} does not fit in a RIFF/WAVE header")]
    TooLarge(String),

    /// Encoding into a caller-supplied writer failed
    #[error("failed to encode WAV data: {0}")]
    Encode(#[from] std::io::Error),

    /// Output file could not be created or written
    #[error("failed to write {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Track id not known to the composer
    #[error("unknown track '{0}'")]
    UnknownTrack(String),
}
