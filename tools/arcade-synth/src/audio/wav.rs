//! RIFF/WAVE writer
//!
//! Writes the canonical 44-byte header followed by interleaved 16-bit PCM.
//! One `fmt ` chunk, one `data` chunk, no extensions.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::export::{to_pcm_i16, Quantization};
use super::SampleBuffer;
use crate::{Result, SynthError};

/// Size of the header in front of the sample payload
pub const HEADER_LEN: usize = 44;

/// Only 16-bit integer PCM is written
pub const BITS_PER_SAMPLE: u16 = 16;

const BYTES_PER_SAMPLE: u16 = BITS_PER_SAMPLE / 8;
const FMT_CHUNK_LEN: u32 = 16;
const FORMAT_PCM: u16 = 1;

/// Header fields of a PCM WAV file
///
/// Only built by [`PcmHeader::for_buffer`], which checks every derived
/// field fits its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmHeader {
    channels: u16,
    sample_rate: u32,
    data_len: u32,
}

impl PcmHeader {
    /// Describe `buffer`, checking every field fits its header slot
    pub fn for_buffer(buffer: &SampleBuffer) -> Result<Self> {
        let channels = u16::try_from(buffer.channel_count())
            .map_err(|_| SynthError::TooLarge(format!("{} channels", buffer.channel_count())))?;

        let data_len = (buffer.frames() as u64)
            .checked_mul(channels as u64 * BYTES_PER_SAMPLE as u64)
            .filter(|&len| len <= (u32::MAX - 36) as u64)
            .ok_or_else(|| {
                SynthError::TooLarge(format!(
                    "payload of {} frames x {} channels",
                    buffer.frames(),
                    channels
                ))
            })? as u32;

        let header = Self {
            channels,
            sample_rate: buffer.sample_rate(),
            data_len,
        };
        header.checked_byte_rate().ok_or_else(|| {
            SynthError::TooLarge(format!(
                "byte rate of {} Hz x {} channels",
                header.sample_rate, channels
            ))
        })?;

        Ok(header)
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Payload length in bytes
    pub fn data_len(&self) -> u32 {
        self.data_len
    }

    fn checked_byte_rate(&self) -> Option<u32> {
        self.sample_rate
            .checked_mul(self.channels as u32)?
            .checked_mul(BYTES_PER_SAMPLE as u32)
    }

    /// Bytes per second of audio
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.channels as u32 * BYTES_PER_SAMPLE as u32
    }

    /// Bytes per frame (one sample of every channel)
    pub fn block_align(&self) -> u16 {
        self.channels * BYTES_PER_SAMPLE
    }

    /// Value of the RIFF chunk size field: whole file minus 8
    pub fn riff_len(&self) -> u32 {
        36 + self.data_len
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];

        // RIFF header
        out[0..4].copy_from_slice(b"RIFF");
        out[4..8].copy_from_slice(&self.riff_len().to_le_bytes());
        out[8..12].copy_from_slice(b"WAVE");

        // fmt chunk
        out[12..16].copy_from_slice(b"fmt ");
        out[16..20].copy_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
        out[20..22].copy_from_slice(&FORMAT_PCM.to_le_bytes());
        out[22..24].copy_from_slice(&self.channels.to_le_bytes());
        out[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        out[28..32].copy_from_slice(&self.byte_rate().to_le_bytes());
        out[32..34].copy_from_slice(&self.block_align().to_le_bytes());
        out[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

        // data chunk
        out[36..40].copy_from_slice(b"data");
        out[40..44].copy_from_slice(&self.data_len.to_le_bytes());

        out
    }
}

/// Encode `buffer` as a complete WAV file into `w`
///
/// Channels are interleaved frame by frame, clipped to -1.0..=1.0 and
/// quantized with `quantization`.
pub fn encode_wav<W: Write>(
    w: &mut W,
    buffer: &SampleBuffer,
    quantization: Quantization,
) -> Result<()> {
    let header = PcmHeader::for_buffer(buffer)?;
    w.write_all(&header.to_bytes())?;

    let pcm = to_pcm_i16(&buffer.interleaved(), quantization);
    let mut payload = Vec::with_capacity(header.data_len as usize);
    for sample in &pcm {
        payload.extend_from_slice(&sample.to_le_bytes());
    }
    w.write_all(&payload)?;

    Ok(())
}

/// A complete WAV file written beside its destination, not yet in place
///
/// Dropping it without [`StagedWav::commit`] deletes the temporary file and
/// leaves the destination untouched.
#[derive(Debug)]
pub struct StagedWav {
    file: NamedTempFile,
    path: PathBuf,
    bytes: usize,
}

impl StagedWav {
    /// Final path the file is committed to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically move the staged file over the destination
    pub fn commit(self) -> Result<()> {
        let StagedWav { file, path, bytes } = self;
        file.persist(&path).map_err(|e| SynthError::Io {
            path: path.clone(),
            source: e.error,
        })?;

        tracing::debug!(path = %path.display(), bytes, "wrote wav");
        Ok(())
    }
}

/// Encode `buffer` into a temporary file in the directory of `path`
///
/// The parent directory must already exist; it is never created here.
pub fn stage_wav(buffer: &SampleBuffer, path: &Path, quantization: Quantization) -> Result<StagedWav> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + buffer.frames() * buffer.channel_count() * 2);
    encode_wav(&mut bytes, buffer, quantization)?;

    let io_error = |source: io::Error| SynthError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(&bytes).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;

    Ok(StagedWav {
        file,
        path: path.to_path_buf(),
        bytes: bytes.len(),
    })
}

/// Write `buffer` to a WAV file at `path`
///
/// The file is staged next to `path` and renamed into place, so a failed
/// write never leaves a truncated file or clobbers the previous one. The
/// parent directory must already exist.
pub fn write_wav(buffer: &SampleBuffer, path: &Path, quantization: Quantization) -> Result<()> {
    stage_wav(buffer, path, quantization)?.commit()
}
