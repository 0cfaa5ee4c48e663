//! WAV container writing and inspection.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Bytes per sample for 16-bit PCM.
pub const SAMPLE_WIDTH: u16 = 2;

/// Mono output only.
pub const CHANNELS: u16 = 1;

fn pcm_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: SAMPLE_WIDTH * 8,
        sample_format: SampleFormat::Int,
    }
}

/// Writes a mono 16-bit PCM WAV file, replacing anything at `path`.
///
/// The header carries format tag 1, one channel, `sample_rate`, 16 bits per
/// sample and a data length of `pcm.len() × 2`, followed by the little-endian
/// payload.
///
/// # Errors
///
/// `Io` (with the offending path) if the file cannot be created or written,
/// `Container` for any other encoder failure.
pub fn write_wav(path: &Path, pcm: &[i16], sample_rate: u32) -> Result<()> {
    if sample_rate == 0 {
        return Err(Error::InvalidParameter(
            "sample rate must be greater than zero".to_string(),
        ));
    }

    let mut writer =
        WavWriter::create(path, pcm_spec(sample_rate)).map_err(|e| Error::container(path, e))?;

    for &sample in pcm {
        writer
            .write_sample(sample)
            .map_err(|e| Error::container(path, e))?;
    }

    writer.finalize().map_err(|e| Error::container(path, e))?;

    tracing::debug!(path = %path.display(), samples = pcm.len(), "wrote WAV container");
    Ok(())
}

/// Header facts read back from a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerInfo {
    pub channels: u16,
    /// Bytes per sample
    pub sample_width: u16,
    pub sample_rate: u32,
    /// Samples per channel
    pub frames: u32,
    /// Size of the data chunk in bytes
    pub payload_bytes: u64,
}

/// Reads and validates the header of a WAV file.
///
/// Only the header is parsed; the payload is not decoded.
pub fn inspect_container(path: &Path) -> Result<ContainerInfo> {
    let reader = WavReader::open(path).map_err(|e| Error::container(path, e))?;
    let spec = reader.spec();
    let sample_width = spec.bits_per_sample.div_ceil(8);
    let frames = reader.duration();

    Ok(ContainerInfo {
        channels: spec.channels,
        sample_width,
        sample_rate: spec.sample_rate,
        frames,
        payload_bytes: frames as u64 * spec.channels as u64 * sample_width as u64,
    })
}
