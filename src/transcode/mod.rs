//! WAV → compressed format transcoding with graceful fallback.
//!
//! Transcoding is best effort. Whatever happens, the caller ends up with one
//! usable file for the asset:
//! - encoder present and working: the compressed file, intermediate deleted
//! - encoder missing: the WAV, left under its own extension
//! - encoder present but failing: the WAV again, plus a warning with the cause

mod external;

pub use external::{ExternalEncoder, ExternalTool};

use crate::{Error, Result, inspect_container};
use std::fmt;
use std::path::{Path, PathBuf};

/// Whether a compression backend can be used in this environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Available,
    Unavailable,
}

/// A backend that re-encodes a WAV file into a compressed format.
pub trait Encoder {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Checks whether the backend can run. Called once per batch.
    fn probe(&self) -> Capability;

    /// Encodes `input` into `output`, overwriting `output` if it exists.
    ///
    /// Failures should be reported as [`Error::CodecFailure`].
    fn encode(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Last non-empty line a failed tool wrote to stderr.
pub(crate) fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    match text.trim().lines().last() {
        Some(line) => line.to_string(),
        None => "no diagnostic output".to_string(),
    }
}

/// An encoder that is never available. Selecting it keeps every asset as WAV.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

impl Encoder for Disabled {
    fn name(&self) -> &str {
        "disabled"
    }

    fn probe(&self) -> Capability {
        Capability::Unavailable
    }

    fn encode(&self, _input: &Path, _output: &Path) -> Result<()> {
        Err(Error::CodecUnavailable)
    }
}

/// Why an asset was kept in its uncompressed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    CodecUnavailable,
    CodecFailure(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::CodecUnavailable => f.write_str("encoder not available"),
            FallbackReason::CodecFailure(cause) => write!(f, "encoding failed: {cause}"),
        }
    }
}

impl From<Error> for FallbackReason {
    fn from(err: Error) -> Self {
        match err {
            Error::CodecUnavailable => FallbackReason::CodecUnavailable,
            Error::CodecFailure(cause) => FallbackReason::CodecFailure(cause),
            other => FallbackReason::CodecFailure(other.to_string()),
        }
    }
}

/// Result of a transcoding attempt. Both variants mean an asset exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscodeOutcome {
    /// Compressed file written, intermediate removed
    Transcoded { path: PathBuf },
    /// Degraded success: the WAV at `path` is the asset
    Fallback {
        path: PathBuf,
        reason: FallbackReason,
    },
}

impl TranscodeOutcome {
    /// Path of the file that now represents the asset.
    pub fn path(&self) -> &Path {
        match self {
            TranscodeOutcome::Transcoded { path } => path,
            TranscodeOutcome::Fallback { path, .. } => path,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, TranscodeOutcome::Fallback { .. })
    }
}

/// Converts the WAV at `intermediate` into `target` using `encoder`.
///
/// `capability` is the result of a probe done once by the caller. This never
/// fails: every problem is logged as a warning and turned into a
/// [`TranscodeOutcome::Fallback`] that keeps the intermediate in place.
pub fn transcode(
    intermediate: &Path,
    target: &Path,
    capability: Capability,
    encoder: &dyn Encoder,
) -> TranscodeOutcome {
    let attempt = match capability {
        Capability::Unavailable => Err(Error::CodecUnavailable),
        Capability::Available => try_encode(intermediate, target, encoder),
    };

    match attempt {
        Ok(()) => {
            if let Err(e) = std::fs::remove_file(intermediate) {
                tracing::warn!(
                    path = %intermediate.display(),
                    "transcoded, but could not remove intermediate: {e}"
                );
            }
            tracing::debug!(encoder = encoder.name(), path = %target.display(), "transcoded");
            TranscodeOutcome::Transcoded {
                path: target.to_path_buf(),
            }
        }
        Err(err) => {
            let reason = FallbackReason::from(err);
            // A leftover target would be a second, possibly truncated copy of the asset
            discard(target);
            match &reason {
                FallbackReason::CodecUnavailable => tracing::warn!(
                    encoder = encoder.name(),
                    "compression backend not available, keeping {}",
                    intermediate.display()
                ),
                FallbackReason::CodecFailure(cause) => tracing::warn!(
                    encoder = encoder.name(),
                    "compression failed ({cause}), keeping {}",
                    intermediate.display()
                ),
            }
            TranscodeOutcome::Fallback {
                path: intermediate.to_path_buf(),
                reason,
            }
        }
    }
}

fn try_encode(intermediate: &Path, target: &Path, encoder: &dyn Encoder) -> Result<()> {
    inspect_container(intermediate)
        .map_err(|e| Error::CodecFailure(format!("unreadable intermediate: {e}")))?;
    encoder.encode(intermediate, target)?;
    if !target.is_file() {
        return Err(Error::CodecFailure(format!(
            "{} reported success but wrote no output",
            encoder.name()
        )));
    }
    Ok(())
}

fn discard(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "removed stale compressed output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), "could not remove stale output: {e}"),
    }
}
