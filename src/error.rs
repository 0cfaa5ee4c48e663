//! Error type shared by every stage of the generation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while generating an asset.
///
/// `CodecUnavailable` and `CodecFailure` never escape the transcoder; they are
/// folded into a [`FallbackReason`](crate::FallbackReason) and logged. The rest
/// fail the single asset they occurred in.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("WAV encoding failed at {}: {source}", path.display())]
    Container {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("compression backend is not available")]
    CodecUnavailable,

    #[error("compression failed: {0}")]
    CodecFailure(String),

    #[error("invalid batch configuration: {0}")]
    Config(String),

    #[error("no text-to-speech backend is available")]
    SpeechUnavailable,

    #[error("speech synthesis failed: {0}")]
    Speech(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Splits hound errors so plain I/O failures keep their `Io` shape.
    pub(crate) fn container(path: impl Into<PathBuf>, source: hound::Error) -> Self {
        match source {
            hound::Error::IoError(source) => Error::io(path, source),
            source => Error::Container {
                path: path.into(),
                source,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
