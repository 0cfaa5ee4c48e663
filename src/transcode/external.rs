//! Encoders backed by command-line tools found on `PATH`.

use super::{Capability, Encoder, stderr_tail};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Command-line MP3 encoders we know how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalTool {
    Ffmpeg,
    Lame,
}

impl ExternalTool {
    pub fn program(self) -> &'static str {
        match self {
            ExternalTool::Ffmpeg => "ffmpeg",
            ExternalTool::Lame => "lame",
        }
    }

    fn args(self, input: &Path, output: &Path) -> Vec<std::ffi::OsString> {
        let mut args: Vec<std::ffi::OsString> = Vec::new();
        match self {
            ExternalTool::Ffmpeg => {
                for flag in ["-y", "-hide_banner", "-loglevel", "error", "-i"] {
                    args.push(flag.into());
                }
                args.push(input.into());
                for flag in ["-codec:a", "libmp3lame", "-qscale:a", "2"] {
                    args.push(flag.into());
                }
                args.push(output.into());
            }
            ExternalTool::Lame => {
                for flag in ["--quiet", "-V", "2"] {
                    args.push(flag.into());
                }
                args.push(input.into());
                args.push(output.into());
            }
        }
        args
    }
}

/// Runs an external encoder binary.
///
/// The binary is resolved once, at construction. A missing binary is not an
/// error: the encoder simply probes as [`Capability::Unavailable`].
#[derive(Debug, Clone)]
pub struct ExternalEncoder {
    tool: ExternalTool,
    binary: Option<PathBuf>,
}

impl ExternalEncoder {
    /// Locates `tool` on `PATH`.
    pub fn new(tool: ExternalTool) -> Self {
        let binary = which::which(tool.program()).ok();
        if let Some(path) = &binary {
            tracing::debug!(tool = tool.program(), path = %path.display(), "found encoder");
        } else {
            tracing::debug!(tool = tool.program(), "encoder not on PATH");
        }
        Self { tool, binary }
    }

    /// Uses an explicit binary instead of searching `PATH`.
    pub fn with_binary(tool: ExternalTool, binary: impl Into<PathBuf>) -> Self {
        let binary = binary.into();
        Self {
            tool,
            binary: binary.is_file().then_some(binary),
        }
    }

    pub fn ffmpeg() -> Self {
        Self::new(ExternalTool::Ffmpeg)
    }

    pub fn lame() -> Self {
        Self::new(ExternalTool::Lame)
    }

    /// Prefers ffmpeg, then lame. If neither is installed the ffmpeg encoder
    /// is returned and probes as unavailable.
    pub fn detect() -> Self {
        let ffmpeg = Self::ffmpeg();
        if ffmpeg.binary.is_some() {
            return ffmpeg;
        }
        let lame = Self::lame();
        if lame.binary.is_some() {
            return lame;
        }
        ffmpeg
    }
}

impl Encoder for ExternalEncoder {
    fn name(&self) -> &str {
        self.tool.program()
    }

    fn probe(&self) -> Capability {
        if self.binary.is_some() {
            Capability::Available
        } else {
            Capability::Unavailable
        }
    }

    fn encode(&self, input: &Path, output: &Path) -> Result<()> {
        let binary = self.binary.as_ref().ok_or(Error::CodecUnavailable)?;

        let result = Command::new(binary)
            .args(self.tool.args(input, output))
            .output()
            .map_err(|e| Error::CodecFailure(format!("failed to run {}: {e}", binary.display())))?;

        if !result.status.success() {
            return Err(Error::CodecFailure(format!(
                "{} exited with {}: {}",
                self.tool.program(),
                result.status,
                stderr_tail(&result.stderr)
            )));
        }
        Ok(())
    }
}
