//! The environment sound pipeline.
//!
//! Each asset goes through synthesize → normalize → quantize → WAV →
//! transcode, strictly one after another. Assets are independent: a failure in
//! one is recorded and the batch moves on.

use crate::config::{AssetRequest, BatchConfig};
use crate::{
    AssetStatus, BatchSummary, Capability, Encoder, Error, Result, TranscodeOutcome, normalize,
    quantize, synthesize, transcode, write_wav,
};
use rand::Rng;
use std::path::{Path, PathBuf};

/// Where and how a batch writes its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    pub sample_rate: u32,
    pub compressed_extension: String,
}

impl PipelineConfig {
    pub fn from_batch(batch: &BatchConfig) -> Self {
        Self {
            output_dir: batch.environment_dir(),
            sample_rate: batch.sample_rate,
            compressed_extension: batch.compressed_extension.clone(),
        }
    }

    pub fn wav_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}.wav"))
    }

    pub fn compressed_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}.{}", self.compressed_extension))
    }
}

/// Renders the PCM buffer for one asset without touching the filesystem.
pub fn render_pcm<R: Rng + ?Sized>(
    request: &AssetRequest,
    sample_rate: u32,
    rng: &mut R,
) -> Result<Vec<i16>> {
    let raw = synthesize(request.duration, sample_rate, &request.profile, rng)?;
    let clipped = normalize(raw, request.profile.gain());
    Ok(quantize(&clipped))
}

/// Produces one asset: WAV first, then an optional transcode.
///
/// # Errors
///
/// `InvalidParameter` for a bad duration or sample rate, `Io`/`Container`
/// if the WAV cannot be written. Transcoding problems are never errors; they
/// show up as [`TranscodeOutcome::Fallback`].
pub fn generate_asset<R: Rng + ?Sized>(
    config: &PipelineConfig,
    request: &AssetRequest,
    rng: &mut R,
    capability: Capability,
    encoder: &dyn Encoder,
) -> Result<TranscodeOutcome> {
    let pcm = render_pcm(request, config.sample_rate, rng)?;

    let wav = config.wav_path(&request.name);
    write_wav(&wav, &pcm, config.sample_rate)?;
    drop(pcm);

    let outcome = transcode(
        &wav,
        &config.compressed_path(&request.name),
        capability,
        encoder,
    );
    tracing::info!(
        asset = %request.name,
        path = %outcome.path().display(),
        degraded = outcome.is_degraded(),
        "generated"
    );
    Ok(outcome)
}

/// Creates the output directory if it does not exist yet.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}

/// Runs every request in order and reports what happened to each.
///
/// The encoder is probed once, up front. Only a failure to create the output
/// directory aborts the batch; everything else is per asset.
pub fn run_batch<R: Rng + ?Sized>(
    config: &PipelineConfig,
    requests: &[AssetRequest],
    rng: &mut R,
    encoder: &dyn Encoder,
) -> Result<BatchSummary> {
    ensure_output_dir(&config.output_dir)?;

    let capability = encoder.probe();
    if capability == Capability::Unavailable {
        tracing::warn!(
            encoder = encoder.name(),
            "no compression backend, assets will be kept as WAV"
        );
    }

    let mut summary = BatchSummary::new();
    for request in requests {
        let status = match generate_asset(config, request, rng, capability, encoder) {
            Ok(outcome) => AssetStatus::from(outcome),
            Err(err) => {
                tracing::warn!(asset = %request.name, "asset failed: {err}");
                AssetStatus::Failed(err)
            }
        };
        summary.record(request.name.clone(), status);
    }
    Ok(summary)
}
