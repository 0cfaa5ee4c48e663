//! Foley - placeholder sound effect and speech clip generation
//!
//! Environment sounds are synthesized procedurally and written as mono 16-bit
//! WAV files, then optionally transcoded to MP3 by an external encoder:
//!
//! ```text
//! synthesize → normalize → quantize → write_wav → transcode
//! ```
//!
//! Noise is drawn from whatever RNG the caller passes in. Runs are only
//! reproducible when that RNG is seeded.

pub mod config;
mod container;
mod error;
mod pcm;
pub mod pipeline;
pub mod signals;
pub mod speech;
mod summary;
pub mod synthesis;
pub mod transcode;

pub use config::{AssetRequest, BatchConfig};
pub use container::{CHANNELS, ContainerInfo, SAMPLE_WIDTH, inspect_container, write_wav};
pub use error::{Error, Result};
pub use pcm::{PCM_FULL_SCALE, normalize, quantize, quantize_sample};
pub use pipeline::{PipelineConfig, generate_asset, render_pcm, run_batch};
pub use signals::{Gain, Mix, Signal, SignalExt};
pub use summary::{AssetReport, AssetStatus, BatchSummary};
pub use synthesis::{
    BUILTIN_CLASSES, CAR, GaussianNoise, Harmonic, MAX_SAMPLES, RAIN, SineOscillator, SoundClass,
    SynthesisProfile, sample_count, synthesize,
};
pub use transcode::{
    Capability, Disabled, Encoder, ExternalEncoder, ExternalTool, FallbackReason, TranscodeOutcome,
    transcode,
};
