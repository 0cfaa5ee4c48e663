//! Placeholder audio generator
//!
//! - `foley` / `foley environment`: procedural environment sounds
//!   (`<assets_root>/audio/environment/{rain,car}.mp3`, or `.wav` when no MP3
//!   encoder is installed)
//! - `foley speech`: instruction and feedback clips through `gtts-cli`
//!
//! Set `RUST_LOG=debug` for per-stage logging.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use foley::config::{BatchConfig, DEFAULT_ASSETS_ROOT};
use foley::speech::{ClipCategory, GttsCli, generate_speech_clips};
use foley::{Disabled, Encoder, ExternalEncoder, PipelineConfig, run_batch};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "foley", version, about = "Generate placeholder sound assets")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    environment: EnvironmentArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Synthesize environment sound effects (default)
    Environment(EnvironmentArgs),
    /// Render spoken instruction and feedback clips
    Speech(SpeechArgs),
}

#[derive(Args, Clone)]
struct EnvironmentArgs {
    /// Batch description (TOML); defaults to the built-in rain + car batch
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root of the asset tree (overrides the config file)
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Sample rate in Hz (overrides the config file)
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Seed the noise generator for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// MP3 encoder to use
    #[arg(long, value_enum, default_value_t = EncoderChoice::Auto)]
    encoder: EncoderChoice,

    /// Keep every asset as WAV
    #[arg(long)]
    no_transcode: bool,

    /// Exit with an error if any asset could not be produced
    #[arg(long)]
    strict: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum EncoderChoice {
    Auto,
    Ffmpeg,
    Lame,
}

#[derive(Args)]
struct SpeechArgs {
    /// Root of the asset tree
    #[arg(long, default_value = DEFAULT_ASSETS_ROOT)]
    assets_root: PathBuf,

    /// Only render one group of clips
    #[arg(long, value_enum)]
    only: Option<CategoryArg>,
}

#[derive(Copy, Clone, ValueEnum)]
enum CategoryArg {
    Instructions,
    Feedback,
}

impl From<CategoryArg> for ClipCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Instructions => ClipCategory::Instructions,
            CategoryArg::Feedback => ClipCategory::Feedback,
        }
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Environment(args)) => run_environment(args),
        Some(Command::Speech(args)) => run_speech(args),
        None => run_environment(cli.environment),
    }
}

fn run_environment(args: EnvironmentArgs) -> Result<ExitCode> {
    let mut batch = match &args.config {
        Some(path) => BatchConfig::load(path)
            .with_context(|| format!("Failed to load batch config {}", path.display()))?,
        None => BatchConfig::default(),
    };
    if let Some(root) = args.assets_root {
        batch.assets_root = root;
    }
    if let Some(rate) = args.sample_rate {
        batch.sample_rate = rate;
    }

    let requests = batch.requests().context("Invalid batch config")?;
    let pipeline = PipelineConfig::from_batch(&batch);

    let encoder: Box<dyn Encoder> = if args.no_transcode {
        Box::new(Disabled)
    } else {
        match args.encoder {
            EncoderChoice::Auto => Box::new(ExternalEncoder::detect()),
            EncoderChoice::Ffmpeg => Box::new(ExternalEncoder::ffmpeg()),
            EncoderChoice::Lame => Box::new(ExternalEncoder::lame()),
        }
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    tracing::info!(
        assets = requests.len(),
        sample_rate = pipeline.sample_rate,
        output = %pipeline.output_dir.display(),
        "generating environment sounds"
    );
    let summary = run_batch(&pipeline, &requests, &mut rng, encoder.as_ref())
        .context("Environment batch aborted")?;

    print!("{summary}");
    println!("Output -> {}", pipeline.output_dir.display());
    println!("Note: these are procedural placeholders, not recordings.");

    if args.strict && summary.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_speech(args: SpeechArgs) -> Result<ExitCode> {
    let categories: Vec<ClipCategory> = match args.only {
        Some(only) => vec![only.into()],
        None => ClipCategory::ALL.to_vec(),
    };

    let backend = GttsCli::detect();
    let summary = generate_speech_clips(&args.assets_root, &categories, &backend)
        .context("Install gtts-cli (pip install gTTS) to render speech clips")?;

    print!("{summary}");
    if summary.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
