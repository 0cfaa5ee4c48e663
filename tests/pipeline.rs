use foley::config::AssetRequest;
use foley::{
    AssetStatus, CAR, Capability, Encoder, Error, FallbackReason, Harmonic, PipelineConfig, RAIN,
    Result, SynthesisProfile, generate_asset, inspect_container, normalize, run_batch, synthesize,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::Cell;
use std::path::Path;

/// Stands in for an MP3 encoder by copying the WAV bytes.
struct CopyEncoder {
    available: bool,
    calls: Cell<usize>,
}

impl CopyEncoder {
    fn new(available: bool) -> Self {
        Self {
            available,
            calls: Cell::new(0),
        }
    }
}

impl Encoder for CopyEncoder {
    fn name(&self) -> &str {
        "copy"
    }

    fn probe(&self) -> Capability {
        if self.available {
            Capability::Available
        } else {
            Capability::Unavailable
        }
    }

    fn encode(&self, input: &Path, output: &Path) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        std::fs::copy(input, output)
            .map(|_| ())
            .map_err(|e| Error::CodecFailure(e.to_string()))
    }
}

fn pipeline_in(root: &Path) -> PipelineConfig {
    PipelineConfig {
        output_dir: root.join("audio").join("environment"),
        sample_rate: 44100,
        compressed_extension: "mp3".to_string(),
    }
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn rain_scenario_writes_132300_samples() {
    let dir = tempfile::tempdir().unwrap();
    let config = pipeline_in(dir.path());
    std::fs::create_dir_all(&config.output_dir).unwrap();

    let outcome = generate_asset(
        &config,
        &AssetRequest::from_class(&RAIN),
        &mut StdRng::seed_from_u64(1),
        Capability::Unavailable,
        &CopyEncoder::new(false),
    )
    .unwrap();

    let info = inspect_container(outcome.path()).unwrap();
    assert_eq!(info.channels, 1);
    assert_eq!(info.sample_width, 2);
    assert_eq!(info.sample_rate, 44100);
    assert_eq!(info.frames, 132_300);
    assert_eq!(info.payload_bytes, 264_600);

    let file_len = std::fs::metadata(outcome.path()).unwrap().len();
    assert_eq!(file_len, 264_600 + 44);
}

#[test]
fn car_scenario_writes_88200_samples() {
    let dir = tempfile::tempdir().unwrap();
    let config = pipeline_in(dir.path());
    std::fs::create_dir_all(&config.output_dir).unwrap();

    let outcome = generate_asset(
        &config,
        &AssetRequest::from_class(&CAR),
        &mut StdRng::seed_from_u64(2),
        Capability::Unavailable,
        &CopyEncoder::new(false),
    )
    .unwrap();

    assert_eq!(inspect_container(outcome.path()).unwrap().frames, 88_200);
}

#[test]
fn normalized_samples_stay_in_range_across_seeds_and_profiles() {
    let loud = SynthesisProfile::new(
        1.5,
        vec![Harmonic::new(60.0, 0.9), Harmonic::new(90.0, 0.9)],
        3.0,
    )
    .unwrap();
    let profiles = [RAIN.profile(), CAR.profile(), loud];

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        for profile in &profiles {
            let raw = synthesize(0.05, 44100, profile, &mut rng).unwrap();
            let clipped = normalize(raw, profile.gain());
            assert!(
                clipped.iter().all(|s| (-1.0..=1.0).contains(s)),
                "seed {seed} produced an out-of-range sample"
            );
        }
    }
}

#[test]
fn available_encoder_replaces_wav_with_compressed_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = pipeline_in(dir.path());
    let encoder = CopyEncoder::new(true);

    let summary = run_batch(
        &config,
        &[
            AssetRequest::from_class(&RAIN),
            AssetRequest::from_class(&CAR),
        ],
        &mut StdRng::seed_from_u64(3),
        &encoder,
    )
    .unwrap();

    assert_eq!(summary.complete().count(), 2);
    assert_eq!(encoder.calls.get(), 2);
    assert_eq!(dir_entries(&config.output_dir), vec!["car.mp3", "rain.mp3"]);
}

#[test]
fn unavailable_encoder_falls_back_to_wav() {
    let dir = tempfile::tempdir().unwrap();
    let config = pipeline_in(dir.path());
    let encoder = CopyEncoder::new(false);

    let summary = run_batch(
        &config,
        &[AssetRequest::from_class(&RAIN)],
        &mut StdRng::seed_from_u64(4),
        &encoder,
    )
    .unwrap();

    let report = &summary.reports()[0];
    match &report.status {
        AssetStatus::Fallback { path, reason } => {
            assert_eq!(path, &config.wav_path("rain"));
            assert_eq!(reason, &FallbackReason::CodecUnavailable);
        }
        other => panic!("expected fallback, got {other:?}"),
    }
    assert_eq!(encoder.calls.get(), 0);
    assert!(!config.compressed_path("rain").exists());
    assert!(!summary.has_failures());
}

#[test]
fn failed_asset_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let config = pipeline_in(dir.path());

    let mut broken = AssetRequest::from_class(&CAR);
    broken.name = "broken".to_string();
    broken.duration = -1.0;
    let requests = [
        AssetRequest::from_class(&RAIN),
        broken,
        AssetRequest::from_class(&CAR),
    ];

    let summary = run_batch(
        &config,
        &requests,
        &mut StdRng::seed_from_u64(5),
        &CopyEncoder::new(true),
    )
    .unwrap();

    assert_eq!(summary.len(), 3);
    assert_eq!(summary.complete().count(), 2);
    let failed: Vec<&str> = summary.failures().map(|r| r.name.as_str()).collect();
    assert_eq!(failed, vec!["broken"]);
    assert!(matches!(
        summary.reports()[1].status,
        AssetStatus::Failed(Error::InvalidParameter(_))
    ));
}

#[test]
fn oversized_duration_fails_only_its_own_asset() {
    let dir = tempfile::tempdir().unwrap();
    let config = pipeline_in(dir.path());

    let mut huge = AssetRequest::from_class(&CAR);
    huge.duration = 1e14;
    let requests = [huge, AssetRequest::from_class(&RAIN)];

    let summary = run_batch(
        &config,
        &requests,
        &mut StdRng::seed_from_u64(10),
        &CopyEncoder::new(false),
    )
    .unwrap();

    assert!(matches!(
        summary.reports()[0].status,
        AssetStatus::Failed(Error::InvalidParameter(_))
    ));
    assert!(matches!(summary.reports()[1].status, AssetStatus::Fallback { .. }));
    assert_eq!(dir_entries(&config.output_dir), vec!["rain.wav"]);
}

#[test]
fn rerunning_leaves_one_file_per_asset() {
    let dir = tempfile::tempdir().unwrap();
    let config = pipeline_in(dir.path());
    let requests = [AssetRequest::from_class(&RAIN)];

    // WAV fallback first, then a run with a working encoder, then fallback again
    run_batch(&config, &requests, &mut StdRng::seed_from_u64(6), &CopyEncoder::new(false)).unwrap();
    assert_eq!(dir_entries(&config.output_dir), vec!["rain.wav"]);

    run_batch(&config, &requests, &mut StdRng::seed_from_u64(7), &CopyEncoder::new(true)).unwrap();
    assert_eq!(dir_entries(&config.output_dir), vec!["rain.mp3"]);

    run_batch(&config, &requests, &mut StdRng::seed_from_u64(8), &CopyEncoder::new(true)).unwrap();
    assert_eq!(dir_entries(&config.output_dir), vec!["rain.mp3"]);

    run_batch(&config, &requests, &mut StdRng::seed_from_u64(9), &CopyEncoder::new(false)).unwrap();
    assert_eq!(dir_entries(&config.output_dir), vec!["rain.wav"]);
}

#[test]
fn same_seed_produces_identical_files() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let requests = [AssetRequest::from_class(&CAR)];

    for root in [first.path(), second.path()] {
        run_batch(
            &pipeline_in(root),
            &requests,
            &mut StdRng::seed_from_u64(42),
            &CopyEncoder::new(false),
        )
        .unwrap();
    }

    let a = std::fs::read(pipeline_in(first.path()).wav_path("car")).unwrap();
    let b = std::fs::read(pipeline_in(second.path()).wav_path("car")).unwrap();
    assert_eq!(a, b);
}
