use foley::{BatchConfig, Disabled, PipelineConfig, inspect_container, run_batch};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn custom_class_from_toml_file_is_rendered() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("generated");
    let config_path = dir.path().join("batch.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
            sample_rate = 16000
            assets_root = "{}"

            [[asset]]
            name = "car"
            duration = 0.5

            [[asset]]
            name = "wind"
            duration = 1.25
            noise_std_dev = 0.25
            gain = 0.5
            harmonics = [[120.0, 0.1], [240.0, 0.05]]
            "#,
            root.display().to_string().replace('\\', "/")
        ),
    )
    .unwrap();

    let batch = BatchConfig::load(&config_path).unwrap();
    let requests = batch.requests().unwrap();
    let pipeline = PipelineConfig::from_batch(&batch);

    let summary = run_batch(
        &pipeline,
        &requests,
        &mut StdRng::seed_from_u64(0),
        &Disabled,
    )
    .unwrap();

    assert_eq!(summary.fallbacks().count(), 2);
    let env = root.join("audio").join("environment");
    let car = inspect_container(&env.join("car.wav")).unwrap();
    let wind = inspect_container(&env.join("wind.wav")).unwrap();
    assert_eq!(car.sample_rate, 16000);
    assert_eq!(car.frames, 8000);
    assert_eq!(wind.frames, 20000);
}
