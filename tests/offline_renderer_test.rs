mod helpers;

use helpers::{
    energy, init_logger, read_stereo_wav, sine_frames, write_stereo_wav, LoggingProcessor,
};
use immersive_panner::host::{AudioBlock, HostConfig, OfflineRenderer, RenderConfig};
use immersive_panner::math::Vector2D;
use immersive_panner::spatial_engine::{param_queue, SpatialGainEngine, SpatialSettings};

// ==================================
// 1. Découpage en blocs
// ==================================

#[test]
fn test_renderer_drives_processor_lifecycle() {
    init_logger();
    let config = RenderConfig {
        block_size: 256,
        ..RenderConfig::default()
    };
    let mut renderer = OfflineRenderer::new(LoggingProcessor::new(), config);

    let input = vec![[0.2_f32, -0.2]; 1000];
    let mut blocks: Vec<AudioBlock> = vec![];
    let report = renderer.render_frames(&input, 48_000, |block| blocks.push(block));

    assert_eq!(report.blocks, 4);
    assert_eq!(report.frames, 1000);
    assert_eq!(renderer.processor().block_sizes, vec![256, 256, 256, 232]);

    let log = &renderer.processor().log;
    assert_eq!(log.first().map(String::as_str), Some("prepare 48000 256"));
    assert_eq!(log.last().map(String::as_str), Some("release"));
    assert!(log[1..log.len() - 1]
        .iter()
        .all(|entry| entry == "process_block 2 2"));

    // processeur neutre : sortie = entrée
    let output: Vec<[f32; 2]> = blocks.into_iter().flat_map(|b| b.frames).collect();
    assert_eq!(output, input);
}

#[test]
fn test_silent_third_channel_stays_zero() {
    let config = RenderConfig {
        block_size: 64,
        output_channels: 3,
        orbit_period_s: None,
    };
    let engine = SpatialGainEngine::new(SpatialSettings::default());
    let mut renderer = OfflineRenderer::new(engine, config);

    let input = sine_frames(440.0, 48_000, 640, 0.8);
    let report = renderer.render_frames(&input, 48_000, |_| {});

    assert_eq!(report.blocks, 10);
    assert_eq!(report.extra_channel_peak, 0.0);
    assert!(report.last_gains.is_some());
    assert!(renderer.profiler().summary().contains_key("process_block"));
}

// ==================================
// 2. Automatisation
// ==================================

#[test]
fn test_orbit_automation_moves_pan_balance() {
    init_logger();
    let sample_rate = 1_000;
    let block_size = 50;

    let mut base = SpatialSettings::default();
    base.source.position = Vector2D::new(0.0, 2.0);
    base.source.orientation = Vector2D::new(0.0, -1.0);

    let (tx, rx) = param_queue(8);
    let engine = SpatialGainEngine::with_param_queue(base, rx);
    let config = RenderConfig {
        block_size,
        output_channels: 2,
        orbit_period_s: Some(1.0),
    };
    let mut renderer = OfflineRenderer::new(engine, config).with_orbit_automation(tx, base);

    let input = vec![[0.5_f32, 0.5]; 1000];
    let mut blocks: Vec<AudioBlock> = vec![];
    renderer.render_frames(&input, sample_rate, |block| blocks.push(block));
    assert_eq!(blocks.len(), 20);

    // t = 0 : devant, t = 0.25 : à droite, t = 0.75 : à gauche
    let ahead = &blocks[0].frames;
    let right = &blocks[5].frames;
    let left = &blocks[15].frames;

    assert!((energy(ahead, 0) - energy(ahead, 1)).abs() < 1e-3);
    assert!(energy(right, 1) > 10.0 * energy(right, 0));
    assert!(energy(left, 0) > 10.0 * energy(left, 1));
}

// ==================================
// 3. Fichiers
// ==================================

#[test]
fn test_render_file_keeps_frame_count_and_rate() {
    init_logger();
    let temp_dir = tempfile::tempdir().unwrap();
    let input_path = temp_dir.path().join("input.wav");
    let output_path = temp_dir.path().join("output.wav");

    let input = sine_frames(220.0, 44_100, 4410, 0.5);
    write_stereo_wav(&input_path, 44_100, &input);

    let engine = SpatialGainEngine::new(SpatialSettings::default());
    let mut renderer = OfflineRenderer::new(engine, RenderConfig::default());
    let report = renderer.render_file(&input_path, &output_path).unwrap();

    assert_eq!(report.frames, 4410);
    assert_eq!(report.blocks, 9);

    let (spec, output) = read_stereo_wav(&output_path);
    assert_eq!(spec.sample_rate, 44_100);
    assert_eq!(spec.channels, 2);
    assert_eq!(output.len(), input.len());

    // la source par défaut est à droite de l'auditeur
    assert!(energy(&output, 1) > energy(&output, 0));
    assert!(energy(&output, 1) < energy(&input, 1));
}

#[test]
fn test_render_file_missing_input_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let engine = SpatialGainEngine::new(SpatialSettings::default());
    let mut renderer = OfflineRenderer::new(engine, RenderConfig::default());

    let result = renderer.render_file(
        temp_dir.path().join("missing.wav"),
        temp_dir.path().join("out.wav"),
    );
    assert!(result.is_err());
}

#[test]
fn test_bundled_config_is_valid() {
    let config = HostConfig::from_file("assets/config/spatial.toml").unwrap();
    assert_eq!(config.spatial, SpatialSettings::default());
    assert_eq!(config.render.block_size, 512);
    assert_eq!(config.render.orbit_period_s, Some(8.0));
}
