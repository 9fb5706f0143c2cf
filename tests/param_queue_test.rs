mod helpers;

use helpers::init_logger;
use immersive_panner::math::Vector2D;
use immersive_panner::spatial_engine::{
    param_queue, SpatialGainEngine, SpatialProcessor, SpatialSettings,
};
use std::thread;

fn settings_at(x: f32) -> SpatialSettings {
    let mut settings = SpatialSettings::default();
    settings.source.position = Vector2D::new(x, 1.0);
    settings
}

#[test]
fn test_engine_uses_last_snapshot_of_a_burst() {
    init_logger();
    let (tx, rx) = param_queue(16);
    let mut engine = SpatialGainEngine::with_param_queue(SpatialSettings::default(), rx);
    engine.prepare(48_000.0, 128);

    let producer = thread::spawn(move || {
        for i in 0..10 {
            assert!(tx.publish(settings_at(i as f32)));
        }
    });
    producer.join().unwrap();

    let mut frames = vec![[0.1_f32, 0.1]; 128];
    engine.process_frames(&mut frames);
    assert_eq!(engine.settings().source.position, Vector2D::new(9.0, 1.0));
}

#[test]
fn test_full_queue_keeps_last_published_value() {
    let (tx, rx) = param_queue(2);
    let mut engine = SpatialGainEngine::with_param_queue(SpatialSettings::default(), rx);
    engine.prepare(48_000.0, 32);

    assert!(tx.publish(settings_at(1.0)));
    assert!(tx.publish(settings_at(2.0)));
    assert!(tx.publish(settings_at(3.0)));

    let mut frames = vec![[0.5_f32, 0.5]; 32];
    engine.process_frames(&mut frames);
    assert_eq!(engine.settings().source.position, Vector2D::new(3.0, 1.0));

    // plus rien en attente : le snapshot reste en place
    let mut frames = vec![[0.5_f32, 0.5]; 32];
    engine.process_frames(&mut frames);
    assert_eq!(engine.settings().source.position, Vector2D::new(3.0, 1.0));
}

#[test]
fn test_fast_producer_never_leaves_engine_stale() {
    let (tx, rx) = param_queue(4);
    let mut engine = SpatialGainEngine::with_param_queue(SpatialSettings::default(), rx);
    engine.prepare(48_000.0, 16);

    let producer = thread::spawn(move || {
        for i in 0..500 {
            assert!(tx.publish(settings_at(i as f32)));
        }
    });
    producer.join().unwrap();

    let mut frames = vec![[0.1_f32, 0.1]; 16];
    engine.process_frames(&mut frames);
    assert_eq!(engine.settings().source.position, Vector2D::new(499.0, 1.0));
}

#[test]
fn test_disconnected_sender_keeps_current_state() {
    let (tx, rx) = param_queue(4);
    let mut engine = SpatialGainEngine::with_param_queue(SpatialSettings::default(), rx);
    engine.prepare(48_000.0, 16);

    tx.publish(settings_at(5.0));
    drop(tx);

    let mut frames = vec![[1.0_f32, 1.0]; 16];
    let first = engine.process_frames(&mut frames);
    let mut frames = vec![[1.0_f32, 1.0]; 16];
    let second = engine.process_frames(&mut frames);

    assert_eq!(engine.settings().source.position, Vector2D::new(5.0, 1.0));
    assert_eq!(first, second);
}

#[test]
fn test_publish_validated_rejects_invalid_snapshot() {
    let (tx, rx) = param_queue(4);
    let mut invalid = SpatialSettings::default();
    invalid.distance.ref_distance = -2.0;

    assert!(tx.publish_validated(invalid).is_err());
    assert!(tx.publish_validated(settings_at(1.0)).unwrap());
    assert_eq!(rx.latest(), Some(settings_at(1.0)));
}

#[test]
fn test_snapshot_changes_delay_budget() {
    let (tx, rx) = param_queue(4);
    let mut engine = SpatialGainEngine::with_param_queue(SpatialSettings::default(), rx);
    engine.prepare(48_000.0, 64);
    assert_eq!(engine.max_delay_samples(), 48);

    let mut longer = SpatialSettings::default();
    longer.max_delay_ms = 2.0;
    tx.publish(longer);
    let mut frames = vec![[0.0_f32, 0.0]; 4];
    engine.process_frames(&mut frames);
    assert_eq!(engine.max_delay_samples(), 96);
}
