// Ici on importe depuis la crate lib complète
use anyhow::Result;
use log::{info, warn};
use std::{env, path::PathBuf};

use immersive_panner::host::{HostConfig, OfflineRenderer};
use immersive_panner::spatial_engine::param_queue::DEFAULT_QUEUE_CAPACITY;
use immersive_panner::spatial_engine::{param_queue, SpatialGainEngine};
use immersive_panner::utils::show_rust_core_dependencies;

const DEFAULT_CONFIG_PATH: &str = "assets/config/spatial.toml";

fn usage() -> anyhow::Error {
    anyhow::anyhow!("usage: immersive_panner <input.wav> <output.wav> [config.toml]")
}

/// Renders a WAV file through the spatial gain engine.
fn main() -> Result<()> {
    env_logger::init();

    info!("🚀 Starting immersive panner...");

    show_rust_core_dependencies();

    let mut args = env::args().skip(1);
    let input = args.next().map(PathBuf::from).ok_or_else(usage)?;
    let output = args.next().map(PathBuf::from).ok_or_else(usage)?;

    // --------------------------
    // Chargement de la configuration
    // --------------------------
    let config_path = args
        .next() // priorité à l'argument CLI
        .map(PathBuf::from)
        .or_else(|| env::var("IMMERSIVE_PANNER_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = HostConfig::from_file(&config_path).unwrap_or_else(|e| {
        warn!(
            "Config '{}' unusable ({}), falling back to defaults",
            config_path.display(),
            e
        );
        HostConfig::default()
    });
    info!("Host config loaded:\n{:#?}", config);

    // --------------------------
    // Initialisation du moteur
    // --------------------------
    let (sender, receiver) = param_queue(DEFAULT_QUEUE_CAPACITY);
    let engine = SpatialGainEngine::with_param_queue(config.spatial, receiver);
    let mut renderer =
        OfflineRenderer::new(engine, config.render).with_orbit_automation(sender, config.spatial);

    let report = renderer.render_file(&input, &output)?;
    info!(
        "Done: {} blocks, {} frames, last gains {:?}",
        report.blocks, report.frames, report.last_gains
    );

    Ok(())
}
