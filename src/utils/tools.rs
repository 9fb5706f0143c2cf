use log::info;

/// Versions des crates audio/math relevées par build.rs
fn tracked_version(name: &str) -> String {
    match name {
        "HOUND" => option_env!("HOUND"),
        "GLAM" => option_env!("GLAM"),
        "CROSSBEAM_CHANNEL" => option_env!("CROSSBEAM_CHANNEL"),
        _ => None,
    }
    .filter(|v| !v.is_empty())
    .unwrap_or("Unknown")
    .to_string()
}

/// Affiche les informations Rust et les dépendances principales de la compilation.
pub fn show_rust_core_dependencies() {
    info!(
        "Rust compiler version: {}",
        rustc_version_runtime::version()
    );
    info!("  Platform    : {}", std::env::consts::OS);
    info!("  Arch        : {}", std::env::consts::ARCH);

    info!("Rust core dependancies");
    info!("  hound             version: {}", tracked_version("HOUND"));
    info!("  glam              version: {}", tracked_version("GLAM"));
    info!(
        "  crossbeam-channel version: {}",
        tracked_version("CROSSBEAM_CHANNEL")
    );
}
