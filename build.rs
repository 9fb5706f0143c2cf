// build.rs
use cargo_metadata::MetadataCommand;
use std::collections::HashSet;

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");

    // Récupère la metadata du projet; sans elle les versions restent "Unknown"
    let metadata = match MetadataCommand::new().exec() {
        Ok(metadata) => metadata,
        Err(e) => {
            println!("cargo:warning=cargo metadata failed: {e}");
            return;
        }
    };

    // Ensemble des crates qui nous intéressent
    let tracked = HashSet::from(["hound", "glam", "crossbeam-channel"]);

    for package in &metadata.packages {
        if tracked.contains(package.name.as_str()) {
            println!(
                "cargo:rustc-env={}={}",
                package.name.to_uppercase().replace('-', "_"),
                package.version
            );
        }
    }
}
