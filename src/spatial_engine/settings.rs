// =========================
// Spatial Engine Configuration
// =========================

use crate::spatial_engine::types::{DistanceModel, ListenerGeometry, SourceGeometry, SpatialMethod};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MAX_DELAY_MS: f32 = 1.0;

/// Complete parameter snapshot consumed by the engine for one block.
///
/// Build it through [`SpatialSettingsBuilder`] (validated) or load it from a
/// TOML file through [`crate::host::HostConfig`] (validated as well):
///
/// ```
/// use immersive_panner::spatial_engine::{SpatialSettingsBuilder, DistanceModel};
///
/// let settings = SpatialSettingsBuilder::default()
///     .distance(DistanceModel { ref_distance: 2.0, rolloff: 0.5 })
///     .build()
///     .unwrap();
/// assert_eq!(settings.distance.ref_distance, 2.0);
/// ```
#[derive(Clone, Copy, Builder, Debug, PartialEq, Serialize, Deserialize)]
#[builder(
    pattern = "owned",
    build_fn(validate = "Self::validate", error = "anyhow::Error")
)]
#[serde(default)]
pub struct SpatialSettings {
    /// Algorithm selector (host "Method" parameter)
    #[builder(default)]
    pub method: SpatialMethod,

    /// Host "Panning" knob in [-1, 1]. Carried but not used by the gain computation.
    #[builder(default = "0.0")]
    pub panning: f32,

    /// Delay budget (ms) reserved for an ITD delay line
    #[builder(default = "DEFAULT_MAX_DELAY_MS")]
    pub max_delay_ms: f32,

    #[builder(default)]
    pub source: SourceGeometry,

    #[builder(default)]
    pub listener: ListenerGeometry,

    #[builder(default)]
    pub distance: DistanceModel,
}

impl Default for SpatialSettings {
    fn default() -> Self {
        Self {
            method: SpatialMethod::default(),
            panning: 0.0,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            source: SourceGeometry::default(),
            listener: ListenerGeometry::default(),
            distance: DistanceModel::default(),
        }
    }
}

impl SpatialSettingsBuilder {
    fn validate(&self) -> anyhow::Result<()> {
        let candidate = SpatialSettings {
            method: self.method.unwrap_or_default(),
            panning: self.panning.unwrap_or(0.0),
            max_delay_ms: self.max_delay_ms.unwrap_or(DEFAULT_MAX_DELAY_MS),
            source: self.source.unwrap_or_default(),
            listener: self.listener.unwrap_or_default(),
            distance: self.distance.unwrap_or_default(),
        };
        candidate.validate()
    }
}

impl SpatialSettings {
    /// Checks the ranges a host parameter layer would enforce.
    pub fn validate(&self) -> anyhow::Result<()> {
        let source = &self.source;
        let listener = &self.listener;

        for (name, v) in [
            ("source.position", source.position),
            ("source.orientation", source.orientation),
            ("listener.position", listener.position),
            ("listener.forward", listener.forward),
        ] {
            anyhow::ensure!(v.is_finite(), "{} must be finite, got {:?}", name, v);
        }

        anyhow::ensure!(
            (0.0..360.0).contains(&source.cone_inner_angle),
            "cone_inner_angle must be within [0, 360) degrees, got {}",
            source.cone_inner_angle
        );
        anyhow::ensure!(
            (0.0..=360.0).contains(&source.cone_outer_angle),
            "cone_outer_angle must be within [0, 360] degrees, got {}",
            source.cone_outer_angle
        );
        anyhow::ensure!(
            source.cone_outer_angle >= source.cone_inner_angle,
            "cone_outer_angle ({}) must be >= cone_inner_angle ({})",
            source.cone_outer_angle,
            source.cone_inner_angle
        );
        anyhow::ensure!(
            source.cone_outer_gain.is_finite(),
            "cone_outer_gain must be finite, got {}",
            source.cone_outer_gain
        );
        anyhow::ensure!(
            self.distance.ref_distance > 0.0 && self.distance.ref_distance.is_finite(),
            "ref_distance must be > 0, got {}",
            self.distance.ref_distance
        );
        anyhow::ensure!(
            self.distance.rolloff >= 0.0 && self.distance.rolloff.is_finite(),
            "rolloff must be >= 0, got {}",
            self.distance.rolloff
        );
        anyhow::ensure!(
            (-1.0..=1.0).contains(&self.panning),
            "panning must be within [-1, 1], got {}",
            self.panning
        );
        anyhow::ensure!(
            self.max_delay_ms >= 0.0 && self.max_delay_ms.is_finite(),
            "max_delay_ms must be >= 0, got {}",
            self.max_delay_ms
        );
        Ok(())
    }

    /// Accessors: read-only public getters
    pub fn method(&self) -> SpatialMethod {
        self.method
    }

    pub fn panning(&self) -> f32 {
        self.panning
    }

    pub fn max_delay_ms(&self) -> f32 {
        self.max_delay_ms
    }

    /// Charge un snapshot depuis un fichier TOML (champs absents = défauts)
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let settings: SpatialSettings = toml::from_str(&text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
