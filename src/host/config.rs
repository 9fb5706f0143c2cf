use crate::spatial_engine::SpatialSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Offline rendering options (`[render]` section).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Frames per processed block
    pub block_size: usize,
    /// Output channels handed to the engine; channels past the stereo pair are silent
    pub output_channels: usize,
    /// Period (s) of the source orbit around the listener; no automation when absent
    pub orbit_period_s: Option<f32>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            block_size: 512,
            output_channels: 2,
            orbit_period_s: None,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.block_size > 0, "block_size must be > 0");
        anyhow::ensure!(
            self.output_channels >= 2,
            "output_channels must be >= 2, got {}",
            self.output_channels
        );
        if let Some(period) = self.orbit_period_s {
            anyhow::ensure!(
                period > 0.0 && period.is_finite(),
                "orbit_period_s must be > 0, got {}",
                period
            );
        }
        Ok(())
    }
}

/// Whole configuration file: `[spatial]` + `[render]`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HostConfig {
    pub spatial: SpatialSettings,
    pub render: RenderConfig,
}

impl HostConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: HostConfig = toml::from_str(text)?;
        config.spatial.validate()?;
        config.render.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
