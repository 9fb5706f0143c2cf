use crate::math::Vector2D;
use serde::{Deserialize, Serialize};

// =========================
// Method selector
// =========================

/// Spatialization algorithm selected by the host "Method" parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpatialMethod {
    /// Sound cone + distance attenuation + constant-power panorama (index 0).
    #[default]
    PanoramaPrecedence = 0,
    /// Interaural time/level differences (index 1). Reserved: rendered with
    /// [`SpatialMethod::PanoramaPrecedence`].
    ItdIld = 1,
}

impl SpatialMethod {
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn is_implemented(self) -> bool {
        matches!(self, SpatialMethod::PanoramaPrecedence)
    }
}

impl TryFrom<u32> for SpatialMethod {
    type Error = anyhow::Error;

    fn try_from(index: u32) -> anyhow::Result<Self> {
        match index {
            0 => Ok(SpatialMethod::PanoramaPrecedence),
            1 => Ok(SpatialMethod::ItdIld),
            other => Err(anyhow::anyhow!("Unknown spatial method index: {}", other)),
        }
    }
}

// =========================
// Geometry
// =========================

/// Position, facing and directivity cone of the emitting source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceGeometry {
    /// Full inner cone aperture, degrees
    pub cone_inner_angle: f32,
    /// Full outer cone aperture, degrees
    pub cone_outer_angle: f32,
    /// Linear gain applied outside the outer cone
    pub cone_outer_gain: f32,
    pub position: Vector2D,
    /// Facing direction, unit length intended (not enforced)
    pub orientation: Vector2D,
}

impl Default for SourceGeometry {
    fn default() -> Self {
        Self {
            cone_inner_angle: 0.0,
            cone_outer_angle: 180.0,
            cone_outer_gain: 0.5,
            position: Vector2D::new(1.0, 1.0),
            orientation: Vector2D::new(0.0, -1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerGeometry {
    pub position: Vector2D,
    pub forward: Vector2D,
}

impl Default for ListenerGeometry {
    fn default() -> Self {
        Self {
            position: Vector2D::ZERO,
            forward: Vector2D::Y,
        }
    }
}

/// Parameters of the linear-distance-clamped inverse model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceModel {
    pub ref_distance: f32,
    pub rolloff: f32,
}

impl Default for DistanceModel {
    fn default() -> Self {
        Self {
            ref_distance: 1.0,
            rolloff: 1.0,
        }
    }
}

// =========================
// Result of one block
// =========================

/// Gains computed for one audio block. Recomputed every block, never stored
/// across blocks by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainResult {
    pub cone_gain: f32,
    pub distance_gain: f32,
    pub gain_left: f32,
    pub gain_right: f32,
}

impl GainResult {
    /// Gain leaving the signal untouched on both channels.
    pub const UNITY: Self = Self {
        cone_gain: 1.0,
        distance_gain: 1.0,
        gain_left: 1.0,
        gain_right: 1.0,
    };

    /// Factor shared by both channels (cone × distance).
    #[inline]
    pub fn common(&self) -> f32 {
        self.cone_gain * self.distance_gain
    }

    /// Combined factor applied to every left-channel sample.
    #[inline]
    pub fn left(&self) -> f32 {
        self.common() * self.gain_left
    }

    /// Combined factor applied to every right-channel sample.
    #[inline]
    pub fn right(&self) -> f32 {
        self.common() * self.gain_right
    }
}
