// =========================
// Constant-power pan law
// =========================

use crate::spatial_engine::types::{ListenerGeometry, SourceGeometry};

/// Left/right gains for a signed azimuth in degrees.
///
/// `θ = azimuth / 2 + 45°`, `left = cos θ`, `right = sin θ`. Azimuth `0`
/// gives `cos 45° = sin 45°` on both channels (-3 dB), `±90°` puts the source
/// fully on one side. Both gains stay within `[-1, 1]` and `left² + right² = 1`.
/// A non-finite azimuth is treated as centred.
pub fn pan_gains(azimuth: f32) -> (f32, f32) {
    let azimuth = if azimuth.is_finite() { azimuth } else { 0.0 };
    let theta = ((azimuth as f64 / 2.0 + 45.0) * std::f64::consts::PI / 180.0) as f32;
    (theta.cos(), theta.sin())
}

/// Signed angle between the listener's forward vector and the listener →
/// source vector. Positive when the source is clockwise (to the right).
pub fn azimuth(source: &SourceGeometry, listener: &ListenerGeometry) -> f32 {
    let listener_to_source = source.position - listener.position;
    listener.forward.angle_between(listener_to_source, true)
}

pub fn pan_gains_for(source: &SourceGeometry, listener: &ListenerGeometry) -> (f32, f32) {
    pan_gains(azimuth(source, listener))
}
