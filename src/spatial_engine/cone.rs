// =========================
// Sound cone (directivity)
// =========================

use crate::math::Vector2D;
use crate::spatial_engine::types::{ListenerGeometry, SourceGeometry};

/// Gain of a directional source as seen from a listener at `angle` degrees
/// off the source axis.
///
/// The cone apertures are full angles, hence the comparison against
/// `2 * angle`:
/// - inside the inner cone → `1.0`
/// - outside the outer cone → `outer_gain`
/// - in between → linear crossfade from `1.0` to `outer_gain`
///
/// With `inner_angle == outer_angle` the crossfade collapses to a hard
/// threshold (the boundary itself counts as inside). Non-finite inputs give
/// unity gain.
pub fn cone_gain(angle: f32, inner_angle: f32, outer_angle: f32, outer_gain: f32) -> f32 {
    if !(angle.is_finite()
        && inner_angle.is_finite()
        && outer_angle.is_finite()
        && outer_gain.is_finite())
    {
        return 1.0;
    }

    let aperture = 2.0 * angle;
    if aperture < inner_angle {
        1.0
    } else if aperture > outer_angle {
        outer_gain
    } else {
        let width = outer_angle - inner_angle;
        if width <= 0.0 {
            return 1.0;
        }
        1.0 + (outer_gain - 1.0) * (aperture - inner_angle) / width
    }
}

/// Unsigned angle between the source axis and the source → listener vector.
pub fn source_listener_angle(source: &SourceGeometry, listener: &ListenerGeometry) -> f32 {
    let source_to_listener: Vector2D = listener.position - source.position;
    source_to_listener.angle_between(source.orientation, false)
}

/// Cone gain for a full source/listener pair.
pub fn cone_gain_for(source: &SourceGeometry, listener: &ListenerGeometry) -> f32 {
    cone_gain(
        source_listener_angle(source, listener),
        source.cone_inner_angle,
        source.cone_outer_angle,
        source.cone_outer_gain,
    )
}
