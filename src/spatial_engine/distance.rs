// =========================
// Distance attenuation
// =========================

use crate::spatial_engine::types::{DistanceModel, ListenerGeometry, SourceGeometry};

/// Linear-distance-clamped inverse model:
/// `ref / (ref + rolloff * (distance - ref))`, unity inside `ref`.
///
/// Guards:
/// - negative or non-finite `rolloff` counts as `0` (no attenuation)
/// - non-positive / non-finite `ref_distance` or NaN `distance` → `1.0`
/// - infinite `distance` → `0.0`, or `1.0` without rolloff
/// - a non-positive denominator → `0.0`
///
/// The result always lies in `[0, 1]` and never increases with distance.
pub fn distance_gain(distance: f32, model: &DistanceModel) -> f32 {
    let ref_distance = model.ref_distance;
    if !(ref_distance > 0.0 && ref_distance.is_finite()) || distance.is_nan() {
        return 1.0;
    }
    if distance < ref_distance {
        return 1.0;
    }

    let rolloff = if model.rolloff.is_finite() {
        model.rolloff.max(0.0)
    } else {
        0.0
    };
    if rolloff == 0.0 {
        return 1.0;
    }
    if distance.is_infinite() {
        return 0.0;
    }

    let denominator = ref_distance + rolloff * (distance - ref_distance);
    if denominator.is_nan() || denominator <= 0.0 {
        return 0.0;
    }
    (ref_distance / denominator).clamp(0.0, 1.0)
}

/// Euclidean distance between source and listener.
pub fn source_listener_distance(source: &SourceGeometry, listener: &ListenerGeometry) -> f32 {
    (source.position - listener.position).magnitude()
}

pub fn distance_gain_for(
    source: &SourceGeometry,
    listener: &ListenerGeometry,
    model: &DistanceModel,
) -> f32 {
    distance_gain(source_listener_distance(source, listener), model)
}
