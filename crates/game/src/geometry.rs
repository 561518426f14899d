use std::f32::consts::{PI, TAU};

use glam::Vec2;

pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Clamps `x` so an object of half-width `half_extent` stays inside `[0, width]`.
pub fn clamp_within(x: f32, half_extent: f32, width: f32) -> f32 {
    let min = half_extent;
    let max = (width - half_extent).max(min);
    x.clamp(min, max)
}

/// Wraps an angle into `[-PI, PI]`.
pub fn normalize_angle(angle: f32) -> f32 {
    let mut normalized = angle % TAU;
    if normalized > PI {
        normalized -= TAU;
    } else if normalized < -PI {
        normalized += TAU;
    }
    normalized
}

/// Rotates `velocity` by `fraction` of the angular gap towards `target_dir`,
/// keeping the magnitude at `speed`.
pub fn steer_toward(velocity: Vec2, target_dir: Vec2, fraction: f32, speed: f32) -> Vec2 {
    if target_dir.length_squared() < f32::EPSILON {
        return velocity;
    }
    let current = velocity.y.atan2(velocity.x);
    let desired = target_dir.y.atan2(target_dir.x);
    let delta = normalize_angle(desired - current);
    let angle = current + delta * fraction.clamp(0.0, 1.0);
    Vec2::from_angle(angle) * speed
}

/// Scales an amount tuned per reference frame to the given frame length.
pub fn frame_scale(dt_ms: f32) -> f32 {
    dt_ms / crate::config::REFERENCE_FRAME_MS
}
