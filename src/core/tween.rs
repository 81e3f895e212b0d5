//! Easing curves and interpolation helpers.

use bevy::prelude::*;

/// Quadratic ease-out: fast start, decelerating toward the target.
///
/// Maps `u` in `[0, 1]` to `1 - (1 - u)^2`.
pub fn ease_out(u: f32) -> f32 {
    1.0 - (1.0 - u).powi(2)
}

/// Linear interpolation between two points, `(1 - u) * p0 + u * p1`.
pub fn lerp_points(p0: Vec3, p1: Vec3, u: f32) -> Vec3 {
    (1.0 - u) * p0 + u * p1
}
