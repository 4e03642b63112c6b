//! Math helpers layered on top of `glam`.

use glam::{Vec2, Vec3};

use crate::config::DEFAULT_DECIMALS;
use crate::core::types::Transform;

/// Component-replacement helpers for copy-semantics vectors.
pub trait Vec3Ext {
    /// Returns the vector with only `x` replaced.
    fn with_x(self, x: f32) -> Vec3;

    /// Returns the vector with only `y` replaced.
    fn with_y(self, y: f32) -> Vec3;

    /// Returns the vector with only `z` replaced.
    fn with_z(self, z: f32) -> Vec3;
}

impl Vec3Ext for Vec3 {
    fn with_x(self, x: f32) -> Vec3 {
        Vec3::new(x, self.y, self.z)
    }

    fn with_y(self, y: f32) -> Vec3 {
        Vec3::new(self.x, y, self.z)
    }

    fn with_z(self, z: f32) -> Vec3 {
        Vec3::new(self.x, self.y, z)
    }
}

/// Maps a 2D input (x = strafe, y = forward/back) into world space
/// relative to `camera`'s orientation, flattened onto the horizontal
/// plane. The result is normalized.
///
/// Without a camera the input passes through as `(x, y, 0)`. A combined
/// direction of zero length (no input, or a camera pitched straight
/// up/down with no strafe) comes back as `Vec3::ZERO` rather than NaN.
pub fn camera_relative_input(camera: Option<&Transform>, input: Vec2) -> Vec3 {
    let Some(camera) = camera else {
        return Vec3::new(input.x, input.y, 0.0);
    };

    let forward = camera.forward().with_y(0.0).normalize_or_zero();
    let right = camera.right().with_y(0.0).normalize_or_zero();

    (forward * input.y + right * input.x).normalize_or_zero()
}

/// Initial vertical speed needed to reach `height` under `gravity`,
/// from v² = 2·g·h. The sign of `gravity` is folded away; `height` is
/// not validated and must be non-negative for a meaningful result.
pub fn jump_force(height: f32, gravity: f32) -> f32 {
    (2.0 * gravity.abs() * height).sqrt()
}

/// Fixed-point formatting with a caller-chosen number of fractional digits.
pub fn format_fixed(value: f32, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// [`format_fixed`] with the crate default precision.
pub fn format_fixed_default(value: f32) -> String {
    format_fixed(value, DEFAULT_DECIMALS)
}
