use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::MAX_LAYER;

/// Common math types re-exported for convenience.
pub use glam::Vec2;

/// Position, orientation, and non-uniform scale of a scene node.
///
/// Y is up and +Z is the local forward axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Unit vector the node is facing (+Z rotated into world space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Unit vector pointing to the node's right (+X rotated into world space).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Transform at the origin rotated by `yaw` around Y, then `pitch`
    /// around the local X axis (radians).
    pub fn looking(yaw: f32, pitch: f32) -> Self {
        Self {
            rotation: Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0),
            ..Self::default()
        }
    }
}

/// Linear RGBA color. Channels are not clamped; out-of-range values pass
/// through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same RGB with the alpha channel replaced.
    pub const fn with_alpha(self, a: f32) -> Color {
        Color {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Minimal UI image component: a quad tinted by `color`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Image {
    pub color: Color,
}

impl Image {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

/// Bitmask over scene layers 0 through 31, used for collision and
/// rendering filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// True iff the bit for `layer` is set. Indices above
    /// [`MAX_LAYER`] are never contained.
    pub fn contains(self, layer: u32) -> bool {
        layer <= MAX_LAYER && self.0 & (1 << layer) != 0
    }

    /// Mask with `layer`'s bit set. Out-of-range indices leave the mask
    /// unchanged.
    pub fn with(self, layer: u32) -> LayerMask {
        if layer > MAX_LAYER {
            return self;
        }
        LayerMask(self.0 | (1 << layer))
    }

    /// Mask with `layer`'s bit cleared. Out-of-range indices leave the
    /// mask unchanged.
    pub fn without(self, layer: u32) -> LayerMask {
        if layer > MAX_LAYER {
            return self;
        }
        LayerMask(self.0 & !(1 << layer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn with_alpha_preserves_rgb() {
        let color = Color::rgba(0.2, 0.4, 0.6, 1.0);
        let faded = color.with_alpha(0.25);

        assert_eq!(faded.r, color.r);
        assert_eq!(faded.g, color.g);
        assert_eq!(faded.b, color.b);
        assert_eq!(faded.a, 0.25);
    }

    #[test]
    fn with_alpha_passes_out_of_range_values_through() {
        let faded = Color::WHITE.with_alpha(1.5);
        assert_eq!(faded.a, 1.5);
    }

    #[test]
    fn layer_mask_membership() {
        let mask = LayerMask::NONE.with(3).with(31);

        assert!(mask.contains(3));
        assert!(mask.contains(31));
        assert!(!mask.contains(0));
        assert!(!mask.without(3).contains(3));
    }

    #[test]
    fn layer_mask_rejects_out_of_range_indices() {
        assert!(!LayerMask::ALL.contains(32));
        assert!(!LayerMask::ALL.contains(u32::MAX));
        assert_eq!(LayerMask::NONE.with(40), LayerMask::NONE);
    }

    #[test]
    fn default_transform_basis() {
        let transform = Transform::default();
        assert_eq!(transform.forward(), Vec3::Z);
        assert_eq!(transform.right(), Vec3::X);
    }

    #[test]
    fn pitched_transform_points_forward_vertically() {
        let down = Transform::looking(0.0, FRAC_PI_2);
        assert!(down.forward().y < -0.999);
    }
}
