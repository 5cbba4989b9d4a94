//! Animatable values
//!
//! Linear interpolation for the properties an entrance animation touches.

use serde::{Deserialize, Serialize};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

/// Visual state of a revealed container
///
/// Translations are in logical pixels, scale is uniform around the
/// element's center.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealStyle {
    pub opacity: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
}

impl RevealStyle {
    /// Fully shown at rest
    pub const VISIBLE: RevealStyle = RevealStyle {
        opacity: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    pub const fn new(opacity: f32, translate_x: f32, translate_y: f32, scale: f32) -> Self {
        Self {
            opacity,
            translate_x,
            translate_y,
            scale,
        }
    }

    /// Transparent, offset by (dx, dy)
    pub const fn hidden_offset(dx: f32, dy: f32) -> Self {
        Self::new(0.0, dx, dy, 1.0)
    }

    /// CSS `transform` value for this style
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

impl Default for RevealStyle {
    fn default() -> Self {
        Self::VISIBLE
    }
}

impl Interpolate for RevealStyle {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        RevealStyle {
            opacity: self.opacity.lerp(&other.opacity, t),
            translate_x: self.translate_x.lerp(&other.translate_x, t),
            translate_y: self.translate_y.lerp(&other.translate_y, t),
            scale: self.scale.lerp(&other.scale, t),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.opacity.approx_eq(&other.opacity, epsilon)
            && self.translate_x.approx_eq(&other.translate_x, epsilon)
            && self.translate_y.approx_eq(&other.translate_y, epsilon)
            && self.scale.approx_eq(&other.scale, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_interpolation() {
        assert!((0.0_f32.lerp(&1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((10.0_f32.lerp(&20.0, 0.25) - 12.5).abs() < 1e-6);
    }

    #[test]
    fn test_style_interpolation() {
        let hidden = RevealStyle::new(0.0, 0.0, 40.0, 0.9);
        let mid = hidden.lerp(&RevealStyle::VISIBLE, 0.5);

        assert!(mid.approx_eq(&RevealStyle::new(0.5, 0.0, 20.0, 0.95), 1e-6));
        assert!(hidden.lerp(&RevealStyle::VISIBLE, 1.0).approx_eq(&RevealStyle::VISIBLE, 1e-6));
    }

    #[test]
    fn test_css_transform() {
        assert_eq!(
            RevealStyle::hidden_offset(-40.0, 0.0).css_transform(),
            "translate(-40px, 0px) scale(1)"
        );
    }
}
