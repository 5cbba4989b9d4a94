//! Easing curves
//!
//! CSS-compatible timing functions. Every named curve is a cubic bezier; the
//! variant table stores its curves as explicit control points.

use serde::{Deserialize, Serialize};

/// Timing function mapping linear progress in [0, 1] to eased progress
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// No easing
    Linear,
    /// CSS `ease`, `cubic-bezier(0.25, 0.1, 0.25, 1.0)`
    #[default]
    Ease,
    /// CSS `ease-in`, `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// CSS `ease-out`, `cubic-bezier(0, 0, 0.58, 1)`
    EaseOut,
    /// CSS `ease-in-out`, `cubic-bezier(0.42, 0, 0.58, 1)`
    EaseInOut,
    /// Custom curve through control points (x1, y1) and (x2, y2)
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    /// Custom cubic bezier
    ///
    /// x coordinates are clamped into [0, 1] so the curve stays a function of
    /// time; y coordinates may overshoot.
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Easing::CubicBezier {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    /// Control points as `[x1, y1, x2, y2]`
    pub fn control_points(&self) -> [f32; 4] {
        match *self {
            Easing::Linear => [0.0, 0.0, 1.0, 1.0],
            Easing::Ease => [0.25, 0.1, 0.25, 1.0],
            Easing::EaseIn => [0.42, 0.0, 1.0, 1.0],
            Easing::EaseOut => [0.0, 0.0, 0.58, 1.0],
            Easing::EaseInOut => [0.42, 0.0, 0.58, 1.0],
            Easing::CubicBezier { x1, y1, x2, y2 } => [x1, y1, x2, y2],
        }
    }

    /// Eased progress for `t` (clamped to [0, 1])
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            _ => {
                let [x1, y1, x2, y2] = self.control_points();
                cubic_bezier(x1, y1, x2, y2, t)
            }
        }
    }
}

impl From<[f32; 4]> for Easing {
    fn from([x1, y1, x2, y2]: [f32; 4]) -> Self {
        Easing::cubic_bezier(x1, y1, x2, y2)
    }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, progress: f32) -> f32 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let t = solve_bezier_x(x1, x2, progress);
    bezier_component(y1, y2, t)
}

/// Find the curve parameter whose x equals `target_x`
///
/// Newton-Raphson first; falls back to bisection when the slope is too flat
/// to converge.
fn solve_bezier_x(x1: f32, x2: f32, target_x: f32) -> f32 {
    const EPSILON: f32 = 1e-6;

    let mut t = target_x;
    for _ in 0..8 {
        let x = bezier_component(x1, x2, t) - target_x;
        if x.abs() < EPSILON {
            return t;
        }
        let dx = bezier_derivative(x1, x2, t);
        if dx.abs() < EPSILON {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    t = target_x;
    for _ in 0..32 {
        let x = bezier_component(x1, x2, t);
        if (x - target_x).abs() < EPSILON {
            break;
        }
        if x < target_x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    t
}

/// One coordinate of a bezier with endpoints 0 and 1:
/// `3(1-t)²t·p1 + 3(1-t)t²·p2 + t³`
#[inline]
fn bezier_component(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

#[inline]
fn bezier_derivative(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Easing; 6] = [
        Easing::Linear,
        Easing::Ease,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::CubicBezier {
            x1: 0.22,
            y1: 1.0,
            x2: 0.36,
            y2: 1.0,
        },
    ];

    #[test]
    fn test_endpoints() {
        for easing in CURVES {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
            assert_eq!(easing.apply(-3.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(7.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn test_monotonic() {
        for easing in CURVES {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v + 1e-4 >= prev, "{easing:?} not monotonic at {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_ease_in_out_symmetric() {
        let mid = Easing::EaseInOut.apply(0.5);
        assert!((mid - 0.5).abs() < 1e-3);

        let a = Easing::EaseInOut.apply(0.25);
        let b = Easing::EaseInOut.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_ease_out_leads_linear() {
        assert!(Easing::EaseOut.apply(0.3) > 0.3);
        assert!(Easing::EaseIn.apply(0.3) < 0.3);
    }

    #[test]
    fn test_linear_bezier_matches_linear() {
        let bezier = Easing::cubic_bezier(0.0, 0.0, 1.0, 1.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((bezier.apply(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn test_control_points_round_trip() {
        let easing = Easing::from([0.25, 0.1, 0.25, 1.0]);
        assert_eq!(easing.control_points(), Easing::Ease.control_points());
        assert_eq!(
            Easing::cubic_bezier(-1.0, 0.0, 2.0, 1.0).control_points(),
            [0.0, 0.0, 1.0, 1.0]
        );
    }
}
