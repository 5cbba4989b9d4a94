//! Entrance animation variants
//!
//! A closed set of named entrance animations. Each variant pairs a hidden
//! style with the visible rest style and carries its own timing. Variants
//! live in a static table and are never mutated; lookups by string fall back
//! to [`VariantName::FadeUp`] so a typo degrades to the default animation
//! instead of hiding content.
//!
//! ```rust
//! use reveal_animation::{resolve_variant, VariantName};
//!
//! let fade_up = resolve_variant("fade-up");
//! assert_eq!(fade_up.name, VariantName::FadeUp);
//!
//! // Unknown names resolve to the same static entry
//! assert!(std::ptr::eq(resolve_variant("fade-upp"), fade_up));
//!
//! // Strict parsing still reports the typo
//! assert!("fade-upp".parse::<VariantName>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use reveal_core::RevealError;
use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::values::{Interpolate, RevealStyle};

/// Distance travelled by the fade variants (px)
pub const FADE_DISTANCE: f32 = 40.0;

/// Distance travelled by `slide-up` (px)
pub const SLIDE_DISTANCE: f32 = 100.0;

/// Starting scale of `scale-in`
pub const SCALE_IN_FROM: f32 = 0.85;

/// Curve shared by the fade variants, a fast start with a long settle
const EASE_OUT_QUINT: Easing = Easing::CubicBezier {
    x1: 0.22,
    y1: 1.0,
    x2: 0.36,
    y2: 1.0,
};

/// Names of the available entrance animations
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum VariantName {
    /// Fade in while moving up
    #[default]
    FadeUp,
    /// Fade in while moving down
    FadeDown,
    /// Fade in while moving left (enters from the right)
    FadeLeft,
    /// Fade in while moving right (enters from the left)
    FadeRight,
    /// Fade in while growing to full size
    ScaleIn,
    /// Fade in while travelling a longer distance upward
    SlideUp,
}

impl VariantName {
    /// Every variant, in table order
    pub const ALL: [VariantName; 6] = [
        VariantName::FadeUp,
        VariantName::FadeDown,
        VariantName::FadeLeft,
        VariantName::FadeRight,
        VariantName::ScaleIn,
        VariantName::SlideUp,
    ];

    /// Kebab-case name
    pub const fn as_str(self) -> &'static str {
        match self {
            VariantName::FadeUp => "fade-up",
            VariantName::FadeDown => "fade-down",
            VariantName::FadeLeft => "fade-left",
            VariantName::FadeRight => "fade-right",
            VariantName::ScaleIn => "scale-in",
            VariantName::SlideUp => "slide-up",
        }
    }

    /// The static variant definition
    pub fn variant(self) -> &'static AnimationVariant {
        // Table order matches the enum discriminants
        &VARIANTS[self as usize]
    }
}

impl fmt::Display for VariantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantName {
    type Err = RevealError;

    /// Accepts `fade-up`, `fade_up`, `fadeUp` and `FadeUp` spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_name(s);
        VariantName::ALL
            .into_iter()
            .find(|name| name.as_str() == normalized)
            .ok_or_else(|| RevealError::UnknownVariant(s.to_string()))
    }
}

fn normalize_name(name: &str) -> String {
    let name = name.trim();
    let camel = name.chars().any(|c| c.is_ascii_lowercase());
    let mut out = String::with_capacity(name.len() + 2);

    for ch in name.chars() {
        if ch == '_' || ch == ' ' {
            out.push('-');
        } else if camel && ch.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch.to_ascii_lowercase());
        }
    }

    out
}

/// A named entrance animation
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnimationVariant {
    pub name: VariantName,
    /// Style before the reveal starts
    pub hidden: RevealStyle,
    /// Style once the reveal completes
    pub visible: RevealStyle,
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub easing: Easing,
}

static VARIANTS: [AnimationVariant; 6] = [
    AnimationVariant {
        name: VariantName::FadeUp,
        hidden: RevealStyle::hidden_offset(0.0, FADE_DISTANCE),
        visible: RevealStyle::VISIBLE,
        duration_ms: 600,
        delay_ms: 0,
        easing: EASE_OUT_QUINT,
    },
    AnimationVariant {
        name: VariantName::FadeDown,
        hidden: RevealStyle::hidden_offset(0.0, -FADE_DISTANCE),
        visible: RevealStyle::VISIBLE,
        duration_ms: 600,
        delay_ms: 0,
        easing: EASE_OUT_QUINT,
    },
    AnimationVariant {
        name: VariantName::FadeLeft,
        hidden: RevealStyle::hidden_offset(FADE_DISTANCE, 0.0),
        visible: RevealStyle::VISIBLE,
        duration_ms: 600,
        delay_ms: 0,
        easing: EASE_OUT_QUINT,
    },
    AnimationVariant {
        name: VariantName::FadeRight,
        hidden: RevealStyle::hidden_offset(-FADE_DISTANCE, 0.0),
        visible: RevealStyle::VISIBLE,
        duration_ms: 600,
        delay_ms: 0,
        easing: EASE_OUT_QUINT,
    },
    AnimationVariant {
        name: VariantName::ScaleIn,
        hidden: RevealStyle::new(0.0, 0.0, 0.0, SCALE_IN_FROM),
        visible: RevealStyle::VISIBLE,
        duration_ms: 500,
        delay_ms: 0,
        easing: Easing::CubicBezier {
            x1: 0.25,
            y1: 0.1,
            x2: 0.25,
            y2: 1.0,
        },
    },
    AnimationVariant {
        name: VariantName::SlideUp,
        hidden: RevealStyle::hidden_offset(0.0, SLIDE_DISTANCE),
        visible: RevealStyle::VISIBLE,
        duration_ms: 800,
        delay_ms: 0,
        easing: Easing::CubicBezier {
            x1: 0.16,
            y1: 1.0,
            x2: 0.3,
            y2: 1.0,
        },
    },
];

/// Look up a variant by name, falling back to `fade-up`
pub fn resolve_variant(name: &str) -> &'static AnimationVariant {
    match name.parse::<VariantName>() {
        Ok(variant) => variant.variant(),
        Err(_) => {
            tracing::warn!(name, "unknown animation variant, using fade-up");
            VariantName::default().variant()
        }
    }
}

impl AnimationVariant {
    /// Copy with a different duration
    pub fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Copy with a different delay
    pub fn with_delay_ms(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Time from trigger to rest, delay included
    pub fn total_ms(&self) -> u32 {
        self.delay_ms.saturating_add(self.duration_ms)
    }

    /// Linear progress in [0, 1] at `elapsed_ms` after the trigger
    pub fn progress_at(&self, elapsed_ms: f32) -> f32 {
        let active = elapsed_ms - self.delay_ms as f32;
        if active <= 0.0 {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        (active / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Style at `elapsed_ms` after the trigger
    ///
    /// Hidden until the delay passes, then eased toward the visible style,
    /// holding the visible style after `total_ms`.
    pub fn sample(&self, elapsed_ms: f32) -> RevealStyle {
        let progress = self.progress_at(elapsed_ms);
        if progress <= 0.0 {
            return self.hidden;
        }
        if progress >= 1.0 {
            return self.visible;
        }
        self.hidden.lerp(&self.visible, self.easing.apply(progress))
    }
}
