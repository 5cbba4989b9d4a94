//! Reveal Animation System
//!
//! Timing and styling for scroll-triggered entrance animations.
//!
//! # Features
//!
//! - **Easing**: CSS-compatible cubic-bezier timing functions
//! - **Variants**: a closed table of entrance animations (`fade-up`,
//!   `fade-down`, `fade-left`, `fade-right`, `scale-in`, `slide-up`) with a
//!   fail-open default for unknown names
//! - **Stagger**: linear per-item delays so lists reveal in sequence
//! - **Transitions**: a frame-driven clock sampling a variant over time

pub mod easing;
pub mod stagger;
pub mod transition;
pub mod values;
pub mod variant;

pub use easing::Easing;
pub use stagger::{plan_stagger, secs_to_ms, step_secs_to_ms, GroupVisibility, StaggerPlan};
pub use transition::Transition;
pub use values::{Interpolate, RevealStyle};
pub use variant::{resolve_variant, AnimationVariant, VariantName};
