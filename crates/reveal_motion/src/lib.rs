//! Reveal Motion
//!
//! Containers that play an entrance animation when their element scrolls
//! into view.
//!
//! - [`Reveal`]: one section, hidden until observed, then animated with a
//!   named variant
//! - [`RevealGroup`]: a list whose items reveal in sequence, each gated by
//!   its own observer
//!
//! The [`prelude`] also re-exports the three composable primitives pages
//! build on: [`use_visibility`](reveal_core::use_visibility),
//! [`resolve_variant`](reveal_animation::resolve_variant) and
//! [`plan_stagger`](reveal_animation::plan_stagger).

pub mod group;
pub mod reveal;

pub use group::{ItemPhaseCallback, MountedRevealGroup, RevealGroup};
pub use reveal::{reveal, MountedReveal, PhaseCallback, Reveal, RevealEvent, RevealPhase};

/// Everything needed to mount reveal containers
pub mod prelude {
    pub use crate::group::{MountedRevealGroup, RevealGroup};
    pub use crate::reveal::{reveal, MountedReveal, Reveal, RevealPhase};

    pub use reveal_animation::{
        plan_stagger, resolve_variant, AnimationVariant, Easing, RevealStyle, StaggerPlan,
        VariantName,
    };
    pub use reveal_core::{
        use_visibility, ElementId, LayoutSource, ObserverHost, Rect, RootMargin, Subscription,
        VisibilityConfig,
    };
}
