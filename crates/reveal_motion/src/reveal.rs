//! Scroll-triggered reveal container
//!
//! Wraps content, keeps it in the variant's hidden style until its element
//! is observed in view, then animates it to the visible style.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use reveal_motion::prelude::*;
//!
//! let host = ObserverHost::new();
//! let hero = ElementId::new(1);
//!
//! let mut section = reveal("Precision engineering since 1984", "fade-up")
//!     .delay_ms(100)
//!     .mount(&host, hero);
//! assert_eq!(section.phase(), RevealPhase::Hidden);
//!
//! let layout = HashMap::from([(hero, Rect::new(0.0, 0.0, 1280.0, 600.0))]);
//! host.evaluate(Rect::new(0.0, 0.0, 1280.0, 800.0), &layout);
//! assert_eq!(section.phase(), RevealPhase::Revealing);
//!
//! while section.tick(16.0) {}
//! assert_eq!(section.phase(), RevealPhase::Revealed);
//! assert_eq!(section.computed_style(), RevealStyle::VISIBLE);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use reveal_animation::{resolve_variant, AnimationVariant, RevealStyle, Transition, VariantName};
use reveal_core::{ElementId, ObserverHost, Subscription, VisibilityConfig};

/// Lifecycle of a reveal container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RevealPhase {
    /// Showing the hidden style, waiting to be seen
    #[default]
    Hidden,
    /// Transition in progress (including its start delay)
    Revealing,
    /// Showing the visible style
    Revealed,
}

/// Inputs that drive [`RevealPhase`] transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealEvent {
    /// Element entered the root
    Enter,
    /// Element left the root (repeatable observation only)
    Exit,
    /// Transition reached the visible style
    Completed,
}

impl RevealPhase {
    /// Handle an event and return the new phase, or None if no transition
    pub fn on_event(&self, event: RevealEvent) -> Option<Self> {
        use RevealEvent::*;
        use RevealPhase::*;

        match (self, event) {
            (Hidden, Enter) => Some(Revealing),
            // Re-entrant triggers never restart a running transition
            (Revealing, Enter) => None,
            (Revealing, Completed) => Some(Revealed),
            (Revealing, Exit) | (Revealed, Exit) => Some(Hidden),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            RevealPhase::Hidden => "hidden",
            RevealPhase::Revealing => "revealing",
            RevealPhase::Revealed => "revealed",
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, RevealPhase::Hidden)
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self, RevealPhase::Revealed)
    }
}

/// Callback invoked on every phase change
pub type PhaseCallback = Rc<dyn Fn(RevealPhase)>;

struct SectionState {
    phase: RevealPhase,
    transition: Transition,
    once: bool,
}

impl SectionState {
    fn handle(&mut self, event: RevealEvent) -> Option<RevealPhase> {
        if self.once && event == RevealEvent::Exit {
            return None;
        }

        let next = self.phase.on_event(event)?;
        match next {
            RevealPhase::Revealing => self.transition.start(),
            RevealPhase::Hidden => self.transition.reset(),
            RevealPhase::Revealed => self.transition.finish(),
        }
        tracing::trace!(from = ?self.phase, to = ?next, "reveal phase change");
        self.phase = next;
        Some(next)
    }
}

/// Builder for a reveal container
pub struct Reveal<C> {
    children: C,
    variant: &'static AnimationVariant,
    delay_ms: Option<u32>,
    duration_ms: Option<u32>,
    stagger_offset_ms: u32,
    config: VisibilityConfig,
    on_phase_change: Option<PhaseCallback>,
}

/// Wrap content in a reveal container using a named variant
///
/// Unknown names use `fade-up`.
pub fn reveal<C>(children: C, variant: &str) -> Reveal<C> {
    Reveal::new(children, resolve_variant(variant).name)
}

impl<C> Reveal<C> {
    pub fn new(children: C, variant: VariantName) -> Self {
        Self {
            children,
            variant: variant.variant(),
            delay_ms: None,
            duration_ms: None,
            stagger_offset_ms: 0,
            config: VisibilityConfig::default(),
            on_phase_change: None,
        }
    }

    /// Override the variant's start delay
    pub fn delay_ms(mut self, delay_ms: u32) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Override the variant's duration
    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Extra delay added on top of the start delay (per-item stagger)
    pub fn stagger_offset_ms(mut self, offset_ms: u32) -> Self {
        self.stagger_offset_ms = offset_ms;
        self
    }

    /// Observation settings
    pub fn config(mut self, config: VisibilityConfig) -> Self {
        self.config = config;
        self
    }

    /// Reveal every time the element re-enters the viewport
    pub fn repeatable(mut self) -> Self {
        self.config = self.config.repeatable();
        self
    }

    /// Called after each phase change
    pub fn on_phase_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(RevealPhase) + 'static,
    {
        self.on_phase_change = Some(Rc::new(callback));
        self
    }

    /// The variant with overrides and stagger offset applied
    pub fn effective_variant(&self) -> AnimationVariant {
        let mut variant = *self.variant;
        if let Some(duration) = self.duration_ms {
            variant = variant.with_duration_ms(duration);
        }
        let delay = self.delay_ms.unwrap_or(variant.delay_ms);
        variant.with_delay_ms(delay.saturating_add(self.stagger_offset_ms))
    }

    /// Attach to an element and start observing it
    pub fn mount(self, host: &ObserverHost, element: ElementId) -> MountedReveal<C> {
        let variant = self.effective_variant();
        let state = Rc::new(RefCell::new(SectionState {
            phase: RevealPhase::Hidden,
            transition: Transition::new(variant),
            once: self.config.once,
        }));

        let weak = Rc::downgrade(&state);
        let hook = self.on_phase_change.clone();
        let subscription = host.observe(element, self.config, move |visible| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let event = if visible {
                RevealEvent::Enter
            } else {
                RevealEvent::Exit
            };
            // Release the borrow before user code runs
            let changed = state.borrow_mut().handle(event);
            if let (Some(phase), Some(hook)) = (changed, hook.as_ref()) {
                hook(phase);
            }
        });

        tracing::debug!(
            element = element.raw(),
            variant = %variant.name,
            delay_ms = variant.delay_ms,
            duration_ms = variant.duration_ms,
            "reveal mounted"
        );

        MountedReveal {
            subscription,
            state,
            on_phase_change: self.on_phase_change,
            element,
            children: self.children,
        }
    }
}

/// A reveal container attached to an element
///
/// Dropping it (or calling [`MountedReveal::unmount`]) disposes the
/// observation before the container state is released.
pub struct MountedReveal<C> {
    // Declared first so it is dropped first
    subscription: Subscription,
    state: Rc<RefCell<SectionState>>,
    on_phase_change: Option<PhaseCallback>,
    element: ElementId,
    children: C,
}

impl<C> MountedReveal<C> {
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn children(&self) -> &C {
        &self.children
    }

    pub fn phase(&self) -> RevealPhase {
        self.state.borrow().phase
    }

    /// Whether the observer currently reports the element in view
    pub fn is_visible(&self) -> bool {
        self.subscription.is_visible()
    }

    /// Whether the element is still being observed
    pub fn is_observing(&self) -> bool {
        self.subscription.is_active()
    }

    /// Variant timing in effect, overrides included
    pub fn variant(&self) -> AnimationVariant {
        *self.state.borrow().transition.variant()
    }

    /// Total start delay (variant or explicit delay plus stagger offset)
    pub fn delay_ms(&self) -> u32 {
        self.variant().delay_ms
    }

    /// Time since the transition started, including the delay
    pub fn elapsed_ms(&self) -> f32 {
        self.state.borrow().transition.elapsed_ms()
    }

    /// Style to render right now
    pub fn computed_style(&self) -> RevealStyle {
        self.state.borrow().transition.style()
    }

    /// Advance the transition by `dt_ms`
    ///
    /// Returns true while the container still needs frames.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let changed = {
            let mut state = self.state.borrow_mut();
            if state.phase != RevealPhase::Revealing {
                return false;
            }
            if state.transition.tick(dt_ms) {
                return true;
            }
            state.handle(RevealEvent::Completed)
        };

        if let (Some(phase), Some(hook)) = (changed, self.on_phase_change.as_ref()) {
            hook(phase);
        }
        false
    }

    /// Stop observing and give back the wrapped content
    pub fn unmount(self) -> C {
        let MountedReveal {
            mut subscription,
            state,
            element,
            children,
            ..
        } = self;

        subscription.dispose();
        drop(state);
        tracing::debug!(element = element.raw(), "reveal unmounted");
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reveal_core::Rect;
    use std::cell::Cell;
    use std::collections::HashMap;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1280.0, 800.0);
    const EL: ElementId = ElementId::new(1);

    fn in_view() -> HashMap<ElementId, Rect> {
        HashMap::from([(EL, Rect::new(0.0, 100.0, 1280.0, 300.0))])
    }

    fn out_of_view() -> HashMap<ElementId, Rect> {
        HashMap::from([(EL, Rect::new(0.0, 3000.0, 1280.0, 300.0))])
    }

    #[test]
    fn test_phase_transitions() {
        use RevealEvent::*;
        use RevealPhase::*;

        assert_eq!(Hidden.on_event(Enter), Some(Revealing));
        assert_eq!(Revealing.on_event(Enter), None);
        assert_eq!(Revealing.on_event(Completed), Some(Revealed));
        assert_eq!(Revealed.on_event(Exit), Some(Hidden));
        assert_eq!(Revealing.on_event(Exit), Some(Hidden));
        assert_eq!(Revealed.on_event(Enter), None);
        assert_eq!(Hidden.on_event(Exit), None);
        assert_eq!(Hidden.on_event(Completed), None);
    }

    #[test]
    fn test_hidden_until_observed() {
        let host = ObserverHost::new();
        let mut section = reveal((), "fade-up").mount(&host, EL);

        host.evaluate(VIEWPORT, &out_of_view());
        assert!(!section.tick(1000.0));
        assert_eq!(section.phase(), RevealPhase::Hidden);
        assert_eq!(section.computed_style(), section.variant().hidden);
    }

    #[test]
    fn test_reveals_after_delay() {
        let host = ObserverHost::new();
        let mut section = reveal((), "fade-left")
            .delay_ms(200)
            .duration_ms(400)
            .mount(&host, EL);

        host.evaluate(VIEWPORT, &in_view());
        assert_eq!(section.phase(), RevealPhase::Revealing);

        assert!(section.tick(200.0));
        assert_eq!(section.computed_style(), section.variant().hidden);

        assert!(section.tick(200.0));
        let mid = section.computed_style();
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);

        assert!(!section.tick(200.0));
        assert_eq!(section.phase(), RevealPhase::Revealed);
        assert_eq!(section.computed_style(), RevealStyle::VISIBLE);
    }

    #[test]
    fn test_once_revealed_is_terminal() {
        let host = ObserverHost::new();
        let mut section = reveal((), "scale-in").mount(&host, EL);

        host.evaluate(VIEWPORT, &in_view());
        while section.tick(16.0) {}
        assert_eq!(section.phase(), RevealPhase::Revealed);
        assert!(!section.is_observing());

        for _ in 0..3 {
            host.evaluate(VIEWPORT, &out_of_view());
            host.evaluate(VIEWPORT, &in_view());
            section.tick(16.0);
            assert_eq!(section.phase(), RevealPhase::Revealed);
        }
    }

    #[test]
    fn test_repeatable_returns_to_hidden() {
        let host = ObserverHost::new();
        let mut section = reveal((), "fade-up").repeatable().mount(&host, EL);

        host.evaluate(VIEWPORT, &in_view());
        while section.tick(16.0) {}
        assert_eq!(section.phase(), RevealPhase::Revealed);

        host.evaluate(VIEWPORT, &out_of_view());
        assert_eq!(section.phase(), RevealPhase::Hidden);
        assert_eq!(section.computed_style(), section.variant().hidden);

        host.evaluate(VIEWPORT, &in_view());
        assert_eq!(section.phase(), RevealPhase::Revealing);
    }

    #[test]
    fn test_exit_while_revealing_resets_clock() {
        let host = ObserverHost::new();
        let mut section = reveal((), "fade-up").repeatable().mount(&host, EL);

        host.evaluate(VIEWPORT, &in_view());
        assert!(section.tick(100.0));
        assert_eq!(section.elapsed_ms(), 100.0);
        let partial = section.computed_style();
        assert_ne!(partial, section.variant().hidden);

        host.evaluate(VIEWPORT, &out_of_view());
        assert_eq!(section.phase(), RevealPhase::Hidden);
        assert_eq!(section.elapsed_ms(), 0.0);
        assert_eq!(section.computed_style(), section.variant().hidden);
        assert!(!section.tick(100.0));

        host.evaluate(VIEWPORT, &in_view());
        assert_eq!(section.phase(), RevealPhase::Revealing);
        assert_eq!(section.elapsed_ms(), 0.0);
        assert!(section.tick(100.0));
        assert_eq!(section.computed_style(), partial);
    }

    #[test]
    fn test_reentrant_trigger_does_not_restart() {
        let host = ObserverHost::new();
        let mut section = reveal((), "fade-up").repeatable().mount(&host, EL);

        host.evaluate(VIEWPORT, &in_view());
        section.tick(300.0);
        let before = section.computed_style();

        // Same frame evaluated again: no crossing, no restart
        host.evaluate(VIEWPORT, &in_view());
        assert_eq!(section.phase(), RevealPhase::Revealing);
        assert_eq!(section.computed_style(), before);
    }

    #[test]
    fn test_phase_hook_sequence() {
        let host = ObserverHost::new();
        let phases = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&phases);
        let mut section = reveal((), "fade-down")
            .on_phase_change(move |phase| log.borrow_mut().push(phase))
            .mount(&host, EL);

        host.evaluate(VIEWPORT, &in_view());
        while section.tick(50.0) {}

        assert_eq!(
            *phases.borrow(),
            vec![RevealPhase::Revealing, RevealPhase::Revealed]
        );
    }

    #[test]
    fn test_unmount_mid_transition_stops_callbacks() {
        let host = ObserverHost::new();
        let calls = Rc::new(Cell::new(0));
        let spy = Rc::clone(&calls);
        let mut section = reveal("content", "fade-up")
            .repeatable()
            .on_phase_change(move |_| spy.set(spy.get() + 1))
            .mount(&host, EL);

        host.evaluate(VIEWPORT, &in_view());
        section.tick(100.0);
        assert_eq!(calls.get(), 1);
        assert_eq!(host.observed_count(), 1);

        let content = section.unmount();
        assert_eq!(content, "content");
        assert_eq!(host.observed_count(), 0);

        host.evaluate(VIEWPORT, &out_of_view());
        host.evaluate(VIEWPORT, &in_view());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_drop_before_intersecting() {
        let host = ObserverHost::new();
        let calls = Rc::new(Cell::new(0));
        let spy = Rc::clone(&calls);
        let section = reveal((), "fade-up")
            .on_phase_change(move |_| spy.set(spy.get() + 1))
            .mount(&host, EL);

        drop(section);
        assert_eq!(host.evaluate(VIEWPORT, &in_view()), 0);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_unsupported_host_reveals_immediately() {
        let host = ObserverHost::unsupported();
        let mut section = reveal((), "slide-up").mount(&host, EL);

        assert_eq!(section.phase(), RevealPhase::Revealing);
        while section.tick(16.0) {}
        assert_eq!(section.computed_style(), RevealStyle::VISIBLE);
    }

    #[test]
    fn test_unknown_variant_uses_default() {
        let host = ObserverHost::new();
        let section = reveal((), "sparkle").mount(&host, EL);
        assert_eq!(section.variant().name, VariantName::FadeUp);
    }

    #[test]
    fn test_effective_variant_offsets() {
        let builder = Reveal::new((), VariantName::SlideUp)
            .delay_ms(100)
            .stagger_offset_ms(150);
        let variant = builder.effective_variant();
        assert_eq!(variant.delay_ms, 250);
        assert_eq!(variant.duration_ms, VariantName::SlideUp.variant().duration_ms);
    }
}
