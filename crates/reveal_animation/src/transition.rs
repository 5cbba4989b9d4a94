//! Reveal transition clock
//!
//! Drives one variant from hidden to visible as frame time advances. The
//! style at any moment is [`AnimationVariant::sample`] of the elapsed time,
//! so the clock only has to track time and whether it is running.

use crate::values::RevealStyle;
use crate::variant::AnimationVariant;

/// Timed hidden-to-visible transition for one container
#[derive(Clone, Debug)]
pub struct Transition {
    variant: AnimationVariant,
    /// Time since the trigger, in milliseconds
    elapsed_ms: f32,
    playing: bool,
}

impl Transition {
    /// Create an idle transition; the style is hidden until `start`
    pub fn new(variant: AnimationVariant) -> Self {
        Self {
            variant,
            elapsed_ms: 0.0,
            playing: false,
        }
    }

    pub fn variant(&self) -> &AnimationVariant {
        &self.variant
    }

    /// Start from the beginning, delay included
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.playing = true;
    }

    /// Stop and return to the hidden style
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
        self.playing = false;
    }

    /// Jump to the visible style
    pub fn finish(&mut self) {
        self.elapsed_ms = self.variant.total_ms() as f32;
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the transition ran to completion
    pub fn is_finished(&self) -> bool {
        !self.playing && self.elapsed_ms >= self.variant.total_ms() as f32
    }

    /// Whether the start delay has elapsed and the style is moving
    pub fn is_in_motion(&self) -> bool {
        self.playing && self.elapsed_ms > self.variant.delay_ms as f32
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Linear progress of the active (post-delay) part, 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        self.variant.progress_at(self.elapsed_ms)
    }

    /// Advance by `dt_ms`
    ///
    /// Returns true while the transition still needs frames.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.playing {
            return false;
        }

        self.elapsed_ms += dt_ms.max(0.0);
        let total = self.variant.total_ms() as f32;
        if self.elapsed_ms >= total {
            self.elapsed_ms = total;
            self.playing = false;
        }

        self.playing
    }

    /// Current style
    pub fn style(&self) -> RevealStyle {
        self.variant.sample(self.elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::resolve_variant;

    #[test]
    fn test_idle_transition_is_hidden() {
        let mut transition = Transition::new(*resolve_variant("fade-up"));
        assert_eq!(transition.style(), transition.variant().hidden);
        assert!(!transition.tick(1000.0));
        assert_eq!(transition.style(), transition.variant().hidden);
    }

    #[test]
    fn test_runs_through_delay_and_duration() {
        let variant = resolve_variant("fade-up").with_delay_ms(200);
        let mut transition = Transition::new(variant);
        transition.start();

        assert!(transition.tick(150.0));
        assert!(!transition.is_in_motion());
        assert_eq!(transition.style(), variant.hidden);

        assert!(transition.tick(350.0));
        assert!(transition.is_in_motion());
        assert!((transition.progress() - 0.5).abs() < 1e-6);

        assert!(!transition.tick(1000.0));
        assert!(transition.is_finished());
        assert_eq!(transition.style(), RevealStyle::VISIBLE);
        assert_eq!(transition.elapsed_ms(), 800.0);
    }

    #[test]
    fn test_reset_and_finish() {
        let mut transition = Transition::new(*resolve_variant("scale-in"));
        transition.start();
        transition.tick(100.0);
        transition.reset();
        assert!(!transition.is_playing());
        assert_eq!(transition.style(), transition.variant().hidden);

        transition.finish();
        assert!(transition.is_finished());
        assert_eq!(transition.style(), RevealStyle::VISIBLE);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut transition = Transition::new(*resolve_variant("fade-up"));
        transition.start();
        transition.tick(-50.0);
        assert_eq!(transition.elapsed_ms(), 0.0);
    }
}
