//! Staggered reveal groups
//!
//! A list whose items reveal in sequence. Every item gets its own element
//! and observer, so items that scroll into view at different times animate
//! independently; the stagger plan only decides how long each item waits
//! once its own observer has fired.
//!
//! ```rust
//! use reveal_motion::prelude::*;
//!
//! let host = ObserverHost::new();
//! let cards = ["Turbines", "Compressors", "Pumps"]
//!     .into_iter()
//!     .enumerate()
//!     .map(|(i, card)| (ElementId::new(100 + i as u64), card));
//!
//! let group = RevealGroup::new(cards, "fade-up").step_ms(150).mount(&host);
//! assert_eq!(group.delays(), vec![0, 150, 300]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use reveal_animation::{resolve_variant, GroupVisibility, RevealStyle, StaggerPlan, VariantName};
use reveal_core::{ElementId, ObserverHost, VisibilityConfig};

use crate::reveal::{MountedReveal, Reveal, RevealPhase};

/// Callback invoked with an item index on every item phase change
pub type ItemPhaseCallback = Rc<dyn Fn(usize, RevealPhase)>;

/// Builder for a staggered list of reveal containers
pub struct RevealGroup<C> {
    items: Vec<(ElementId, C)>,
    variant: VariantName,
    step_ms: u32,
    base_ms: u32,
    delay_ms: Option<u32>,
    duration_ms: Option<u32>,
    config: VisibilityConfig,
    on_item_phase_change: Option<ItemPhaseCallback>,
}

impl<C> RevealGroup<C> {
    /// Group of `(element, content)` pairs using a named variant
    ///
    /// Unknown names use `fade-up`.
    pub fn new<I>(items: I, variant: &str) -> Self
    where
        I: IntoIterator<Item = (ElementId, C)>,
    {
        Self::with_variant(items, resolve_variant(variant).name)
    }

    pub fn with_variant<I>(items: I, variant: VariantName) -> Self
    where
        I: IntoIterator<Item = (ElementId, C)>,
    {
        Self {
            items: items.into_iter().collect(),
            variant,
            step_ms: 0,
            base_ms: 0,
            delay_ms: None,
            duration_ms: None,
            config: VisibilityConfig::default(),
            on_item_phase_change: None,
        }
    }

    /// Delay added per item index
    pub fn step_ms(mut self, step_ms: u32) -> Self {
        self.step_ms = step_ms;
        self
    }

    /// Stagger offset of the first item
    pub fn base_ms(mut self, base_ms: u32) -> Self {
        self.base_ms = base_ms;
        self
    }

    /// Override the variant's start delay for every item
    pub fn delay_ms(mut self, delay_ms: u32) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Override the variant's duration for every item
    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Observation settings shared by every item
    pub fn config(mut self, config: VisibilityConfig) -> Self {
        self.config = config;
        self
    }

    /// Let items hide again when they leave the viewport
    pub fn repeatable(mut self) -> Self {
        self.config = self.config.repeatable();
        self
    }

    /// Called with the item index after each item phase change
    pub fn on_item_phase_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize, RevealPhase) + 'static,
    {
        self.on_item_phase_change = Some(Rc::new(callback));
        self
    }

    pub fn plan(&self) -> StaggerPlan {
        StaggerPlan::new(self.items.len(), self.step_ms, self.base_ms)
    }

    /// Mount every item, each with its own observer
    pub fn mount(self, host: &ObserverHost) -> MountedRevealGroup<C> {
        let plan = self.plan();
        let visibility = Rc::new(RefCell::new(GroupVisibility::new(self.config.once)));

        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(index, (element, children))| {
                let mut item = Reveal::new(children, self.variant)
                    .config(self.config)
                    .stagger_offset_ms(plan.delay_for_index(index));
                if let Some(delay) = self.delay_ms {
                    item = item.delay_ms(delay);
                }
                if let Some(duration) = self.duration_ms {
                    item = item.duration_ms(duration);
                }

                let visibility = Rc::downgrade(&visibility);
                let hook = self.on_item_phase_change.clone();
                item.on_phase_change(move |phase| {
                    if let Some(visibility) = visibility.upgrade() {
                        let mut visibility = visibility.borrow_mut();
                        match phase {
                            RevealPhase::Revealing => {
                                visibility.mark_visible(index);
                            }
                            RevealPhase::Hidden => {
                                visibility.mark_hidden(index);
                            }
                            RevealPhase::Revealed => {}
                        }
                    }
                    if let Some(hook) = hook.as_ref() {
                        hook(index, phase);
                    }
                })
                .mount(host, element)
            })
            .collect();

        tracing::debug!(
            items = plan.item_count,
            step_ms = plan.step_delay_ms,
            base_ms = plan.base_delay_ms,
            "reveal group mounted"
        );

        MountedRevealGroup {
            items,
            visibility,
            plan,
        }
    }
}

/// A mounted staggered group
pub struct MountedRevealGroup<C> {
    // Declared first so every item subscription is disposed before the
    // shared visibility set is released
    items: Vec<MountedReveal<C>>,
    visibility: Rc<RefCell<GroupVisibility>>,
    plan: StaggerPlan,
}

impl<C> MountedRevealGroup<C> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn plan(&self) -> StaggerPlan {
        self.plan
    }

    /// Effective start delay of every item, in index order
    pub fn delays(&self) -> Vec<u32> {
        self.items.iter().map(|item| item.delay_ms()).collect()
    }

    pub fn item(&self, index: usize) -> Option<&MountedReveal<C>> {
        self.items.get(index)
    }

    pub fn items(&self) -> impl Iterator<Item = &MountedReveal<C>> + '_ {
        self.items.iter()
    }

    pub fn phases(&self) -> Vec<RevealPhase> {
        self.items.iter().map(|item| item.phase()).collect()
    }

    pub fn styles(&self) -> Vec<RevealStyle> {
        self.items.iter().map(|item| item.computed_style()).collect()
    }

    /// Indices whose own observer has reported them in view
    pub fn visible_indices(&self) -> Vec<usize> {
        self.visibility.borrow().iter().collect()
    }

    /// Advance every item; returns true while any item needs frames
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let mut active = false;
        for item in &mut self.items {
            active |= item.tick(dt_ms);
        }
        active
    }

    /// Stop observing every item and give back the content in order
    pub fn unmount(self) -> Vec<C> {
        let contents = self.items.into_iter().map(MountedReveal::unmount).collect();
        tracing::debug!("reveal group unmounted");
        contents
    }
}
