//! Visibility observation
//!
//! Reports when an element enters (and optionally leaves) the viewport.
//! Each observation is an owned [`Subscription`]; dropping it unregisters the
//! element synchronously, so no callback can run against a disposed target.
//!
//! The host platform drives observation by calling
//! [`ObserverHost::evaluate`] once per frame with the current viewport and a
//! [`LayoutSource`] that reports element bounds.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use reveal_core::{ElementId, ObserverHost, Rect, VisibilityConfig};
//!
//! let host = ObserverHost::new();
//! let hero = ElementId::new(1);
//!
//! let subscription = host.observe(hero, VisibilityConfig::default(), |visible| {
//!     println!("hero visible: {visible}");
//! });
//!
//! let mut layout = HashMap::new();
//! layout.insert(hero, Rect::new(0.0, 100.0, 800.0, 400.0));
//!
//! host.evaluate(Rect::new(0.0, 0.0, 800.0, 600.0), &layout);
//! assert!(subscription.is_visible());
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::error::{Result, RevealError};
use crate::geometry::Rect;
use crate::margin::RootMargin;

/// Default fraction of an element that must be inside the root to count as visible
pub const DEFAULT_THRESHOLD: f32 = 0.15;

new_key_type! {
    /// Handle to a registered observation
    pub struct ObserverId;
}

/// Opaque handle to a renderable node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Source of element geometry, supplied by the host platform each frame
pub trait LayoutSource {
    /// Current bounds of an element, in the same space as the viewport rect
    fn bounds(&self, element: ElementId) -> Option<Rect>;
}

impl<S: BuildHasher> LayoutSource for HashMap<ElementId, Rect, S> {
    fn bounds(&self, element: ElementId) -> Option<Rect> {
        self.get(&element).copied()
    }
}

impl<T: LayoutSource + ?Sized> LayoutSource for &T {
    fn bounds(&self, element: ElementId) -> Option<Rect> {
        (**self).bounds(element)
    }
}

/// Observation settings for one element
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Fraction of the element that must be inside the root, in (0, 1]
    pub threshold: f32,
    /// Offsets applied to the viewport before intersecting
    pub root_margin: RootMargin,
    /// Stop observing after the first reveal
    pub once: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: RootMargin::default(),
            once: true,
        }
    }
}

impl VisibilityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn root_margin(mut self, margin: RootMargin) -> Self {
        self.root_margin = margin;
        self
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    /// Keep observing after the first reveal, toggling on every crossing
    pub fn repeatable(self) -> Self {
        self.once(false)
    }

    /// Check the threshold is in (0, 1]
    pub fn validate(&self) -> Result<()> {
        if self.threshold.is_finite() && self.threshold > 0.0 && self.threshold <= 1.0 {
            Ok(())
        } else {
            Err(RevealError::InvalidThreshold(self.threshold))
        }
    }

    /// Threshold clamped into (0, 1]
    ///
    /// Non-positive or non-finite thresholds fall back to the default,
    /// thresholds above 1 clamp to 1.
    pub fn effective_threshold(&self) -> f32 {
        let t = self.threshold;
        if !t.is_finite() || t <= 0.0 {
            tracing::warn!(threshold = t, "invalid visibility threshold, using default");
            DEFAULT_THRESHOLD
        } else if t > 1.0 {
            tracing::warn!(threshold = t, "visibility threshold above 1, clamping");
            1.0
        } else {
            t
        }
    }
}

/// Visibility of one observed element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibilityState {
    pub is_visible: bool,
    pub has_fired_once: bool,
}

impl VisibilityState {
    /// State reported when observation is unavailable
    pub const ALWAYS_VISIBLE: VisibilityState = VisibilityState {
        is_visible: true,
        has_fired_once: true,
    };
}

type VisibilityCallback = Rc<dyn Fn(bool)>;

struct Registration {
    element: ElementId,
    config: VisibilityConfig,
    threshold: f32,
    state: Rc<Cell<VisibilityState>>,
    callback: VisibilityCallback,
}

struct ObserverInner {
    registrations: SlotMap<ObserverId, Registration>,
    supported: bool,
}

/// Per-view registry of observed elements
///
/// Cloning the host yields another handle to the same registry.
#[derive(Clone)]
pub struct ObserverHost {
    inner: Rc<RefCell<ObserverInner>>,
}

impl ObserverHost {
    /// Host backed by a platform that can report intersections
    pub fn new() -> Self {
        Self::with_support(true)
    }

    /// Host for a platform without an observation primitive
    ///
    /// Every subscription is visible as soon as it is created, so content is
    /// never left hidden.
    pub fn unsupported() -> Self {
        Self::with_support(false)
    }

    fn with_support(supported: bool) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObserverInner {
                registrations: SlotMap::with_key(),
                supported,
            })),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.inner.borrow().supported
    }

    /// Number of live registrations
    pub fn observed_count(&self) -> usize {
        self.inner.borrow().registrations.len()
    }

    /// Start observing an element
    ///
    /// `callback` receives `true` when the element enters the root and, for
    /// repeatable configs, `false` when it leaves. On an unsupported host the
    /// callback runs once with `true` before this returns.
    pub fn observe<F>(
        &self,
        element: ElementId,
        config: VisibilityConfig,
        callback: F,
    ) -> Subscription
    where
        F: Fn(bool) + 'static,
    {
        if !self.is_supported() {
            tracing::debug!(
                element = element.raw(),
                "observation unsupported, revealing immediately"
            );
            let state = Rc::new(Cell::new(VisibilityState::ALWAYS_VISIBLE));
            callback(true);
            return Subscription {
                host: Weak::new(),
                id: None,
                state,
            };
        }

        let state = Rc::new(Cell::new(VisibilityState::default()));
        let registration = Registration {
            element,
            config,
            threshold: config.effective_threshold(),
            state: Rc::clone(&state),
            callback: Rc::new(callback),
        };
        let id = self.inner.borrow_mut().registrations.insert(registration);
        tracing::trace!(element = element.raw(), ?id, "observing element");

        Subscription {
            host: Rc::downgrade(&self.inner),
            id: Some(id),
            state,
        }
    }

    /// Observe without a callback; poll the subscription for state
    pub fn watch(&self, element: ElementId, config: VisibilityConfig) -> Subscription {
        self.observe(element, config, |_| {})
    }

    /// Run one observation pass
    ///
    /// Computes each element's intersection ratio against the margin-adjusted
    /// viewport and fires callbacks for every crossing. Elements the layout
    /// source has no bounds for are skipped. Returns the number of callbacks
    /// invoked.
    ///
    /// No borrow of the registry is held while the layout source or callbacks
    /// run, so either may observe or dispose elements. Elements registered
    /// during a pass are first evaluated on the next one. A subscription
    /// disposed by an earlier callback in the same pass does not receive its
    /// pending callback.
    pub fn evaluate(&self, viewport: Rect, layout: &impl LayoutSource) -> usize {
        let targets: SmallVec<[(ObserverId, ElementId); 16]> = self
            .inner
            .borrow()
            .registrations
            .iter()
            .map(|(id, registration)| (id, registration.element))
            .collect();

        let mut fired: SmallVec<[(ObserverId, bool, bool, VisibilityCallback); 8]> =
            SmallVec::new();

        for (id, element) in targets {
            let Some(bounds) = layout.bounds(element) else {
                continue;
            };

            let inner = self.inner.borrow();
            let Some(registration) = inner.registrations.get(id) else {
                continue;
            };

            let root = registration.config.root_margin.apply(&viewport);
            let ratio = bounds.intersection_ratio(&root);
            let in_view = ratio >= registration.threshold;

            let mut state = registration.state.get();
            let changed = if in_view && !state.is_visible {
                state.is_visible = true;
                state.has_fired_once = true;
                true
            } else if !in_view && state.is_visible && !registration.config.once {
                state.is_visible = false;
                true
            } else {
                false
            };

            if changed {
                registration.state.set(state);
                tracing::debug!(
                    element = element.raw(),
                    ratio,
                    visible = state.is_visible,
                    "visibility changed"
                );
                fired.push((
                    id,
                    state.is_visible,
                    registration.config.once,
                    Rc::clone(&registration.callback),
                ));
            }
        }

        let mut invoked = 0;
        for (id, visible, once, callback) in fired {
            if !self.inner.borrow().registrations.contains_key(id) {
                continue;
            }

            callback(visible);
            invoked += 1;

            if once && visible {
                self.remove(id);
            }
        }

        invoked
    }

    fn remove(&self, id: ObserverId) {
        // Bind first so the registration (and anything its callback owns) is
        // dropped after the borrow is released.
        let removed = self.inner.borrow_mut().registrations.remove(id);
        if removed.is_some() {
            tracing::trace!(?id, "observation removed");
        }
        drop(removed);
    }
}

impl Default for ObserverHost {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned observation of one element
///
/// Unregisters on drop. The last known [`VisibilityState`] stays readable
/// after the registration is gone.
pub struct Subscription {
    host: Weak<RefCell<ObserverInner>>,
    id: Option<ObserverId>,
    state: Rc<Cell<VisibilityState>>,
}

impl Subscription {
    pub fn state(&self) -> VisibilityState {
        self.state.get()
    }

    pub fn is_visible(&self) -> bool {
        self.state.get().is_visible
    }

    pub fn has_fired_once(&self) -> bool {
        self.state.get().has_fired_once
    }

    /// Whether the host still holds this registration
    ///
    /// False after disposal, after a `once` observation has fired, and for
    /// subscriptions created on an unsupported host.
    pub fn is_active(&self) -> bool {
        match (self.id, self.host.upgrade()) {
            (Some(id), Some(inner)) => inner.borrow().registrations.contains_key(id),
            _ => false,
        }
    }

    /// Unregister now; idempotent
    pub fn dispose(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(inner) = self.host.upgrade() {
            let removed = inner.borrow_mut().registrations.remove(id);
            if removed.is_some() {
                tracing::debug!(?id, "subscription disposed");
            }
            drop(removed);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("state", &self.state.get())
            .finish()
    }
}

/// Observe an element and expose its visibility as a polled state
pub fn use_visibility(
    host: &ObserverHost,
    element: ElementId,
    config: VisibilityConfig,
) -> Subscription {
    host.watch(element, config)
}
