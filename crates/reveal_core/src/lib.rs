//! Reveal Core
//!
//! Foundational primitives for scroll-triggered entrance animations:
//!
//! - **Geometry**: points, sizes and rects with intersection math
//! - **Root Margins**: CSS-style margins that grow or shrink the viewport
//! - **Visibility Observation**: owned subscriptions that report when an
//!   element crosses an intersection threshold
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use reveal_core::{use_visibility, ElementId, ObserverHost, Rect, VisibilityConfig};
//!
//! let host = ObserverHost::new();
//! let section = ElementId::new(42);
//! let visibility = use_visibility(&host, section, VisibilityConfig::default());
//!
//! let layout = HashMap::from([(section, Rect::new(0.0, 1200.0, 800.0, 300.0))]);
//! host.evaluate(Rect::new(0.0, 0.0, 800.0, 600.0), &layout);
//! assert!(!visibility.is_visible());
//!
//! // Scroll down 900px: the section is now at y = 300
//! host.evaluate(Rect::new(0.0, 900.0, 800.0, 600.0), &layout);
//! assert!(visibility.is_visible());
//! ```

pub mod error;
pub mod geometry;
pub mod margin;
pub mod observer;

pub use error::{Result, RevealError};
pub use geometry::{Point, Rect, Size};
pub use margin::{Length, RootMargin};
pub use observer::{
    use_visibility, ElementId, LayoutSource, ObserverHost, ObserverId, Subscription,
    VisibilityConfig, VisibilityState, DEFAULT_THRESHOLD,
};
