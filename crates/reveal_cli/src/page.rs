//! Page description files
//!
//! A page file lists the animated sections of one page, top to bottom, with
//! the geometry the simulator lays them out with:
//!
//! ```toml
//! [viewport]
//! width = 1280.0
//! height = 800.0
//!
//! [observer]
//! threshold = 0.15
//! root_margin = "0px 0px -100px 0px"
//!
//! [[section]]
//! name = "hero"
//! variant = "fade-up"
//! top = 0.0
//! height = 600.0
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use reveal_animation::VariantName;
use reveal_core::{RootMargin, VisibilityConfig};
use serde::{Deserialize, Serialize};

/// A page of animated sections
#[derive(Debug, Deserialize, Serialize)]
pub struct PageConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Observation defaults for every section
    #[serde(default)]
    pub observer: VisibilityConfig,
    #[serde(default, rename = "section")]
    pub sections: Vec<SectionConfig>,
}

/// Viewport size in logical pixels
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_viewport_width")]
    pub width: f32,
    #[serde(default = "default_viewport_height")]
    pub height: f32,
}

fn default_viewport_width() -> f32 {
    1280.0
}

fn default_viewport_height() -> f32 {
    800.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
        }
    }
}

/// One animated section
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SectionConfig {
    pub name: String,
    #[serde(default = "default_variant")]
    pub variant: String,
    /// Distance from the top of the page (px)
    pub top: f32,
    pub height: f32,
    /// Start delay override (seconds)
    #[serde(default)]
    pub delay: Option<f32>,
    /// Duration override (seconds)
    #[serde(default)]
    pub duration: Option<f32>,
    /// Split the section into a staggered group of equal-height rows
    #[serde(default)]
    pub items: Option<usize>,
    /// Delay between group items (seconds)
    #[serde(default)]
    pub stagger: f32,
    /// Observation settings for this section only, layered over `[observer]`
    #[serde(default)]
    pub observer: Option<ObserverOverride>,
}

/// Per-section observer fields; unset fields inherit the page settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct ObserverOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_margin: Option<RootMargin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub once: Option<bool>,
}

impl ObserverOverride {
    /// Apply the set fields on top of `base`
    pub fn merge(&self, base: VisibilityConfig) -> VisibilityConfig {
        VisibilityConfig {
            threshold: self.threshold.unwrap_or(base.threshold),
            root_margin: self.root_margin.unwrap_or(base.root_margin),
            once: self.once.unwrap_or(base.once),
        }
    }
}

fn default_variant() -> String {
    VariantName::default().as_str().to_string()
}

impl PageConfig {
    /// Load a page file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Bottom edge of the lowest section
    pub fn page_height(&self) -> f32 {
        self.sections
            .iter()
            .map(|s| s.top + s.height)
            .fold(self.viewport.height, f32::max)
    }

    /// Observation settings in effect for a section
    pub fn observer_for(&self, section: &SectionConfig) -> VisibilityConfig {
        match section.observer {
            Some(overrides) => overrides.merge(self.observer),
            None => self.observer,
        }
    }

    /// Strict validation of everything the runtime would silently substitute
    ///
    /// Returns one message per problem.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if let Err(err) = self.observer.validate() {
            problems.push(format!("[observer]: {err}"));
        }

        for section in &self.sections {
            let name = &section.name;
            if let Err(err) = section.variant.parse::<VariantName>() {
                problems.push(format!("section {name:?}: {err}"));
            }
            if section.observer.is_some() {
                if let Err(err) = self.observer_for(section).validate() {
                    problems.push(format!("section {name:?}: {err}"));
                }
            }
            if section.height <= 0.0 {
                problems.push(format!("section {name:?}: height must be positive"));
            }
            if section.items == Some(0) {
                problems.push(format!("section {name:?}: items must be at least 1"));
            }
            for (field, value) in [("delay", section.delay), ("duration", section.duration)] {
                if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
                    problems.push(format!("section {name:?}: {field} must be non-negative"));
                }
            }
            if !section.stagger.is_finite() || section.stagger < 0.0 {
                problems.push(format!("section {name:?}: stagger must be non-negative"));
            }
        }

        problems
    }
}
