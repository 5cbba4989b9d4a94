//! Root margins for visibility observation
//!
//! A root margin grows (or, with negative values, shrinks) the viewport
//! before intersection is computed. The default `0px 0px -100px 0px` pulls
//! the bottom edge up so sections start revealing slightly before they are
//! fully on screen.
//!
//! Margins are written in CSS shorthand with one to four components, each in
//! `px` or `%`:
//!
//! ```rust
//! use reveal_core::margin::{Length, RootMargin};
//!
//! let margin = RootMargin::parse("0px 0px -100px 0px").unwrap();
//! assert_eq!(margin.bottom, Length::Px(-100.0));
//!
//! let uniform = RootMargin::parse("10%").unwrap();
//! assert_eq!(uniform.left, Length::Percent(10.0));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RevealError};
use crate::geometry::Rect;

/// A signed margin length
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    /// Logical pixels
    Px(f32),
    /// Percentage of the root's extent along the margin's axis
    Percent(f32),
}

impl Length {
    /// Resolve to pixels against the root extent on the same axis
    pub fn resolve(&self, extent: f32) -> f32 {
        match *self {
            Length::Px(px) => px,
            Length::Percent(pct) => extent * pct / 100.0,
        }
    }

    fn parse(token: &str, input: &str) -> Result<Self> {
        let invalid = |reason: String| RevealError::InvalidMargin {
            input: input.to_string(),
            reason,
        };

        let (number, ctor): (&str, fn(f32) -> Length) = if let Some(n) = token.strip_suffix("px")
        {
            (n, Length::Px)
        } else if let Some(n) = token.strip_suffix('%') {
            (n, Length::Percent)
        } else if token == "0" {
            return Ok(Length::Px(0.0));
        } else {
            return Err(invalid(format!("{token:?} must be in px or %")));
        };

        let value: f32 = number
            .parse()
            .map_err(|_| invalid(format!("{token:?} is not a number")))?;
        if !value.is_finite() {
            return Err(invalid(format!("{token:?} is not finite")));
        }
        Ok(ctor(value))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(px) => write!(f, "{px}px"),
            Length::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

/// Four signed offsets applied to the observation root
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl RootMargin {
    /// No margin: the root is the viewport itself
    pub const ZERO: RootMargin = RootMargin {
        top: Length::Px(0.0),
        right: Length::Px(0.0),
        bottom: Length::Px(0.0),
        left: Length::Px(0.0),
    };

    /// Pixel margins in CSS order (top, right, bottom, left)
    pub const fn px(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top: Length::Px(top),
            right: Length::Px(right),
            bottom: Length::Px(bottom),
            left: Length::Px(left),
        }
    }

    /// Parse CSS margin shorthand (1 to 4 components)
    pub fn parse(input: &str) -> Result<Self> {
        let lengths = input
            .split_whitespace()
            .map(|token| Length::parse(token, input))
            .collect::<Result<Vec<_>>>()?;

        let (top, right, bottom, left) = match lengths.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            _ => {
                return Err(RevealError::InvalidMargin {
                    input: input.to_string(),
                    reason: format!("expected 1 to 4 components, found {}", lengths.len()),
                })
            }
        };

        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }

    /// Apply the margin to a root rect
    ///
    /// Percentages resolve against the root's height for top/bottom and its
    /// width for left/right.
    pub fn apply(&self, root: &Rect) -> Rect {
        root.outset(
            self.top.resolve(root.height()),
            self.right.resolve(root.width()),
            self.bottom.resolve(root.height()),
            self.left.resolve(root.width()),
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        RootMargin::px(0.0, 0.0, -100.0, 0.0)
    }
}

impl FromStr for RootMargin {
    type Err = RevealError;

    fn from_str(s: &str) -> Result<Self> {
        RootMargin::parse(s)
    }
}

impl TryFrom<String> for RootMargin {
    type Error = RevealError;

    fn try_from(value: String) -> Result<Self> {
        RootMargin::parse(&value)
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        margin.to_string()
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}
