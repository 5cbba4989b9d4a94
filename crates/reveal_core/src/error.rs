//! Error types for reveal

use thiserror::Error;

/// Configuration errors raised by the reveal crates
///
/// Presentation paths never return these: they substitute a default and log
/// a warning instead. The checked constructors (`RootMargin::parse`,
/// `VisibilityConfig::validate`, `VariantName::from_str`) surface them so
/// misconfiguration can be caught in tests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RevealError {
    /// Root margin string could not be parsed
    #[error("Invalid root margin {input:?}: {reason}")]
    InvalidMargin { input: String, reason: String },

    /// Intersection threshold outside (0, 1]
    #[error("Invalid threshold {0}: must be in (0, 1]")]
    InvalidThreshold(f32),

    /// Animation variant name not in the variant table
    #[error("Unknown animation variant: {0}")]
    UnknownVariant(String),
}

/// Result type for reveal operations
pub type Result<T> = std::result::Result<T, RevealError>;
