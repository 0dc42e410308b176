//! Error types for leveling configuration and validation.

use thiserror::Error;

/// Errors returned by leveling domain validation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LevelingDomainError {
    /// The multiplier is negative, NaN or infinite.
    #[error("xp multiplier must be finite and non-negative, got {0}")]
    InvalidMultiplier(f64),

    /// A requirement table has no entries.
    #[error("{table} requirement table is empty")]
    EmptyRequirements {
        /// Which table was rejected.
        table: &'static str,
    },

    /// Requirement table levels are not contiguous from zero.
    #[error("{table} requirement table is missing level {level}")]
    MissingLevel {
        /// Which table was rejected.
        table: &'static str,
        /// First absent level.
        level: u32,
    },

    /// A level above zero requires no XP.
    #[error("{table} requirement for level {level} must be positive")]
    ZeroRequirement {
        /// Which table was rejected.
        table: &'static str,
        /// Offending level.
        level: u32,
    },

    /// The configuration document could not be parsed.
    #[error("invalid leveling configuration: {0}")]
    InvalidConfig(String),
}
