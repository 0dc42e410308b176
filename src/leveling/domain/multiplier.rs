//! Per-employee XP multiplier.

use super::LevelingDomainError;
use serde::{Deserialize, Serialize};

/// Factor applied to personal XP grants.
///
/// Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct XpMultiplier(f64);

impl XpMultiplier {
    /// The neutral multiplier.
    pub const ONE: Self = Self(1.0);

    /// Validates and wraps a multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`LevelingDomainError::InvalidMultiplier`] for negative, NaN
    /// or infinite values.
    pub const fn new(value: f64) -> Result<Self, LevelingDomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(LevelingDomainError::InvalidMultiplier(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw factor.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Scales a base XP grant, rounding down.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "XP grants are floored products of a validated non-negative factor"
    )]
    pub fn scale(self, base: u64) -> u64 {
        // `as` saturates, so oversized products clamp to u64::MAX.
        (base as f64 * self.0).floor() as u64
    }
}

impl Default for XpMultiplier {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<f64> for XpMultiplier {
    type Error = LevelingDomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<XpMultiplier> for f64 {
    fn from(multiplier: XpMultiplier) -> Self {
        multiplier.0
    }
}
