//! XP requirement tables.
//!
//! A table maps a target level to the XP needed to reach it from the level
//! below. XP resets to zero on every level-up, so each entry is the size of
//! one step, not a running total. Levels above the last entry are
//! unreachable: XP keeps accumulating at the top level.

use super::LevelingDomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const PERSON_TABLE: &str = "person";
const SKILL_TABLE: &str = "skill";

/// Thresholds shipped with the product, roughly one week for level 1 up to
/// a year for level 10.
const DEFAULT_REQUIREMENTS: [(u32, u64); 11] = [
    (0, 0),
    (1, 500),
    (2, 1_500),
    (3, 2_100),
    (4, 4_500),
    (5, 6_300),
    (6, 8_500),
    (7, 12_000),
    (8, 14_000),
    (9, 16_000),
    (10, 20_000),
];

/// Validated level → XP requirement table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct XpRequirements(BTreeMap<u32, u64>);

impl XpRequirements {
    /// Validates a requirement table.
    ///
    /// Levels must run contiguously from zero and every level above zero must
    /// require some XP. `table` names the table in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`LevelingDomainError::EmptyRequirements`],
    /// [`LevelingDomainError::MissingLevel`] or
    /// [`LevelingDomainError::ZeroRequirement`].
    pub fn new(
        table: &'static str,
        requirements: BTreeMap<u32, u64>,
    ) -> Result<Self, LevelingDomainError> {
        if requirements.is_empty() {
            return Err(LevelingDomainError::EmptyRequirements { table });
        }
        for (expected, (&level, &required)) in (0_u32..).zip(&requirements) {
            if level != expected {
                return Err(LevelingDomainError::MissingLevel {
                    table,
                    level: expected,
                });
            }
            if level > 0 && required == 0 {
                return Err(LevelingDomainError::ZeroRequirement { table, level });
            }
        }
        Ok(Self(requirements))
    }

    /// Returns the XP needed to reach `level`, or `None` past the table.
    #[must_use]
    pub fn requirement(&self, level: u32) -> Option<u64> {
        self.0.get(&level).copied()
    }

    /// Returns the highest reachable level.
    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.0.keys().next_back().copied().unwrap_or_default()
    }

    /// Returns the XP still needed to leave `level`, or `None` at the top of
    /// the table.
    #[must_use]
    pub fn missing_xp(&self, level: u32, xp: u64) -> Option<u64> {
        let next = level.checked_add(1)?;
        self.requirement(next)
            .map(|required| required.saturating_sub(xp))
    }

    /// Returns whether `xp` at `level` is enough for the next level.
    #[must_use]
    pub fn reaches_next(&self, level: u32, xp: u64) -> bool {
        self.missing_xp(level, xp) == Some(0)
    }
}

impl Default for XpRequirements {
    fn default() -> Self {
        Self(DEFAULT_REQUIREMENTS.into_iter().collect())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLevelingConfig {
    person: BTreeMap<u32, u64>,
    skill: Option<BTreeMap<u32, u64>>,
}

/// Requirement tables for personal and skill progression.
///
/// Immutable once built; pass it to
/// [`crate::leveling::services::LevelingService::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLevelingConfig")]
pub struct LevelingConfig {
    person: XpRequirements,
    skill: XpRequirements,
}

impl LevelingConfig {
    /// Builds a configuration from validated tables.
    #[must_use]
    pub const fn new(person: XpRequirements, skill: XpRequirements) -> Self {
        Self { person, skill }
    }

    /// Parses and validates a JSON document of the form
    /// `{"person": {"0": 0, "1": 500}, "skill": {...}}`.
    ///
    /// The skill table defaults to the person table when omitted.
    ///
    /// # Errors
    ///
    /// Returns [`LevelingDomainError::InvalidConfig`] when the document is
    /// malformed or a table fails validation.
    pub fn from_json(document: &str) -> Result<Self, LevelingDomainError> {
        serde_json::from_str(document)
            .map_err(|err| LevelingDomainError::InvalidConfig(err.to_string()))
    }

    /// Returns the personal level table.
    #[must_use]
    pub const fn person(&self) -> &XpRequirements {
        &self.person
    }

    /// Returns the skill level table.
    #[must_use]
    pub const fn skill(&self) -> &XpRequirements {
        &self.skill
    }
}

impl TryFrom<RawLevelingConfig> for LevelingConfig {
    type Error = LevelingDomainError;

    fn try_from(raw: RawLevelingConfig) -> Result<Self, Self::Error> {
        let person = XpRequirements::new(PERSON_TABLE, raw.person)?;
        let skill = match raw.skill {
            Some(table) => XpRequirements::new(SKILL_TABLE, table)?,
            None => person.clone(),
        };
        Ok(Self { person, skill })
    }
}
