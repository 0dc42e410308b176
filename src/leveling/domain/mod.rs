//! Domain model for employee progression.

mod config;
mod error;
mod ids;
mod multiplier;
mod progression;

pub use config::{LevelingConfig, XpRequirements};
pub use error::LevelingDomainError;
pub use ids::{EmployeeLevelId, EmployeeSkillId};
pub use multiplier::XpMultiplier;
pub use progression::{
    Award, EmployeeLevel, EmployeeSkill, ExperienceSummary, PersistedLevelData,
    PersistedSkillData, ProgressionAwards, ProgressionOutcome,
};
