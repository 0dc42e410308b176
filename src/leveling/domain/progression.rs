//! Personal and skill progression records.

use super::{EmployeeLevelId, EmployeeSkillId, XpMultiplier, XpRequirements};
use crate::catalog::domain::SkillId;
use crate::identity::EmployeeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of granting XP to one progression track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    /// XP actually added, after any multiplier.
    pub granted: u64,
    /// Whether the grant crossed the next level's threshold.
    pub leveled_up: bool,
    /// Level after the grant.
    pub level: u32,
}

/// Adds `granted` XP and performs at most one level-up.
///
/// Overflow beyond the threshold is discarded. At the top of the table the
/// XP keeps accumulating.
fn grant_xp(
    level: &mut u32,
    xp: &mut u64,
    granted: u64,
    requirements: &XpRequirements,
) -> Award {
    *xp = xp.saturating_add(granted);
    let leveled_up = requirements.reaches_next(*level, *xp);
    if leveled_up {
        *level += 1;
        *xp = 0;
    }
    Award {
        granted,
        leveled_up,
        level: *level,
    }
}

/// An employee's personal level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeLevel {
    id: EmployeeLevelId,
    employee_id: EmployeeId,
    level: u32,
    xp: u64,
    xp_multiplier: XpMultiplier,
    level_start_date: DateTime<Utc>,
    level_end_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted level record.
#[derive(Debug, Clone)]
pub struct PersistedLevelData {
    /// Record identifier.
    pub id: EmployeeLevelId,
    /// Owning employee.
    pub employee_id: EmployeeId,
    /// Current level.
    pub level: u32,
    /// XP earned since the last level-up.
    pub xp: u64,
    /// Personal XP multiplier.
    pub xp_multiplier: XpMultiplier,
    /// When the current level was reached.
    pub level_start_date: DateTime<Utc>,
    /// Optional deadline for the current level.
    pub level_end_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

impl EmployeeLevel {
    /// Creates the level 0 record an employee gets at onboarding.
    #[must_use]
    pub fn register(
        employee_id: EmployeeId,
        xp_multiplier: XpMultiplier,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EmployeeLevelId::new(),
            employee_id,
            level: 0,
            xp: 0,
            xp_multiplier,
            level_start_date: now,
            level_end_date: None,
            created_at: now,
            updated_at: None,
        }
    }

    /// Reconstructs a level record from persistence.
    #[must_use]
    pub const fn from_persisted(data: PersistedLevelData) -> Self {
        Self {
            id: data.id,
            employee_id: data.employee_id,
            level: data.level,
            xp: data.xp,
            xp_multiplier: data.xp_multiplier,
            level_start_date: data.level_start_date,
            level_end_date: data.level_end_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Grants personal XP scaled by the employee's multiplier.
    ///
    /// A level-up restarts the level clock at `now`.
    pub fn grant(
        &mut self,
        base_xp: u64,
        requirements: &XpRequirements,
        now: DateTime<Utc>,
    ) -> Award {
        let granted = self.xp_multiplier.scale(base_xp);
        let award = grant_xp(&mut self.level, &mut self.xp, granted, requirements);
        if award.leveled_up {
            self.level_start_date = now;
        }
        self.updated_at = Some(now);
        award
    }

    /// Summarizes the record against a requirement table.
    #[must_use]
    pub fn summary(&self, requirements: &XpRequirements) -> ExperienceSummary {
        ExperienceSummary {
            level: self.level,
            current_xp: self.xp,
            missing_xp: requirements.missing_xp(self.level, self.xp),
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> EmployeeLevelId {
        self.id
    }

    /// Returns the owning employee.
    #[must_use]
    pub const fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Returns the current level.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Returns the XP earned since the last level-up.
    #[must_use]
    pub const fn xp(&self) -> u64 {
        self.xp
    }

    /// Returns the personal XP multiplier.
    #[must_use]
    pub const fn xp_multiplier(&self) -> XpMultiplier {
        self.xp_multiplier
    }

    /// Returns when the current level was reached.
    #[must_use]
    pub const fn level_start_date(&self) -> DateTime<Utc> {
        self.level_start_date
    }

    /// Returns the optional deadline for the current level.
    #[must_use]
    pub const fn level_end_date(&self) -> Option<DateTime<Utc>> {
        self.level_end_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

/// An employee's progression in one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSkill {
    id: EmployeeSkillId,
    employee_id: EmployeeId,
    skill_id: SkillId,
    xp: u64,
    level: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted skill record.
#[derive(Debug, Clone)]
pub struct PersistedSkillData {
    /// Record identifier.
    pub id: EmployeeSkillId,
    /// Owning employee.
    pub employee_id: EmployeeId,
    /// Skill being progressed.
    pub skill_id: SkillId,
    /// XP earned since the last level-up.
    pub xp: u64,
    /// Current skill level.
    pub level: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl EmployeeSkill {
    /// Creates the empty record for an employee's first task in a skill.
    #[must_use]
    pub fn start(employee_id: EmployeeId, skill_id: SkillId, now: DateTime<Utc>) -> Self {
        Self {
            id: EmployeeSkillId::new(),
            employee_id,
            skill_id,
            xp: 0,
            level: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a skill record from persistence.
    #[must_use]
    pub const fn from_persisted(data: PersistedSkillData) -> Self {
        Self {
            id: data.id,
            employee_id: data.employee_id,
            skill_id: data.skill_id,
            xp: data.xp,
            level: data.level,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Grants skill XP. Skill grants ignore the personal multiplier.
    pub fn grant(
        &mut self,
        xp: u64,
        requirements: &XpRequirements,
        now: DateTime<Utc>,
    ) -> Award {
        let award = grant_xp(&mut self.level, &mut self.xp, xp, requirements);
        self.updated_at = now;
        award
    }

    /// Returns the XP still needed for the next skill level, or `None` at
    /// the top of the table.
    #[must_use]
    pub fn missing_xp(&self, requirements: &XpRequirements) -> Option<u64> {
        requirements.missing_xp(self.level, self.xp)
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> EmployeeSkillId {
        self.id
    }

    /// Returns the owning employee.
    #[must_use]
    pub const fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Returns the skill being progressed.
    #[must_use]
    pub const fn skill_id(&self) -> SkillId {
        self.skill_id
    }

    /// Returns the XP earned since the last level-up.
    #[must_use]
    pub const fn xp(&self) -> u64 {
        self.xp
    }

    /// Returns the current skill level.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Awards granted by one task completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionAwards {
    /// Personal level award.
    pub person: Award,
    /// Skill award.
    pub skill: Award,
}

/// Records persisted after a task completion, with the awards that changed
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionOutcome {
    /// Updated personal level.
    pub level: EmployeeLevel,
    /// Updated skill record.
    pub skill: EmployeeSkill,
    /// Whether the skill record was created by this completion.
    pub skill_created: bool,
    /// Awards applied to both records.
    pub awards: ProgressionAwards,
}

/// Read model of an employee's personal progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceSummary {
    /// Current level.
    pub level: u32,
    /// XP earned since the last level-up.
    pub current_xp: u64,
    /// XP still needed for the next level; `None` at the top of the table.
    pub missing_xp: Option<u64>,
}
