//! In-memory repository for progression tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::catalog::domain::SkillId;
use crate::identity::EmployeeId;
use crate::leveling::{
    domain::{EmployeeLevel, EmployeeSkill, ProgressionOutcome},
    ports::{
        LevelingRepository, LevelingRepositoryError, LevelingRepositoryResult, ProgressionUpdate,
    },
};

/// Thread-safe in-memory progression repository.
///
/// Progression updates hold the write lock from read to write, which
/// serializes them across all employees.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLevelingRepository {
    state: Arc<RwLock<InMemoryLevelingState>>,
}

#[derive(Debug, Default)]
struct InMemoryLevelingState {
    levels: HashMap<EmployeeId, EmployeeLevel>,
    skills: HashMap<(EmployeeId, SkillId), EmployeeSkill>,
}

impl InMemoryLevelingRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> LevelingRepositoryError {
    LevelingRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl LevelingRepository for InMemoryLevelingRepository {
    async fn create_level(&self, level: &EmployeeLevel) -> LevelingRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.levels.contains_key(&level.employee_id()) {
            return Err(LevelingRepositoryError::DuplicateLevel(level.employee_id()));
        }
        state.levels.insert(level.employee_id(), level.clone());
        Ok(())
    }

    async fn find_level(
        &self,
        employee_id: EmployeeId,
    ) -> LevelingRepositoryResult<Option<EmployeeLevel>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.levels.get(&employee_id).cloned())
    }

    async fn find_skills(
        &self,
        employee_id: EmployeeId,
    ) -> LevelingRepositoryResult<Vec<EmployeeSkill>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut skills: Vec<EmployeeSkill> = state
            .skills
            .values()
            .filter(|skill| skill.employee_id() == employee_id)
            .cloned()
            .collect();
        skills.sort_by_key(|skill| (skill.created_at(), skill.skill_id()));
        Ok(skills)
    }

    async fn update_progression(
        &self,
        employee_id: EmployeeId,
        skill_id: SkillId,
        now: DateTime<Utc>,
        update: ProgressionUpdate,
    ) -> LevelingRepositoryResult<ProgressionOutcome> {
        let mut state = self.state.write().map_err(poisoned)?;
        let mut level = state
            .levels
            .get(&employee_id)
            .cloned()
            .ok_or(LevelingRepositoryError::LevelNotFound(employee_id))?;
        let existing = state.skills.get(&(employee_id, skill_id)).cloned();
        let skill_created = existing.is_none();
        let mut skill =
            existing.unwrap_or_else(|| EmployeeSkill::start(employee_id, skill_id, now));

        let awards = update(&mut level, &mut skill);

        state.levels.insert(employee_id, level.clone());
        state.skills.insert((employee_id, skill_id), skill.clone());
        Ok(ProgressionOutcome {
            level,
            skill,
            skill_created,
            awards,
        })
    }
}
