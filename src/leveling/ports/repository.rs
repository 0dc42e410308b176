//! Repository port for employee level and skill records.

use crate::catalog::domain::SkillId;
use crate::identity::EmployeeId;
use crate::leveling::domain::{
    EmployeeLevel, EmployeeSkill, ProgressionAwards, ProgressionOutcome,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for leveling repository operations.
pub type LevelingRepositoryResult<T> = Result<T, LevelingRepositoryError>;

/// Mutation applied to an employee's level and skill inside one unit of
/// work.
pub type ProgressionUpdate =
    Box<dyn FnOnce(&mut EmployeeLevel, &mut EmployeeSkill) -> ProgressionAwards + Send>;

/// Progression persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LevelingRepository: Send + Sync {
    /// Stores a newly registered level record.
    ///
    /// # Errors
    ///
    /// Returns [`LevelingRepositoryError::DuplicateLevel`] when the employee
    /// already has one.
    async fn create_level(&self, level: &EmployeeLevel) -> LevelingRepositoryResult<()>;

    /// Finds an employee's level record.
    async fn find_level(
        &self,
        employee_id: EmployeeId,
    ) -> LevelingRepositoryResult<Option<EmployeeLevel>>;

    /// Returns an employee's skill records, oldest first.
    async fn find_skills(
        &self,
        employee_id: EmployeeId,
    ) -> LevelingRepositoryResult<Vec<EmployeeSkill>>;

    /// Runs `update` against the employee's level record and their record
    /// for `skill_id`, then persists both.
    ///
    /// The whole read-modify-write is serialized per employee. A missing
    /// skill record is created with zero XP at level 0 and timestamp `now`
    /// before `update` runs.
    ///
    /// # Errors
    ///
    /// Returns [`LevelingRepositoryError::LevelNotFound`] when the employee
    /// has no level record. Nothing is written in that case.
    async fn update_progression(
        &self,
        employee_id: EmployeeId,
        skill_id: SkillId,
        now: DateTime<Utc>,
        update: ProgressionUpdate,
    ) -> LevelingRepositoryResult<ProgressionOutcome>;
}

/// Errors returned by leveling repository implementations.
#[derive(Debug, Clone, Error)]
pub enum LevelingRepositoryError {
    /// The employee has no level record.
    #[error("no level record for employee {0}")]
    LevelNotFound(EmployeeId),

    /// The employee already has a level record.
    #[error("employee {0} already has a level record")]
    DuplicateLevel(EmployeeId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LevelingRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
