//! Service layer granting XP for completed tasks.

use crate::catalog::{
    domain::TaskDefinitionId,
    ports::{CatalogError, TaskCatalog},
};
use crate::identity::EmployeeId;
use crate::leveling::{
    domain::{
        EmployeeLevel, EmployeeSkill, ExperienceSummary, LevelingConfig, LevelingDomainError,
        ProgressionAwards, ProgressionOutcome, XpMultiplier,
    },
    ports::{LevelingRepository, LevelingRepositoryError},
};
use crate::task::domain::{TaskEvent, TaskEventKind};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for progression operations.
#[derive(Debug, Error)]
pub enum LevelingError {
    /// The completed task's template does not exist.
    #[error("task definition not found: {0}")]
    DefinitionNotFound(TaskDefinitionId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] LevelingDomainError),
    /// Progression storage failed or the employee is unknown.
    #[error(transparent)]
    Repository(#[from] LevelingRepositoryError),
    /// Template lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Result type for leveling service operations.
pub type LevelingResult<T> = Result<T, LevelingError>;

/// Grants personal and skill XP when tasks complete.
///
/// The service is fed by the caller after
/// [`crate::task::services::TaskLifecycleService::handle_command`] returns a
/// completion event; the two services never call each other.
#[derive(Clone)]
pub struct LevelingService<R, T, C>
where
    R: LevelingRepository,
    T: TaskCatalog,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    catalog: Arc<T>,
    clock: Arc<C>,
    config: Arc<LevelingConfig>,
}

impl<R, T, C> LevelingService<R, T, C>
where
    R: LevelingRepository,
    T: TaskCatalog,
    C: Clock + Send + Sync,
{
    /// Creates a leveling service with the given requirement tables.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        catalog: Arc<T>,
        clock: Arc<C>,
        config: LevelingConfig,
    ) -> Self {
        Self {
            repository,
            catalog,
            clock,
            config: Arc::new(config),
        }
    }

    /// Returns the requirement tables in use.
    #[must_use]
    pub fn config(&self) -> &LevelingConfig {
        &self.config
    }

    /// Creates the level 0 record for a newly onboarded employee.
    ///
    /// # Errors
    ///
    /// Returns [`LevelingError::Repository`] wrapping
    /// [`LevelingRepositoryError::DuplicateLevel`] when the employee is
    /// already registered.
    pub async fn register_employee(
        &self,
        employee_id: EmployeeId,
        xp_multiplier: XpMultiplier,
    ) -> LevelingResult<EmployeeLevel> {
        let level = EmployeeLevel::register(employee_id, xp_multiplier, self.clock.utc());
        self.repository.create_level(&level).await?;
        info!(
            %employee_id,
            xp_multiplier = xp_multiplier.value(),
            "employee registered for leveling"
        );
        Ok(level)
    }

    /// Grants the XP a completed task is worth.
    ///
    /// Personal XP is `floor(person_xp * multiplier)`; skill XP is the
    /// template's `skill_xp`. Each track levels up at most once per call and
    /// overflow past the threshold is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`LevelingError::DefinitionNotFound`] for an unknown template,
    /// [`LevelingError::Repository`] wrapping
    /// [`LevelingRepositoryError::LevelNotFound`] for an unregistered
    /// employee, and [`LevelingError::Catalog`] or
    /// [`LevelingError::Repository`] when storage fails.
    pub async fn task_completed(
        &self,
        definition_id: TaskDefinitionId,
        employee_id: EmployeeId,
    ) -> LevelingResult<ProgressionOutcome> {
        let definition = self
            .catalog
            .find_definition(definition_id)
            .await?
            .ok_or(LevelingError::DefinitionNotFound(definition_id))?;
        let rewards = definition.rewards();
        let skill_id = definition.skill_id();
        let now = self.clock.utc();
        let config = Arc::clone(&self.config);

        let outcome = self
            .repository
            .update_progression(
                employee_id,
                skill_id,
                now,
                Box::new(move |level: &mut EmployeeLevel, skill: &mut EmployeeSkill| {
                    ProgressionAwards {
                        person: level.grant(rewards.person, config.person(), now),
                        skill: skill.grant(rewards.skill, config.skill(), now),
                    }
                }),
            )
            .await?;

        log_outcome(definition_id, &outcome);
        Ok(outcome)
    }

    /// Grants XP when `event` completes a task; ignores every other event.
    ///
    /// # Errors
    ///
    /// Propagates [`LevelingService::task_completed`] errors.
    pub async fn handle_event(
        &self,
        event: &TaskEvent,
    ) -> LevelingResult<Option<ProgressionOutcome>> {
        let TaskEventKind::Completed {
            assigned_to,
            definition_id,
            ..
        } = event.kind
        else {
            debug!(
                task_id = %event.aggregate_id,
                event_type = %event.event_type(),
                "event carries no xp award"
            );
            return Ok(None);
        };
        self.task_completed(definition_id, assigned_to)
            .await
            .map(Some)
    }

    /// Returns an employee's level, XP and XP missing for the next level.
    ///
    /// # Errors
    ///
    /// Returns [`LevelingError::Repository`] wrapping
    /// [`LevelingRepositoryError::LevelNotFound`] for an unregistered
    /// employee.
    pub async fn experience(&self, employee_id: EmployeeId) -> LevelingResult<ExperienceSummary> {
        let level = self
            .repository
            .find_level(employee_id)
            .await?
            .ok_or(LevelingRepositoryError::LevelNotFound(employee_id))?;
        Ok(level.summary(self.config.person()))
    }

    /// Returns an employee's skill records, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`LevelingError::Repository`] when the lookup fails.
    pub async fn skills(&self, employee_id: EmployeeId) -> LevelingResult<Vec<EmployeeSkill>> {
        Ok(self.repository.find_skills(employee_id).await?)
    }
}

fn log_outcome(definition_id: TaskDefinitionId, outcome: &ProgressionOutcome) {
    let employee_id = outcome.level.employee_id();
    debug!(
        %employee_id,
        %definition_id,
        person_xp = outcome.awards.person.granted,
        skill_xp = outcome.awards.skill.granted,
        skill_created = outcome.skill_created,
        "xp granted"
    );
    if outcome.awards.person.leveled_up {
        info!(%employee_id, level = outcome.level.level(), "employee leveled up");
    }
    if outcome.awards.skill.leveled_up {
        info!(
            %employee_id,
            skill_id = %outcome.skill.skill_id(),
            level = outcome.skill.level(),
            "skill leveled up"
        );
    }
}
