//! Service layer turning task commands into persisted events.

use crate::identity::EmployeeId;
use crate::task::{
    domain::{
        AssignTask, Task, TaskCommand, TaskDomainError, TaskEvent, TaskId, apply, decide,
        decide_assignment,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The command or query names a task that does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// The single entry point for mutating tasks. Awarding XP for completed
/// tasks is the caller's job: inspect the returned event and hand it to
/// [`crate::leveling::services::LevelingService::handle_event`].
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and persists a new task, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title is blank or a
    /// field is too long, or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create_task(&self, command: AssignTask) -> TaskLifecycleResult<TaskId> {
        let event = self.assign(&command).await?;
        Ok(event.aggregate_id)
    }

    /// Handles a lifecycle command.
    ///
    /// Returns `Ok(None)` when the command does not apply to the task's
    /// current status; nothing is written in that case. Otherwise the new
    /// projection and event are saved together and the event is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the targeted task does
    /// not exist, [`TaskLifecycleError::Repository`] when persistence fails
    /// (including [`TaskRepositoryError::ConcurrencyConflict`] after a
    /// concurrent write; reload and retry), and
    /// [`TaskLifecycleError::Domain`] when a title, description or reason
    /// fails validation.
    pub async fn handle_command(
        &self,
        command: TaskCommand,
    ) -> TaskLifecycleResult<Option<TaskEvent>> {
        let task_id = match &command {
            TaskCommand::Assign(assign) => return self.assign(assign).await.map(Some),
            TaskCommand::Submit(submit) => submit.aggregate_id,
            TaskCommand::Approve(approve) => approve.aggregate_id,
            TaskCommand::Reject(reject) => reject.aggregate_id,
            TaskCommand::Cancel(cancel) => cancel.aggregate_id,
        };
        command.validate()?;

        let current = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))?;

        let Some(event) = decide(&command, Some(&current), &*self.clock) else {
            debug!(
                %task_id,
                command = command.name(),
                status = current.status().as_str(),
                "command does not apply to task status"
            );
            return Ok(None);
        };

        let updated = apply(Some(current), &event)?;
        self.repository.save(&updated, &event).await?;
        info!(
            %task_id,
            command = command.name(),
            event_type = %event.event_type(),
            version = event.version,
            status = updated.status().as_str(),
            "task transitioned"
        );
        Ok(Some(event))
    }

    /// Returns the current projection of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    pub async fn find_task(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    /// Returns a task's event history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task has no events.
    pub async fn task_events(&self, id: TaskId) -> TaskLifecycleResult<Vec<TaskEvent>> {
        let events = self.repository.find_events(id).await?;
        if events.is_empty() {
            return Err(TaskLifecycleError::NotFound(id));
        }
        Ok(events)
    }

    /// Returns every task assigned to an employee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn tasks_for_assignee(
        &self,
        employee_id: EmployeeId,
    ) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_by_assignee(employee_id).await?)
    }

    async fn assign(&self, command: &AssignTask) -> TaskLifecycleResult<TaskEvent> {
        command.validate()?;
        let event = decide_assignment(command, &*self.clock);
        let task = apply(None, &event)?;
        self.repository.save(&task, &event).await?;
        info!(
            task_id = %task.id(),
            assigned_to = %task.assigned_to(),
            definition_id = %task.definition_id(),
            requires_approval = task.requires_approval(),
            "task assigned"
        );
        Ok(event)
    }
}
