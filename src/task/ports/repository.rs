//! Repository port for task projections and their event logs.

use crate::identity::EmployeeId;
use crate::task::domain::{Task, TaskEvent, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Finds the current projection of a task.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Appends `event` to the log and upserts `task` as the new projection in
    /// a single transaction.
    ///
    /// An event at version 1 inserts the projection. Any later version
    /// updates it only when the stored version equals `event.version - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when a creating event
    /// targets an existing task, [`TaskRepositoryError::NotFound`] when an
    /// update targets a missing task, and
    /// [`TaskRepositoryError::ConcurrencyConflict`] when the stored version
    /// moved on. Nothing is written in any of these cases.
    async fn save(&self, task: &Task, event: &TaskEvent) -> TaskRepositoryResult<()>;

    /// Returns a task's events ordered by timestamp, then version.
    async fn find_events(&self, aggregate_id: TaskId) -> TaskRepositoryResult<Vec<TaskEvent>>;

    /// Returns every task assigned to the employee, oldest first.
    async fn find_by_assignee(&self, employee_id: EmployeeId) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored projection is not at the version the event was decided
    /// against.
    #[error("task {task_id} is at version {actual}, expected {expected}")]
    ConcurrencyConflict {
        /// Contended task.
        task_id: TaskId,
        /// Version the writer loaded.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
