//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::EmployeeId;
use crate::task::{
    domain::{Task, TaskEvent, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// A single lock guards projections and logs, so each save is atomic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    events: HashMap<TaskId, Vec<TaskEvent>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Checks the stored projection against the version the event expects.
fn check_version(state: &InMemoryTaskState, event: &TaskEvent) -> TaskRepositoryResult<()> {
    let stored = state.tasks.get(&event.aggregate_id);
    if event.version <= 1 {
        return match stored {
            Some(_) => Err(TaskRepositoryError::DuplicateTask(event.aggregate_id)),
            None => Ok(()),
        };
    }

    let current = stored.ok_or(TaskRepositoryError::NotFound(event.aggregate_id))?;
    let expected = event.version - 1;
    if current.version() != expected {
        return Err(TaskRepositoryError::ConcurrencyConflict {
            task_id: event.aggregate_id,
            expected,
            actual: current.version(),
        });
    }
    Ok(())
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn save(&self, task: &Task, event: &TaskEvent) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        check_version(&state, event)?;

        state
            .events
            .entry(event.aggregate_id)
            .or_default()
            .push(event.clone());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_events(&self, aggregate_id: TaskId) -> TaskRepositoryResult<Vec<TaskEvent>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut events = state.events.get(&aggregate_id).cloned().unwrap_or_default();
        events.sort_by(|left, right| {
            left.timestamp
                .cmp(&right.timestamp)
                .then_with(|| left.version.cmp(&right.version))
        });
        Ok(events)
    }

    async fn find_by_assignee(&self, employee_id: EmployeeId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.assigned_to() == employee_id)
            .cloned()
            .collect();
        tasks.sort_by(|left, right| {
            left.created_at()
                .cmp(&right.created_at())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(tasks)
    }
}
