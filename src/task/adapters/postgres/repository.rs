//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{TaskEventRow, TaskRow, TaskTransitionChangeset},
    schema::{task_events, tasks},
};
use crate::catalog::domain::TaskDefinitionId;
use crate::identity::EmployeeId;
use crate::postgres::{PgPool, run_blocking};
use crate::task::{
    domain::{
        PersistedTaskData, Task, TaskEvent, TaskEventId, TaskEventKind, TaskEventType, TaskId,
        TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// `PostgreSQL`-backed task repository.
///
/// Projections live in `tasks` and the event log in `task_events`. Each
/// [`TaskRepository::save`] runs in one transaction guarded by the
/// projection's `version` column and the `(aggregate_id, version)` unique
/// index on the log.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        run_blocking(
            &self.pool,
            f,
            TaskRepositoryError::persistence,
            TaskRepositoryError::persistence,
        )
        .await
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// A persisted event row lacks a column its event type requires.
#[derive(Debug, Error)]
#[error("{event_type} event {event_id} is missing column {column}")]
struct MissingEventColumn {
    event_id: uuid::Uuid,
    event_type: TaskEventType,
    column: &'static str,
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run(move |connection| {
            tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?
                .map(row_to_task)
                .transpose()
        })
        .await
    }

    async fn save(&self, task: &Task, event: &TaskEvent) -> TaskRepositoryResult<()> {
        let task_row = task_to_row(task)?;
        let event_row = event_to_row(event)?;
        let task_id = event.aggregate_id;
        let version = event.version;

        self.run(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                if version <= 1 {
                    insert_projection(tx, &task_row, task_id)?;
                } else {
                    update_projection(tx, task_row, task_id, version)?;
                }

                diesel::insert_into(task_events::table)
                    .values(&event_row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TaskRepositoryError::ConcurrencyConflict {
                                task_id,
                                expected: version.saturating_sub(1),
                                actual: version,
                            }
                        }
                        _ => TaskRepositoryError::persistence(err),
                    })?;
                Ok(())
            })
        })
        .await
    }

    async fn find_events(&self, aggregate_id: TaskId) -> TaskRepositoryResult<Vec<TaskEvent>> {
        self.run(move |connection| {
            let rows = task_events::table
                .filter(task_events::aggregate_id.eq(aggregate_id.into_inner()))
                .order((task_events::occurred_at.asc(), task_events::version.asc()))
                .select(TaskEventRow::as_select())
                .load::<TaskEventRow>(connection)?;
            rows.into_iter().map(row_to_event).collect()
        })
        .await
    }

    async fn find_by_assignee(&self, employee_id: EmployeeId) -> TaskRepositoryResult<Vec<Task>> {
        self.run(move |connection| {
            let rows = tasks::table
                .filter(tasks::assigned_to_id.eq(employee_id.into_inner()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn insert_projection(
    connection: &mut PgConnection,
    row: &TaskRow,
    task_id: TaskId,
) -> TaskRepositoryResult<()> {
    diesel::insert_into(tasks::table)
        .values(row)
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                TaskRepositoryError::DuplicateTask(task_id)
            }
            _ => TaskRepositoryError::persistence(err),
        })?;
    Ok(())
}

fn update_projection(
    connection: &mut PgConnection,
    row: TaskRow,
    task_id: TaskId,
    version: u64,
) -> TaskRepositoryResult<()> {
    let expected = version - 1;
    let expected_column = to_version_column(expected)?;
    let changeset = TaskTransitionChangeset {
        approved_by_id: row.approved_by_id,
        status: row.status,
        version: row.version,
        submitted_at: row.submitted_at,
        completed_at: row.completed_at,
        updated_at: row.updated_at,
        reason: row.reason,
    };

    let updated = diesel::update(
        tasks::table
            .filter(tasks::id.eq(task_id.into_inner()))
            .filter(tasks::version.eq(expected_column)),
    )
    .set(&changeset)
    .execute(connection)?;
    if updated == 1 {
        return Ok(());
    }

    let stored = tasks::table
        .filter(tasks::id.eq(task_id.into_inner()))
        .select(tasks::version)
        .first::<i64>(connection)
        .optional()?;
    match stored {
        None => Err(TaskRepositoryError::NotFound(task_id)),
        Some(actual) => Err(TaskRepositoryError::ConcurrencyConflict {
            task_id,
            expected,
            actual: from_version_column(actual)?,
        }),
    }
}

fn to_version_column(version: u64) -> TaskRepositoryResult<i64> {
    i64::try_from(version).map_err(TaskRepositoryError::persistence)
}

fn from_version_column(version: i64) -> TaskRepositoryResult<u64> {
    u64::try_from(version).map_err(TaskRepositoryError::persistence)
}

fn task_to_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    Ok(TaskRow {
        id: task.id().into_inner(),
        definition_id: task.definition_id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        assigned_to_id: task.assigned_to().into_inner(),
        approved_by_id: task.approved_by().map(EmployeeId::into_inner),
        status: task.status().as_str().to_owned(),
        requires_approval: task.requires_approval(),
        version: to_version_column(task.version())?,
        created_at: task.created_at(),
        submitted_at: task.submitted_at(),
        completed_at: task.completed_at(),
        updated_at: task.updated_at(),
        reason: task.reason().map(str::to_owned),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        definition_id: TaskDefinitionId::from_uuid(row.definition_id),
        title: row.title,
        description: row.description,
        assigned_to: EmployeeId::from_uuid(row.assigned_to_id),
        approved_by: row.approved_by_id.map(EmployeeId::from_uuid),
        status,
        requires_approval: row.requires_approval,
        version: from_version_column(row.version)?,
        created_at: row.created_at,
        submitted_at: row.submitted_at,
        completed_at: row.completed_at,
        updated_at: row.updated_at,
        reason: row.reason,
    }))
}

fn event_to_row(event: &TaskEvent) -> TaskRepositoryResult<TaskEventRow> {
    let mut row = TaskEventRow {
        id: event.id.into_inner(),
        aggregate_id: event.aggregate_id.into_inner(),
        occurred_at: event.timestamp,
        version: to_version_column(event.version)?,
        event_type: event.event_type().as_str().to_owned(),
        assigned_to_id: None,
        task_id: None,
        approved_by_id: None,
        reason: None,
        title: None,
        description: None,
        requires_approval: None,
    };

    match &event.kind {
        TaskEventKind::Assigned {
            assigned_to,
            definition_id,
            title,
            description,
            requires_approval,
        } => {
            row.assigned_to_id = Some(assigned_to.into_inner());
            row.task_id = Some(definition_id.into_inner());
            row.title = Some(title.clone());
            row.description.clone_from(description);
            row.requires_approval = Some(*requires_approval);
        }
        TaskEventKind::Submitted => {}
        TaskEventKind::Completed {
            assigned_to,
            definition_id,
            approved_by,
        } => {
            row.assigned_to_id = Some(assigned_to.into_inner());
            row.task_id = Some(definition_id.into_inner());
            row.approved_by_id = Some(approved_by.into_inner());
        }
        TaskEventKind::Rejected {
            reason,
            approved_by,
        } => {
            row.reason = Some(reason.clone());
            row.approved_by_id = Some(approved_by.into_inner());
        }
        TaskEventKind::Canceled { reason } => {
            row.reason = Some(reason.clone());
        }
    }

    Ok(row)
}

fn row_to_event(row: TaskEventRow) -> TaskRepositoryResult<TaskEvent> {
    let event_type =
        TaskEventType::try_from(row.event_type.as_str()).map_err(TaskRepositoryError::persistence)?;
    let event_id = row.id;
    let missing = |column: &'static str| {
        TaskRepositoryError::persistence(MissingEventColumn {
            event_id,
            event_type,
            column,
        })
    };
    let assigned_to = |value: Option<uuid::Uuid>| {
        value
            .map(EmployeeId::from_uuid)
            .ok_or_else(|| missing("assigned_to_id"))
    };
    let definition_id = |value: Option<uuid::Uuid>| {
        value
            .map(TaskDefinitionId::from_uuid)
            .ok_or_else(|| missing("task_id"))
    };
    let approved_by = |value: Option<uuid::Uuid>| {
        value
            .map(EmployeeId::from_uuid)
            .ok_or_else(|| missing("approved_by_id"))
    };

    let kind = match event_type {
        TaskEventType::Assigned => TaskEventKind::Assigned {
            assigned_to: assigned_to(row.assigned_to_id)?,
            definition_id: definition_id(row.task_id)?,
            title: row.title.ok_or_else(|| missing("title"))?,
            description: row.description,
            requires_approval: row
                .requires_approval
                .ok_or_else(|| missing("requires_approval"))?,
        },
        TaskEventType::Submitted => TaskEventKind::Submitted,
        TaskEventType::Completed => TaskEventKind::Completed {
            assigned_to: assigned_to(row.assigned_to_id)?,
            definition_id: definition_id(row.task_id)?,
            approved_by: approved_by(row.approved_by_id)?,
        },
        TaskEventType::Rejected => TaskEventKind::Rejected {
            reason: row.reason.ok_or_else(|| missing("reason"))?,
            approved_by: approved_by(row.approved_by_id)?,
        },
        TaskEventType::Canceled => TaskEventKind::Canceled {
            reason: row.reason.ok_or_else(|| missing("reason"))?,
        },
    };

    Ok(TaskEvent {
        id: TaskEventId::from_uuid(row.id),
        aggregate_id: TaskId::from_uuid(row.aggregate_id),
        timestamp: row.occurred_at,
        version: from_version_column(row.version)?,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::{event_to_row, row_to_event, row_to_task, task_to_row};
    use crate::catalog::domain::TaskDefinitionId;
    use crate::identity::EmployeeId;
    use crate::task::domain::{
        AssignTask, CancelTask, SubmitTask, TaskCommand, TaskEvent, TaskEventKind, apply, decide,
    };
    use mockable::DefaultClock;
    use rstest::rstest;

    fn assigned_event(requires_approval: bool) -> TaskEvent {
        let command = TaskCommand::Assign(
            AssignTask::new(
                EmployeeId::new(),
                TaskDefinitionId::new(),
                "Write the quarterly report",
                requires_approval,
            )
            .with_description("Numbers for Q3"),
        );
        decide(&command, None, &DefaultClock).expect("assign always decides")
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn assigned_event_row_keeps_creation_payload(#[case] requires_approval: bool) {
        let event = assigned_event(requires_approval);
        let row = event_to_row(&event).expect("row conversion");

        assert_eq!(row.event_type, "TaskAssignedEvent");
        assert_eq!(row.requires_approval, Some(requires_approval));
        assert!(row.approved_by_id.is_none());
        assert_eq!(row_to_event(row).expect("event conversion"), event);
    }

    #[test]
    fn canceled_event_row_only_carries_reason() {
        let created = assigned_event(false);
        let task = apply(None, &created).expect("assigned applies");
        let cancel = TaskCommand::Cancel(CancelTask {
            aggregate_id: task.id(),
            reason: "duplicate".to_owned(),
        });
        let event = decide(&cancel, Some(&task), &DefaultClock).expect("cancel always decides");

        let row = event_to_row(&event).expect("row conversion");

        assert_eq!(row.event_type, "TaskCancelledEvent");
        assert_eq!(row.reason.as_deref(), Some("duplicate"));
        assert!(row.assigned_to_id.is_none());
        assert!(row.task_id.is_none());
        assert_eq!(row_to_event(row).expect("event conversion"), event);
    }

    #[test]
    fn completed_row_without_approver_is_rejected() {
        let created = assigned_event(false);
        let task = apply(None, &created).expect("assigned applies");
        let submit = TaskCommand::Submit(SubmitTask {
            aggregate_id: task.id(),
        });
        let event = decide(&submit, Some(&task), &DefaultClock).expect("submit decides");
        assert!(matches!(event.kind, TaskEventKind::Completed { .. }));

        let mut row = event_to_row(&event).expect("row conversion");
        row.approved_by_id = None;

        assert!(row_to_event(row).is_err());
    }

    #[rstest]
    #[case::title("title")]
    #[case::approval_flag("requires_approval")]
    fn assigned_row_without_payload_column_is_rejected(#[case] column: &str) {
        let mut row = event_to_row(&assigned_event(true)).expect("row conversion");
        match column {
            "title" => row.title = None,
            _ => row.requires_approval = None,
        }

        let err = row_to_event(row).expect_err("incomplete row must not decode");

        assert!(err.to_string().contains(column), "unexpected error {err}");
    }

    #[test]
    fn canceled_row_without_reason_is_rejected() {
        let task = apply(None, &assigned_event(false)).expect("assigned applies");
        let cancel = TaskCommand::Cancel(CancelTask {
            aggregate_id: task.id(),
            reason: "duplicate".to_owned(),
        });
        let event = decide(&cancel, Some(&task), &DefaultClock).expect("cancel always decides");
        let mut row = event_to_row(&event).expect("row conversion");
        row.reason = None;

        let err = row_to_event(row).expect_err("reasonless cancellation must not decode");

        assert!(err.to_string().contains("reason"), "unexpected error {err}");
    }

    #[test]
    fn unknown_event_type_is_a_persistence_error() {
        let mut row = event_to_row(&assigned_event(true)).expect("row conversion");
        row.event_type = "TaskArchivedEvent".to_owned();
        assert!(row_to_event(row).is_err());
    }

    #[test]
    fn task_row_round_trips_projection() {
        let task = apply(None, &assigned_event(true)).expect("assigned applies");
        let row = task_to_row(&task).expect("row conversion");

        assert_eq!(row.status, "assigned");
        assert_eq!(row.version, 1);
        assert_eq!(row_to_task(row).expect("task conversion"), task);
    }
}
