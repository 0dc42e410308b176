//! Pure command decision and event application.

use super::{
    AssignTask, Task, TaskCommand, TaskDomainError, TaskEvent, TaskEventKind, TaskId, TaskStatus,
};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;

/// Decides which event, if any, a command produces against the current task.
///
/// [`TaskCommand::Assign`] ignores `current` and always yields an
/// [`TaskEventKind::Assigned`] event for a fresh aggregate at version 1.
/// Every other command needs a current task and yields an event at
/// `current.version() + 1`, or `None` when the command does not apply to the
/// task's status. `None` is a normal outcome, not an error.
///
/// Cancellation is accepted from every status, including terminal ones.
/// Transition events are never stamped earlier than the task's last update,
/// so a clock stepping backwards cannot reorder a task's log.
#[must_use]
pub fn decide(
    command: &TaskCommand,
    current: Option<&Task>,
    clock: &impl Clock,
) -> Option<TaskEvent> {
    let (task, kind) = match (command, current) {
        (TaskCommand::Assign(assign), _) => return Some(decide_assignment(assign, clock)),
        (_, None) => return None,
        (TaskCommand::Submit(_), Some(task)) => (task, decide_submit(task)?),
        (TaskCommand::Approve(approve), Some(task)) => {
            if !awaiting_approval(task) {
                return None;
            }
            let kind = TaskEventKind::Completed {
                assigned_to: task.assigned_to,
                definition_id: task.definition_id,
                approved_by: approve.approved_by,
            };
            (task, kind)
        }
        (TaskCommand::Reject(reject), Some(task)) => {
            if !awaiting_approval(task) {
                return None;
            }
            let kind = TaskEventKind::Rejected {
                reason: reject.reason.clone(),
                approved_by: reject.approved_by,
            };
            (task, kind)
        }
        (TaskCommand::Cancel(cancel), Some(task)) => (
            task,
            TaskEventKind::Canceled {
                reason: cancel.reason.clone(),
            },
        ),
    };

    let timestamp = now(clock).max(task.updated_at);
    Some(TaskEvent::new(task.id, timestamp, task.version + 1, kind))
}

/// Builds the [`TaskEventKind::Assigned`] event creating a new aggregate at
/// version 1.
#[must_use]
pub fn decide_assignment(command: &AssignTask, clock: &impl Clock) -> TaskEvent {
    let kind = TaskEventKind::Assigned {
        assigned_to: command.assigned_to,
        definition_id: command.definition_id,
        title: command.title.trim().to_owned(),
        description: command.description.clone(),
        requires_approval: command.requires_approval,
    };
    TaskEvent::new(TaskId::new(), now(clock), 1, kind)
}

/// Storage keeps microseconds; truncate so stored and in-memory events agree.
fn now(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(6)
}

fn awaiting_approval(task: &Task) -> bool {
    task.status == TaskStatus::WaitingApproval
}

fn decide_submit(task: &Task) -> Option<TaskEventKind> {
    if !matches!(
        task.status,
        TaskStatus::Assigned | TaskStatus::WaitingApproval
    ) {
        return None;
    }

    if task.requires_approval {
        return Some(TaskEventKind::Submitted);
    }

    Some(TaskEventKind::Completed {
        assigned_to: task.assigned_to,
        definition_id: task.definition_id,
        approved_by: task.assigned_to,
    })
}

/// Applies an event to the current projection and returns the next one.
///
/// # Errors
///
/// Returns [`TaskDomainError::EventWithoutAggregate`] when a non-creating
/// event arrives without a current task, and
/// [`TaskDomainError::AggregateMismatch`] when the event names another task.
pub fn apply(current: Option<Task>, event: &TaskEvent) -> Result<Task, TaskDomainError> {
    if let TaskEventKind::Assigned {
        assigned_to,
        definition_id,
        title,
        description,
        requires_approval,
    } = &event.kind
    {
        return Ok(Task {
            id: event.aggregate_id,
            definition_id: *definition_id,
            title: title.clone(),
            description: description.clone(),
            assigned_to: *assigned_to,
            approved_by: None,
            status: TaskStatus::Assigned,
            requires_approval: *requires_approval,
            version: event.version,
            created_at: event.timestamp,
            submitted_at: None,
            completed_at: None,
            updated_at: event.timestamp,
            reason: None,
        });
    }

    let mut task = current.ok_or(TaskDomainError::EventWithoutAggregate {
        task_id: event.aggregate_id,
        event_type: event.event_type(),
    })?;
    if task.id != event.aggregate_id {
        return Err(TaskDomainError::AggregateMismatch {
            task_id: task.id,
            event_task_id: event.aggregate_id,
        });
    }

    match &event.kind {
        TaskEventKind::Assigned { .. } => {}
        TaskEventKind::Submitted => {
            task.status = TaskStatus::WaitingApproval;
            task.submitted_at = task.submitted_at.or(Some(event.timestamp));
        }
        TaskEventKind::Completed { approved_by, .. } => {
            task.status = TaskStatus::Completed;
            task.approved_by = Some(*approved_by);
            task.completed_at = Some(event.timestamp);
        }
        TaskEventKind::Rejected {
            reason,
            approved_by,
        } => {
            task.status = TaskStatus::Rejected;
            task.approved_by = Some(*approved_by);
            task.reason = Some(reason.clone());
            task.completed_at = Some(event.timestamp);
        }
        TaskEventKind::Canceled { reason } => {
            task.status = TaskStatus::Canceled;
            task.reason = Some(reason.clone());
            task.completed_at = Some(event.timestamp);
        }
    }

    task.version = event.version;
    task.updated_at = event.timestamp;
    Ok(task)
}

/// Folds an ordered event log into a projection.
///
/// Returns `Ok(None)` for an empty log.
///
/// # Errors
///
/// Propagates [`apply`] errors for malformed logs.
pub fn replay<'a>(
    events: impl IntoIterator<Item = &'a TaskEvent>,
) -> Result<Option<Task>, TaskDomainError> {
    events
        .into_iter()
        .try_fold(None, |current, event| apply(current, event).map(Some))
}
