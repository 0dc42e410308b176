//! Task lifecycle events.
//!
//! Events are immutable facts. Their [`TaskEventType`] tags are persisted
//! verbatim in the `task_events.event_type` column and read by audit and
//! analytics tooling, so the strings never change.

use super::{ParseEventTypeError, TaskEventId, TaskId};
use crate::catalog::domain::TaskDefinitionId;
use crate::identity::EmployeeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator tag of a task event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskEventType {
    /// Task was created and handed to an employee.
    #[serde(rename = "TaskAssignedEvent")]
    Assigned,
    /// Task was submitted for approval.
    #[serde(rename = "TaskSubmittedEvent")]
    Submitted,
    /// Task was completed.
    #[serde(rename = "TaskCompletedEvent")]
    Completed,
    /// Submission was rejected.
    #[serde(rename = "TaskRejectedEvent")]
    Rejected,
    /// Task was canceled.
    #[serde(rename = "TaskCancelledEvent")]
    Canceled,
}

impl TaskEventType {
    /// Returns the persisted tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "TaskAssignedEvent",
            Self::Submitted => "TaskSubmittedEvent",
            Self::Completed => "TaskCompletedEvent",
            Self::Rejected => "TaskRejectedEvent",
            Self::Canceled => "TaskCancelledEvent",
        }
    }
}

impl TryFrom<&str> for TaskEventType {
    type Error = ParseEventTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "TaskAssignedEvent" => Ok(Self::Assigned),
            "TaskSubmittedEvent" => Ok(Self::Submitted),
            "TaskCompletedEvent" => Ok(Self::Completed),
            "TaskRejectedEvent" => Ok(Self::Rejected),
            "TaskCancelledEvent" => Ok(Self::Canceled),
            _ => Err(ParseEventTypeError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific payload of a task event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum TaskEventKind {
    /// Task was created and handed to an employee.
    #[serde(rename = "TaskAssignedEvent")]
    Assigned {
        /// Assignee.
        assigned_to: EmployeeId,
        /// Template the task is built from.
        definition_id: TaskDefinitionId,
        /// Task title.
        title: String,
        /// Task description.
        description: Option<String>,
        /// Whether completion needs an approver.
        requires_approval: bool,
    },
    /// Task was submitted for approval.
    #[serde(rename = "TaskSubmittedEvent")]
    Submitted,
    /// Task was completed.
    #[serde(rename = "TaskCompletedEvent")]
    Completed {
        /// Assignee who earns the rewards.
        assigned_to: EmployeeId,
        /// Template defining the rewards.
        definition_id: TaskDefinitionId,
        /// Approver; the assignee for self-approved tasks.
        approved_by: EmployeeId,
    },
    /// Submission was rejected.
    #[serde(rename = "TaskRejectedEvent")]
    Rejected {
        /// Why the submission was turned down.
        reason: String,
        /// Rejecting employee.
        approved_by: EmployeeId,
    },
    /// Task was canceled.
    #[serde(rename = "TaskCancelledEvent")]
    Canceled {
        /// Why the task was canceled.
        reason: String,
    },
}

impl TaskEventKind {
    /// Returns the discriminator tag.
    #[must_use]
    pub const fn event_type(&self) -> TaskEventType {
        match self {
            Self::Assigned { .. } => TaskEventType::Assigned,
            Self::Submitted => TaskEventType::Submitted,
            Self::Completed { .. } => TaskEventType::Completed,
            Self::Rejected { .. } => TaskEventType::Rejected,
            Self::Canceled { .. } => TaskEventType::Canceled,
        }
    }
}

/// One entry in a task's append-only event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEvent {
    /// Event identifier.
    pub id: TaskEventId,
    /// Task the event belongs to.
    pub aggregate_id: TaskId,
    /// When the event was decided.
    pub timestamp: DateTime<Utc>,
    /// Task version after the event is applied.
    pub version: u64,
    /// Type-specific payload.
    #[serde(flatten)]
    pub kind: TaskEventKind,
}

impl TaskEvent {
    /// Creates an event with a fresh identifier.
    #[must_use]
    pub fn new(
        aggregate_id: TaskId,
        timestamp: DateTime<Utc>,
        version: u64,
        kind: TaskEventKind,
    ) -> Self {
        Self {
            id: TaskEventId::new(),
            aggregate_id,
            timestamp,
            version,
            kind,
        }
    }

    /// Returns the discriminator tag.
    #[must_use]
    pub const fn event_type(&self) -> TaskEventType {
        self.kind.event_type()
    }

    /// Returns whether the event completes its task.
    #[must_use]
    pub const fn is_completion(&self) -> bool {
        matches!(self.kind, TaskEventKind::Completed { .. })
    }
}
