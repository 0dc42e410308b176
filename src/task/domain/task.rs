//! Task aggregate root and lifecycle status.

use super::{ParseTaskStatusError, TaskId};
use crate::catalog::domain::TaskDefinitionId;
use crate::identity::EmployeeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been handed to an employee.
    Assigned,
    /// Task has been submitted and awaits an approver.
    WaitingApproval,
    /// An approver turned the submission down.
    Rejected,
    /// Task has been completed.
    Completed,
    /// Task has been canceled.
    Canceled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::WaitingApproval => "waiting_approval",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    /// Returns whether submit, approve, and reject commands are inert in this
    /// status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Canceled)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "assigned" => Ok(Self::Assigned),
            "waiting_approval" => Ok(Self::WaitingApproval),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task aggregate root and current-state projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub(super) id: TaskId,
    pub(super) definition_id: TaskDefinitionId,
    pub(super) title: String,
    pub(super) description: Option<String>,
    pub(super) assigned_to: EmployeeId,
    pub(super) approved_by: Option<EmployeeId>,
    pub(super) status: TaskStatus,
    pub(super) requires_approval: bool,
    pub(super) version: u64,
    pub(super) created_at: DateTime<Utc>,
    pub(super) submitted_at: Option<DateTime<Utc>>,
    pub(super) completed_at: Option<DateTime<Utc>>,
    pub(super) updated_at: DateTime<Utc>,
    pub(super) reason: Option<String>,
}

/// Parameter object for reconstructing a persisted task projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Template the task was assigned from.
    pub definition_id: TaskDefinitionId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Assignee.
    pub assigned_to: EmployeeId,
    /// Approver, once completed or rejected.
    pub approved_by: Option<EmployeeId>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Whether completion needs an approver.
    pub requires_approval: bool,
    /// Optimistic concurrency version.
    pub version: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// First submission timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
    /// When the task was closed by completion, rejection or cancellation.
    pub completed_at: Option<DateTime<Utc>>,
    /// Timestamp of the latest applied event.
    pub updated_at: DateTime<Utc>,
    /// Rejection or cancellation reason.
    pub reason: Option<String>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            definition_id: data.definition_id,
            title: data.title,
            description: data.description,
            assigned_to: data.assigned_to,
            approved_by: data.approved_by,
            status: data.status,
            requires_approval: data.requires_approval,
            version: data.version,
            created_at: data.created_at,
            submitted_at: data.submitted_at,
            completed_at: data.completed_at,
            updated_at: data.updated_at,
            reason: data.reason,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the template the task was assigned from.
    #[must_use]
    pub const fn definition_id(&self) -> TaskDefinitionId {
        self.definition_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assigned_to(&self) -> EmployeeId {
        self.assigned_to
    }

    /// Returns the approver, if the task was completed or rejected.
    #[must_use]
    pub const fn approved_by(&self) -> Option<EmployeeId> {
        self.approved_by
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns whether completion needs an approver.
    #[must_use]
    pub const fn requires_approval(&self) -> bool {
        self.requires_approval
    }

    /// Returns the optimistic concurrency version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the first submission timestamp.
    #[must_use]
    pub const fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Returns when the task was last closed.
    ///
    /// Completion, rejection and cancellation all stamp this; cancelling a
    /// closed task moves it to the cancellation time.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the timestamp of the latest applied event.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the rejection or cancellation reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}
