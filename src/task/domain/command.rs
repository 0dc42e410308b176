//! Commands accepted by the task lifecycle engine.

use super::{TaskDomainError, TaskId};
use crate::catalog::domain::TaskDefinitionId;
use crate::identity::{EmployeeId, Principal};
use serde::{Deserialize, Serialize};

/// Longest task title, in characters, after trimming.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Longest task description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Longest rejection or cancellation reason, in characters.
pub const MAX_REASON_LENGTH: usize = 500;

fn check_reason(reason: &str) -> Result<(), TaskDomainError> {
    let length = reason.chars().count();
    if length > MAX_REASON_LENGTH {
        return Err(TaskDomainError::ReasonTooLong {
            length,
            max: MAX_REASON_LENGTH,
        });
    }
    Ok(())
}

/// Assigns a new task built from a template to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignTask {
    /// Employee receiving the task.
    pub assigned_to: EmployeeId,
    /// Template the task is built from.
    pub definition_id: TaskDefinitionId,
    /// Task title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Whether completion needs an approver.
    pub requires_approval: bool,
}

impl AssignTask {
    /// Creates an assignment command without a description.
    #[must_use]
    pub fn new(
        assigned_to: EmployeeId,
        definition_id: TaskDefinitionId,
        title: impl Into<String>,
        requires_approval: bool,
    ) -> Self {
        Self {
            assigned_to,
            definition_id,
            title: title.into(),
            description: None,
            requires_approval,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks the command's free-text fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank,
    /// [`TaskDomainError::TitleTooLong`] past [`MAX_TITLE_LENGTH`] and
    /// [`TaskDomainError::DescriptionTooLong`] past
    /// [`MAX_DESCRIPTION_LENGTH`].
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let title_length = title.chars().count();
        if title_length > MAX_TITLE_LENGTH {
            return Err(TaskDomainError::TitleTooLong {
                length: title_length,
                max: MAX_TITLE_LENGTH,
            });
        }
        if let Some(description) = &self.description {
            let length = description.chars().count();
            if length > MAX_DESCRIPTION_LENGTH {
                return Err(TaskDomainError::DescriptionTooLong {
                    length,
                    max: MAX_DESCRIPTION_LENGTH,
                });
            }
        }
        Ok(())
    }
}

/// Submits an assigned task for completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitTask {
    /// Target task.
    pub aggregate_id: TaskId,
}

/// Approves a submitted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveTask {
    /// Target task.
    pub aggregate_id: TaskId,
    /// Approving employee.
    pub approved_by: EmployeeId,
}

impl ApproveTask {
    /// Builds an approval on behalf of an authenticated principal.
    #[must_use]
    pub const fn by_principal(aggregate_id: TaskId, principal: Principal) -> Self {
        Self {
            aggregate_id,
            approved_by: principal.user_id(),
        }
    }
}

/// Rejects a submitted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectTask {
    /// Target task.
    pub aggregate_id: TaskId,
    /// Why the submission was turned down.
    pub reason: String,
    /// Rejecting employee.
    pub approved_by: EmployeeId,
}

impl RejectTask {
    /// Builds a rejection on behalf of an authenticated principal.
    #[must_use]
    pub fn by_principal(
        aggregate_id: TaskId,
        principal: Principal,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            aggregate_id,
            reason: reason.into(),
            approved_by: principal.user_id(),
        }
    }
}

impl RejectTask {
    /// Checks the rejection reason.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ReasonTooLong`] past [`MAX_REASON_LENGTH`].
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        check_reason(&self.reason)
    }
}

/// Cancels a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelTask {
    /// Target task.
    pub aggregate_id: TaskId,
    /// Why the task was canceled.
    pub reason: String,
}

impl CancelTask {
    /// Checks the cancellation reason.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ReasonTooLong`] past [`MAX_REASON_LENGTH`].
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        check_reason(&self.reason)
    }
}

/// Closed set of task lifecycle commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskCommand {
    /// Create a new task.
    Assign(AssignTask),
    /// Submit a task.
    Submit(SubmitTask),
    /// Approve a submitted task.
    Approve(ApproveTask),
    /// Reject a submitted task.
    Reject(RejectTask),
    /// Cancel a task.
    Cancel(CancelTask),
}

impl TaskCommand {
    /// Returns the targeted aggregate, or `None` for [`TaskCommand::Assign`]
    /// which always creates a new one.
    #[must_use]
    pub const fn aggregate_id(&self) -> Option<TaskId> {
        match self {
            Self::Assign(_) => None,
            Self::Submit(command) => Some(command.aggregate_id),
            Self::Approve(command) => Some(command.aggregate_id),
            Self::Reject(command) => Some(command.aggregate_id),
            Self::Cancel(command) => Some(command.aggregate_id),
        }
    }

    /// Checks the command's free-text fields against storable limits.
    ///
    /// # Errors
    ///
    /// Returns the [`TaskDomainError`] of the first failing field.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        match self {
            Self::Assign(command) => command.validate(),
            Self::Reject(command) => command.validate(),
            Self::Cancel(command) => command.validate(),
            Self::Submit(_) | Self::Approve(_) => Ok(()),
        }
    }

    /// Returns a short label for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Assign(_) => "assign",
            Self::Submit(_) => "submit",
            Self::Approve(_) => "approve",
            Self::Reject(_) => "reject",
            Self::Cancel(_) => "cancel",
        }
    }
}

impl From<AssignTask> for TaskCommand {
    fn from(command: AssignTask) -> Self {
        Self::Assign(command)
    }
}

impl From<SubmitTask> for TaskCommand {
    fn from(command: SubmitTask) -> Self {
        Self::Submit(command)
    }
}

impl From<ApproveTask> for TaskCommand {
    fn from(command: ApproveTask) -> Self {
        Self::Approve(command)
    }
}

impl From<RejectTask> for TaskCommand {
    fn from(command: RejectTask) -> Self {
        Self::Reject(command)
    }
}

impl From<CancelTask> for TaskCommand {
    fn from(command: CancelTask) -> Self {
        Self::Cancel(command)
    }
}
