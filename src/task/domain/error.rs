//! Error types for task domain validation and parsing.

use super::{TaskEventType, TaskId};
use thiserror::Error;

/// Errors returned by task domain operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The trimmed task title exceeds the storable length.
    #[error("task title is {length} characters, at most {max} allowed")]
    TitleTooLong {
        /// Characters supplied.
        length: usize,
        /// Characters allowed.
        max: usize,
    },

    /// The task description exceeds the storable length.
    #[error("task description is {length} characters, at most {max} allowed")]
    DescriptionTooLong {
        /// Characters supplied.
        length: usize,
        /// Characters allowed.
        max: usize,
    },

    /// A rejection or cancellation reason exceeds the storable length.
    #[error("reason is {length} characters, at most {max} allowed")]
    ReasonTooLong {
        /// Characters supplied.
        length: usize,
        /// Characters allowed.
        max: usize,
    },

    /// A non-creating event was applied without a current task.
    #[error("{event_type} event for task {task_id} has no prior assignment")]
    EventWithoutAggregate {
        /// Aggregate the event belongs to.
        task_id: TaskId,
        /// Kind of the orphaned event.
        event_type: TaskEventType,
    },

    /// An event was applied to a different aggregate.
    #[error("event for task {event_task_id} applied to task {task_id}")]
    AggregateMismatch {
        /// Aggregate the projection belongs to.
        task_id: TaskId,
        /// Aggregate named by the event.
        event_task_id: TaskId,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing event type tags from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task event type: {0}")]
pub struct ParseEventTypeError(pub String);
