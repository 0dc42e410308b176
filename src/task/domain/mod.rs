//! Domain model for the task lifecycle.
//!
//! A task is an aggregate driven by commands. [`decide`] turns a command and
//! the current projection into at most one [`TaskEvent`]; [`apply`] folds an
//! event into the next projection. Both are pure: identifiers and timestamps
//! come from the event or the injected clock, never from ambient state.

mod command;
mod dispatch;
mod error;
mod event;
mod ids;
mod task;

pub use command::{
    ApproveTask, AssignTask, CancelTask, MAX_DESCRIPTION_LENGTH, MAX_REASON_LENGTH,
    MAX_TITLE_LENGTH, RejectTask, SubmitTask, TaskCommand,
};
pub use dispatch::{apply, decide, decide_assignment, replay};
pub use error::{ParseEventTypeError, ParseTaskStatusError, TaskDomainError};
pub use event::{TaskEvent, TaskEventKind, TaskEventType};
pub use ids::{TaskEventId, TaskId};
pub use task::{PersistedTaskData, Task, TaskStatus};
