//! Identifier types for the task domain.

uuid_id! {
    /// Unique identifier for a task aggregate.
    TaskId
}

uuid_id! {
    /// Unique identifier for a single entry in a task's event log.
    TaskEventId
}
