//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Current-state projection, one row per task.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Template the task was assigned from.
        definition_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        #[max_length = 500]
        description -> Nullable<Varchar>,
        /// Assignee.
        assigned_to_id -> Uuid,
        /// Approver, once completed or rejected.
        approved_by_id -> Nullable<Uuid>,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Whether completion needs an approver.
        requires_approval -> Bool,
        /// Optimistic concurrency version.
        version -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// First submission timestamp.
        submitted_at -> Nullable<Timestamptz>,
        /// Closing timestamp (completion, rejection or cancellation).
        completed_at -> Nullable<Timestamptz>,
        /// Timestamp of the latest applied event.
        updated_at -> Timestamptz,
        /// Rejection or cancellation reason.
        #[max_length = 500]
        reason -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Append-only task event log.
    task_events (id) {
        /// Event identifier.
        id -> Uuid,
        /// Task the event belongs to.
        aggregate_id -> Uuid,
        /// When the event was decided.
        #[sql_name = "timestamp"]
        occurred_at -> Timestamptz,
        /// Task version after the event.
        version -> Int8,
        /// Stable discriminator tag.
        #[max_length = 100]
        event_type -> Varchar,
        /// Assignee (assigned and completed events).
        assigned_to_id -> Nullable<Uuid>,
        /// Template (assigned and completed events).
        task_id -> Nullable<Uuid>,
        /// Approver (completed and rejected events).
        approved_by_id -> Nullable<Uuid>,
        /// Reason (rejected and canceled events).
        #[max_length = 500]
        reason -> Nullable<Varchar>,
        /// Title (assigned events).
        #[max_length = 255]
        title -> Nullable<Varchar>,
        /// Description (assigned events).
        #[max_length = 500]
        description -> Nullable<Varchar>,
        /// Approval flag (assigned events).
        requires_approval -> Nullable<Bool>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(tasks, task_events);
