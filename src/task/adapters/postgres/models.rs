//! Diesel row models for task persistence.

use super::schema::{task_events, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row and insert model for task projections.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Template identifier.
    pub definition_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Assignee.
    pub assigned_to_id: uuid::Uuid,
    /// Approver.
    pub approved_by_id: Option<uuid::Uuid>,
    /// Lifecycle status.
    pub status: String,
    /// Approval flag.
    pub requires_approval: bool,
    /// Optimistic concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// First submission timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Latest event timestamp.
    pub updated_at: DateTime<Utc>,
    /// Rejection or cancellation reason.
    pub reason: Option<String>,
}

/// Columns a transition may change on an existing projection.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskTransitionChangeset {
    /// Approver.
    pub approved_by_id: Option<uuid::Uuid>,
    /// Lifecycle status.
    pub status: String,
    /// New version.
    pub version: i64,
    /// First submission timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Latest event timestamp.
    pub updated_at: DateTime<Utc>,
    /// Rejection or cancellation reason.
    pub reason: Option<String>,
}

/// Query result row and insert model for task events.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskEventRow {
    /// Event identifier.
    pub id: uuid::Uuid,
    /// Task the event belongs to.
    pub aggregate_id: uuid::Uuid,
    /// When the event was decided.
    pub occurred_at: DateTime<Utc>,
    /// Task version after the event.
    pub version: i64,
    /// Stable discriminator tag.
    pub event_type: String,
    /// Assignee.
    pub assigned_to_id: Option<uuid::Uuid>,
    /// Template identifier.
    pub task_id: Option<uuid::Uuid>,
    /// Approver.
    pub approved_by_id: Option<uuid::Uuid>,
    /// Reason.
    pub reason: Option<String>,
    /// Title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Approval flag.
    pub requires_approval: Option<bool>,
}
