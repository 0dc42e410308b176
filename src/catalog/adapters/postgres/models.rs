//! Diesel row model for task templates.

use super::schema::available_tasks;
use diesel::prelude::*;

/// Query result row for task templates.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = available_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AvailableTaskRow {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: Option<String>,
    pub requires_approval: bool,
    pub department_xp: i64,
    pub skill_xp: i64,
    pub company_xp: i64,
    pub person_xp: i64,
    pub is_active: bool,
    pub department_id: uuid::Uuid,
    pub skill_id: uuid::Uuid,
    pub company_id: uuid::Uuid,
}
