//! Diesel row models for progression persistence.

use super::schema::{employee_levels, employee_skills};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row and insert model for personal levels.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = employee_levels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmployeeLevelRow {
    pub id: uuid::Uuid,
    pub employee_id: uuid::Uuid,
    pub level: i32,
    pub xp: i64,
    pub xp_multiplier: f64,
    pub level_start_date: DateTime<Utc>,
    pub level_end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Columns an XP award may change on a level record.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = employee_levels)]
pub struct LevelProgressChangeset {
    pub level: i32,
    pub xp: i64,
    pub level_start_date: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Query result row and insert model for skill progression.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = employee_skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmployeeSkillRow {
    pub id: uuid::Uuid,
    pub employee_id: uuid::Uuid,
    pub skill_id: uuid::Uuid,
    pub xp: i64,
    pub level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Columns an XP award may change on a skill record.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = employee_skills)]
pub struct SkillProgressChangeset {
    pub xp: i64,
    pub level: i32,
    pub updated_at: DateTime<Utc>,
}
