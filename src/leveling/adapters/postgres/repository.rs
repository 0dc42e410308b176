//! `PostgreSQL` implementation of the [`LevelingRepository`] port.

use super::{
    models::{EmployeeLevelRow, EmployeeSkillRow, LevelProgressChangeset, SkillProgressChangeset},
    schema::{employee_levels, employee_skills},
};
use crate::catalog::domain::SkillId;
use crate::identity::EmployeeId;
use crate::leveling::{
    domain::{
        EmployeeLevel, EmployeeLevelId, EmployeeSkill, EmployeeSkillId, PersistedLevelData,
        PersistedSkillData, ProgressionOutcome, XpMultiplier,
    },
    ports::{
        LevelingRepository, LevelingRepositoryError, LevelingRepositoryResult, ProgressionUpdate,
    },
};
use crate::postgres::{PgPool, run_blocking};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed progression repository.
///
/// [`LevelingRepository::update_progression`] locks the employee's level row
/// with `SELECT ... FOR UPDATE`, so concurrent awards for the same employee
/// queue behind each other while other employees proceed.
#[derive(Debug, Clone)]
pub struct PostgresLevelingRepository {
    pool: PgPool,
}

impl PostgresLevelingRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run<F, T>(&self, f: F) -> LevelingRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> LevelingRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        run_blocking(
            &self.pool,
            f,
            LevelingRepositoryError::persistence,
            LevelingRepositoryError::persistence,
        )
        .await
    }
}

impl From<DieselError> for LevelingRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl LevelingRepository for PostgresLevelingRepository {
    async fn create_level(&self, level: &EmployeeLevel) -> LevelingRepositoryResult<()> {
        let row = level_to_row(level)?;
        let employee_id = level.employee_id();
        self.run(move |connection| {
            diesel::insert_into(employee_levels::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        LevelingRepositoryError::DuplicateLevel(employee_id)
                    }
                    _ => LevelingRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_level(
        &self,
        employee_id: EmployeeId,
    ) -> LevelingRepositoryResult<Option<EmployeeLevel>> {
        self.run(move |connection| {
            employee_levels::table
                .filter(employee_levels::employee_id.eq(employee_id.into_inner()))
                .select(EmployeeLevelRow::as_select())
                .first::<EmployeeLevelRow>(connection)
                .optional()?
                .map(row_to_level)
                .transpose()
        })
        .await
    }

    async fn find_skills(
        &self,
        employee_id: EmployeeId,
    ) -> LevelingRepositoryResult<Vec<EmployeeSkill>> {
        self.run(move |connection| {
            let rows = employee_skills::table
                .filter(employee_skills::employee_id.eq(employee_id.into_inner()))
                .order((employee_skills::created_at.asc(), employee_skills::skill_id.asc()))
                .select(EmployeeSkillRow::as_select())
                .load::<EmployeeSkillRow>(connection)?;
            rows.into_iter().map(row_to_skill).collect()
        })
        .await
    }

    async fn update_progression(
        &self,
        employee_id: EmployeeId,
        skill_id: SkillId,
        now: DateTime<Utc>,
        update: ProgressionUpdate,
    ) -> LevelingRepositoryResult<ProgressionOutcome> {
        self.run(move |connection| {
            connection.transaction::<_, LevelingRepositoryError, _>(|tx| {
                let level_row = employee_levels::table
                    .filter(employee_levels::employee_id.eq(employee_id.into_inner()))
                    .select(EmployeeLevelRow::as_select())
                    .for_update()
                    .first::<EmployeeLevelRow>(tx)
                    .optional()?
                    .ok_or(LevelingRepositoryError::LevelNotFound(employee_id))?;
                let mut level = row_to_level(level_row)?;

                let existing = employee_skills::table
                    .filter(employee_skills::employee_id.eq(employee_id.into_inner()))
                    .filter(employee_skills::skill_id.eq(skill_id.into_inner()))
                    .select(EmployeeSkillRow::as_select())
                    .first::<EmployeeSkillRow>(tx)
                    .optional()?
                    .map(row_to_skill)
                    .transpose()?;
                let skill_created = existing.is_none();
                let mut skill =
                    existing.unwrap_or_else(|| EmployeeSkill::start(employee_id, skill_id, now));

                let awards = update(&mut level, &mut skill);

                persist_level(tx, &level)?;
                if skill_created {
                    diesel::insert_into(employee_skills::table)
                        .values(&skill_to_row(&skill)?)
                        .execute(tx)?;
                } else {
                    persist_skill(tx, &skill)?;
                }

                Ok(ProgressionOutcome {
                    level,
                    skill,
                    skill_created,
                    awards,
                })
            })
        })
        .await
    }
}

fn persist_level(
    connection: &mut PgConnection,
    level: &EmployeeLevel,
) -> LevelingRepositoryResult<()> {
    let changeset = LevelProgressChangeset {
        level: to_level_column(level.level())?,
        xp: to_xp_column(level.xp())?,
        level_start_date: level.level_start_date(),
        updated_at: level.updated_at(),
    };
    diesel::update(employee_levels::table.find(level.id().into_inner()))
        .set(&changeset)
        .execute(connection)?;
    Ok(())
}

fn persist_skill(
    connection: &mut PgConnection,
    skill: &EmployeeSkill,
) -> LevelingRepositoryResult<()> {
    let changeset = SkillProgressChangeset {
        xp: to_xp_column(skill.xp())?,
        level: to_level_column(skill.level())?,
        updated_at: skill.updated_at(),
    };
    diesel::update(employee_skills::table.find(skill.id().into_inner()))
        .set(&changeset)
        .execute(connection)?;
    Ok(())
}

fn to_level_column(level: u32) -> LevelingRepositoryResult<i32> {
    i32::try_from(level).map_err(LevelingRepositoryError::persistence)
}

fn from_level_column(level: i32) -> LevelingRepositoryResult<u32> {
    u32::try_from(level).map_err(LevelingRepositoryError::persistence)
}

fn to_xp_column(xp: u64) -> LevelingRepositoryResult<i64> {
    i64::try_from(xp).map_err(LevelingRepositoryError::persistence)
}

fn from_xp_column(xp: i64) -> LevelingRepositoryResult<u64> {
    u64::try_from(xp).map_err(LevelingRepositoryError::persistence)
}

fn level_to_row(level: &EmployeeLevel) -> LevelingRepositoryResult<EmployeeLevelRow> {
    Ok(EmployeeLevelRow {
        id: level.id().into_inner(),
        employee_id: level.employee_id().into_inner(),
        level: to_level_column(level.level())?,
        xp: to_xp_column(level.xp())?,
        xp_multiplier: level.xp_multiplier().value(),
        level_start_date: level.level_start_date(),
        level_end_date: level.level_end_date(),
        created_at: level.created_at(),
        updated_at: level.updated_at(),
    })
}

fn row_to_level(row: EmployeeLevelRow) -> LevelingRepositoryResult<EmployeeLevel> {
    let xp_multiplier =
        XpMultiplier::new(row.xp_multiplier).map_err(LevelingRepositoryError::persistence)?;
    Ok(EmployeeLevel::from_persisted(PersistedLevelData {
        id: EmployeeLevelId::from_uuid(row.id),
        employee_id: EmployeeId::from_uuid(row.employee_id),
        level: from_level_column(row.level)?,
        xp: from_xp_column(row.xp)?,
        xp_multiplier,
        level_start_date: row.level_start_date,
        level_end_date: row.level_end_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn skill_to_row(skill: &EmployeeSkill) -> LevelingRepositoryResult<EmployeeSkillRow> {
    Ok(EmployeeSkillRow {
        id: skill.id().into_inner(),
        employee_id: skill.employee_id().into_inner(),
        skill_id: skill.skill_id().into_inner(),
        xp: to_xp_column(skill.xp())?,
        level: to_level_column(skill.level())?,
        created_at: skill.created_at(),
        updated_at: skill.updated_at(),
    })
}

fn row_to_skill(row: EmployeeSkillRow) -> LevelingRepositoryResult<EmployeeSkill> {
    Ok(EmployeeSkill::from_persisted(PersistedSkillData {
        id: EmployeeSkillId::from_uuid(row.id),
        employee_id: EmployeeId::from_uuid(row.employee_id),
        skill_id: SkillId::from_uuid(row.skill_id),
        xp: from_xp_column(row.xp)?,
        level: from_level_column(row.level)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

#[cfg(test)]
mod tests {
    //! Row conversion tests.

    use super::*;
    use crate::leveling::domain::XpRequirements;
    use rstest::rstest;

    fn timestamp() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
    }

    #[rstest]
    fn level_round_trips_through_row() -> eyre::Result<()> {
        let multiplier = XpMultiplier::new(1.5)?;
        let mut level = EmployeeLevel::register(EmployeeId::new(), multiplier, timestamp());
        level.grant(200, &XpRequirements::default(), timestamp());

        let restored = row_to_level(level_to_row(&level)?)?;

        eyre::ensure!(restored == level);
        Ok(())
    }

    #[rstest]
    #[case(-1, 0)]
    #[case(0, -5)]
    fn negative_columns_are_rejected(#[case] level: i32, #[case] xp: i64) {
        let row = EmployeeSkillRow {
            id: uuid::Uuid::new_v4(),
            employee_id: uuid::Uuid::new_v4(),
            skill_id: uuid::Uuid::new_v4(),
            xp,
            level,
            created_at: timestamp(),
            updated_at: timestamp(),
        };
        assert!(matches!(
            row_to_skill(row),
            Err(LevelingRepositoryError::Persistence(_))
        ));
    }

    #[test]
    fn invalid_stored_multiplier_is_a_persistence_error() -> eyre::Result<()> {
        let level = EmployeeLevel::register(EmployeeId::new(), XpMultiplier::ONE, timestamp());
        let mut row = level_to_row(&level)?;
        row.xp_multiplier = -2.0;
        eyre::ensure!(matches!(
            row_to_level(row),
            Err(LevelingRepositoryError::Persistence(_))
        ));
        Ok(())
    }
}
