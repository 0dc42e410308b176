//! `PostgreSQL` implementation of the [`TaskCatalog`] port.

use super::{models::AvailableTaskRow, schema::available_tasks};
use crate::catalog::{
    domain::{
        CatalogPage, CatalogQuery, CompanyId, DepartmentId, SkillId, TaskDefinition,
        TaskDefinitionData, TaskDefinitionId, XpRewards,
    },
    ports::{CatalogError, CatalogResult, TaskCatalog},
};
use crate::postgres::{PgPool, run_blocking};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;

/// `PostgreSQL`-backed read-only task template catalog.
#[derive(Debug, Clone)]
pub struct PostgresTaskCatalog {
    pool: PgPool,
}

impl PostgresTaskCatalog {
    /// Creates a catalog over a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run<F, T>(&self, f: F) -> CatalogResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CatalogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        run_blocking(
            &self.pool,
            f,
            CatalogError::persistence,
            CatalogError::persistence,
        )
        .await
    }
}

#[async_trait]
impl TaskCatalog for PostgresTaskCatalog {
    async fn find_definition(
        &self,
        id: TaskDefinitionId,
    ) -> CatalogResult<Option<TaskDefinition>> {
        self.run(move |connection| {
            available_tasks::table
                .filter(available_tasks::id.eq(id.into_inner()))
                .select(AvailableTaskRow::as_select())
                .first::<AvailableTaskRow>(connection)
                .optional()
                .map_err(CatalogError::persistence)?
                .map(row_to_definition)
                .transpose()
        })
        .await
    }

    async fn list_definitions(&self, query: CatalogQuery) -> CatalogResult<CatalogPage> {
        self.run(move |connection| {
            let total: i64 = matching(query)
                .count()
                .get_result(connection)
                .map_err(CatalogError::persistence)?;

            let rows = matching(query)
                .order((available_tasks::title.asc(), available_tasks::id.asc()))
                .offset(i64::from(query.offset()))
                .limit(i64::from(query.limit()))
                .select(AvailableTaskRow::as_select())
                .load::<AvailableTaskRow>(connection)
                .map_err(CatalogError::persistence)?;

            let items = rows
                .into_iter()
                .map(row_to_definition)
                .collect::<CatalogResult<Vec<_>>>()?;
            let total_count = u64::try_from(total).map_err(CatalogError::persistence)?;
            Ok(CatalogPage {
                items,
                total: total_count,
            })
        })
        .await
    }
}

fn matching(query: CatalogQuery) -> available_tasks::BoxedQuery<'static, Pg> {
    let mut statement = available_tasks::table
        .filter(available_tasks::is_active.eq(query.only_active()))
        .into_boxed();
    if let Some(company_id) = query.company_id() {
        statement = statement.filter(available_tasks::company_id.eq(company_id.into_inner()));
    }
    statement
}

fn xp_column(value: i64) -> CatalogResult<u64> {
    u64::try_from(value).map_err(CatalogError::persistence)
}

fn row_to_definition(row: AvailableTaskRow) -> CatalogResult<TaskDefinition> {
    let rewards = XpRewards {
        person: xp_column(row.person_xp)?,
        skill: xp_column(row.skill_xp)?,
        department: xp_column(row.department_xp)?,
        company: xp_column(row.company_xp)?,
    };
    let data = TaskDefinitionData {
        id: TaskDefinitionId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        requires_approval: row.requires_approval,
        department_id: DepartmentId::from_uuid(row.department_id),
        skill_id: SkillId::from_uuid(row.skill_id),
        company_id: CompanyId::from_uuid(row.company_id),
        rewards,
        is_active: row.is_active,
    };
    TaskDefinition::try_from(data).map_err(CatalogError::persistence)
}
