//! Listing of available task templates.

use crate::catalog::{
    domain::{CatalogPage, CatalogQuery, CompanyId, TaskDefinition, TaskDefinitionId},
    ports::{CatalogResult, TaskCatalog},
};
use crate::identity::Principal;
use std::sync::Arc;
use tracing::debug;

/// Read-only catalog query service used by the transport layer.
#[derive(Clone)]
pub struct CatalogService<T>
where
    T: TaskCatalog,
{
    catalog: Arc<T>,
}

impl<T> CatalogService<T>
where
    T: TaskCatalog,
{
    /// Creates a catalog service.
    #[must_use]
    pub const fn new(catalog: Arc<T>) -> Self {
        Self { catalog }
    }

    /// Lists available task templates for `principal`.
    ///
    /// Superusers see every company's templates; everyone else only sees
    /// those of `company_id`, the caller's company. `limit` is clamped into
    /// `1..=CatalogQuery::MAX_LIMIT`.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::catalog::ports::CatalogError`] from the catalog.
    pub async fn list_available(
        &self,
        principal: Principal,
        company_id: CompanyId,
        only_active: bool,
        offset: u32,
        limit: u32,
    ) -> CatalogResult<CatalogPage> {
        let unscoped = CatalogQuery::clamped(only_active, offset, limit);
        let query = if principal.is_superuser() {
            unscoped
        } else {
            unscoped.within_company(company_id)
        };
        let page = self.catalog.list_definitions(query).await?;
        debug!(
            user_id = %principal.user_id(),
            scoped = query.company_id().is_some(),
            only_active,
            offset,
            limit = query.limit(),
            returned = page.items.len(),
            total = page.total,
            "listed task definitions"
        );
        Ok(page)
    }

    /// Finds a task template by identifier.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::catalog::ports::CatalogError`] from the catalog.
    pub async fn find(&self, id: TaskDefinitionId) -> CatalogResult<Option<TaskDefinition>> {
        self.catalog.find_definition(id).await
    }
}
