//! In-memory task template catalog for tests and local wiring.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::catalog::{
    domain::{CatalogPage, CatalogQuery, TaskDefinition, TaskDefinitionId},
    ports::{CatalogError, CatalogResult, TaskCatalog},
};

/// Thread-safe in-memory catalog.
///
/// Stands in for the organizational directory; templates are seeded with
/// [`InMemoryTaskCatalog::insert`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskCatalog {
    definitions: Arc<RwLock<HashMap<TaskDefinitionId, TaskDefinition>>>,
}

impl InMemoryTaskCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a template.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Persistence`] when the lock is poisoned.
    pub fn insert(&self, definition: TaskDefinition) -> CatalogResult<()> {
        let mut definitions = self.definitions.write().map_err(poisoned)?;
        definitions.insert(definition.id(), definition);
        Ok(())
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> CatalogError {
    CatalogError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskCatalog for InMemoryTaskCatalog {
    async fn find_definition(
        &self,
        id: TaskDefinitionId,
    ) -> CatalogResult<Option<TaskDefinition>> {
        let definitions = self.definitions.read().map_err(poisoned)?;
        Ok(definitions.get(&id).cloned())
    }

    async fn list_definitions(&self, query: CatalogQuery) -> CatalogResult<CatalogPage> {
        let definitions = self.definitions.read().map_err(poisoned)?;
        let mut matching: Vec<&TaskDefinition> = definitions
            .values()
            .filter(|definition| definition.is_active() == query.only_active())
            .filter(|definition| {
                query
                    .company_id()
                    .is_none_or(|company_id| definition.company_id() == company_id)
            })
            .collect();
        matching.sort_by(|left, right| {
            left.title()
                .cmp(right.title())
                .then_with(|| left.id().cmp(&right.id()))
        });

        let total = u64::try_from(matching.len()).map_err(CatalogError::persistence)?;
        let offset = usize::try_from(query.offset()).map_err(CatalogError::persistence)?;
        let limit = usize::try_from(query.limit()).map_err(CatalogError::persistence)?;
        let items = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(CatalogPage { items, total })
    }
}
