//! Read-only port over the directory's task templates.

use crate::catalog::domain::{CatalogPage, CatalogQuery, TaskDefinition, TaskDefinitionId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Task template lookup contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskCatalog: Send + Sync {
    /// Finds a task template by identifier.
    ///
    /// Returns `None` when the template does not exist.
    async fn find_definition(&self, id: TaskDefinitionId)
    -> CatalogResult<Option<TaskDefinition>>;

    /// Lists templates matching the query's active flag and, when set, its
    /// company, ordered by title and then identifier.
    async fn list_definitions(&self, query: CatalogQuery) -> CatalogResult<CatalogPage>;
}

/// Errors returned by catalog implementations.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CatalogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
