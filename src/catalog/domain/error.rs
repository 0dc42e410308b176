//! Error types for catalog domain validation.

use thiserror::Error;

/// Errors returned while constructing catalog values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogDomainError {
    /// The task template title is empty after trimming.
    #[error("task definition title must not be empty")]
    EmptyTitle,
}
