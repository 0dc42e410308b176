//! Port contracts for the task template catalog.

pub mod catalog;

pub use catalog::{CatalogError, CatalogResult, TaskCatalog};

#[cfg(test)]
pub use catalog::MockTaskCatalog;
