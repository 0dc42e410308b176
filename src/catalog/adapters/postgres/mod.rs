//! `PostgreSQL` adapter for the task template catalog.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresTaskCatalog;
