//! `PostgreSQL` adapter for progression records.

mod models;
mod repository;
mod schema;

pub use repository::PostgresLevelingRepository;
