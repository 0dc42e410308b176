//! Read-only catalog of task templates ("available tasks").
//!
//! Task templates belong to the organizational directory: they are created
//! and curated outside Taskquest and define the XP a completed task is worth.
//! The catalog exposes lookup by identifier and a paginated listing filtered
//! by the active flag.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Query services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
