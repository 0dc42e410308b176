//! Task lifecycle engine.
//!
//! Commands (assign, submit, approve, reject, cancel) are validated against
//! the current task projection and turned into immutable events. Each event
//! is appended to the task's log and folded into the projection in the same
//! transaction, guarded by an optimistic concurrency version. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
