//! Experience points and level progression.
//!
//! Completing a task grants XP to the assignee's personal level and to the
//! skill the task exercises. Each track levels up against an immutable
//! requirement table from [`domain::LevelingConfig`].
//!
//! - Domain types and XP arithmetic in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The award service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
