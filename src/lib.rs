//! Taskquest: workplace gamification backend.
//!
//! Employees complete assignable tasks, earn experience points (XP) for
//! themselves and for the skill a task exercises, and level up against fixed
//! thresholds.
//!
//! # Architecture
//!
//! Taskquest follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Command/event driven task lifecycle engine
//! - [`leveling`]: XP awards and level progression on task completion
//! - [`catalog`]: Read-only task templates supplied by the directory
//! - [`identity`]: Employee identifiers and authenticated principals

#[macro_use]
mod ids;

pub mod catalog;
pub mod identity;
pub mod leveling;
pub mod postgres;
pub mod task;
