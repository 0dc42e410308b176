//! Adapter implementations for progression persistence.

pub mod memory;
pub mod postgres;
