//! Adapter implementations of the catalog port.

pub mod memory;
pub mod postgres;
