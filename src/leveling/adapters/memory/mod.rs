//! In-memory adapter for progression records.

mod progression;

pub use progression::InMemoryLevelingRepository;
