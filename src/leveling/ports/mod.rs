//! Port contracts for progression persistence.

pub mod repository;

pub use repository::{
    LevelingRepository, LevelingRepositoryError, LevelingRepositoryResult, ProgressionUpdate,
};

#[cfg(test)]
pub use repository::MockLevelingRepository;
