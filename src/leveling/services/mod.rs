//! Services for awarding XP and reading progression.

mod leveling;

pub use leveling::{LevelingError, LevelingResult, LevelingService};
