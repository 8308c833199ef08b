use thiserror::Error;

use crate::buildings::{BuildingId, Level};

/// Errors for domain logic (catalog rules and search).
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid building id {0:?}: only ASCII letters, digits and '_' are allowed")]
    InvalidBuildingId(String),

    #[error("Building {0} is defined more than once")]
    DuplicateBuilding(BuildingId),

    #[error("Building {building} has max level {max} below min level {min}")]
    InvalidLevelBounds {
        building: BuildingId,
        min: Level,
        max: Level,
    },

    #[error("Building {building} starts at level {start} but its max level is {max}")]
    InvalidStartLevel {
        building: BuildingId,
        start: Level,
        max: Level,
    },

    #[error("Building {0} not found")]
    BuildingNotFound(BuildingId),

    #[error("Building {0} has already reached max level")]
    BuildingMaxLevelReached(BuildingId),

    #[error("No point table for building {0}")]
    MissingPointTable(BuildingId),

    #[error("Point table for {building} has {actual} entries, {expected} required")]
    PointTableTooShort {
        building: BuildingId,
        expected: usize,
        actual: usize,
    },

    #[error("Upgrading {building} from level {level} is worth 0 points")]
    ZeroPointUpgrade { building: BuildingId, level: Level },

    #[error("Building {building} requires {requirement}, which is not present in config")]
    UnknownPrerequisite {
        building: BuildingId,
        requirement: BuildingId,
    },

    #[error("Score increase #{layer} is zero")]
    NonPositiveIncrease { layer: usize },

    #[error("Frontier grew to {size} states after layer #{layer} (limit {limit})")]
    FrontierLimitExceeded {
        layer: usize,
        size: usize,
        limit: usize,
    },
}
