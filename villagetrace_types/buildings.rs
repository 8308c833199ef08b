use serde::{Deserialize, Serialize, Serializer};
use std::{fmt, sync::Arc};

use crate::errors::GameError;

/// A building level. Tribal Wars caps levels at 30, but nothing here assumes it.
pub type Level = u16;

/// Village points, either a per-upgrade cost or a cumulative score.
pub type Points = u32;

/// Identifier of a building as used by the game world config (`main`, `barracks`, ...).
///
/// Cheap to clone, since every village state in the search holds one per building.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct BuildingId(Arc<str>);

impl BuildingId {
    pub fn new(id: &str) -> Result<Self, GameError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(GameError::InvalidBuildingId(id.to_string()));
        }
        Ok(Self(Arc::from(id)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BuildingId {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl Serialize for BuildingId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimum level of another building needed before this one can be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingRequirement(pub BuildingId, pub Level);
