use serde::Serialize;
use std::{collections::BTreeMap, fmt::Write};

use villagetrace_types::buildings::{BuildingId, Level, Points};

/// Separates a building id from its level inside a [`CanonicalKey`].
const LEVEL_SEPARATOR: char = '=';
/// Separates two buildings inside a [`CanonicalKey`].
const ENTRY_SEPARATOR: char = ';';

/// A village composition (level of every building) and the points it is worth.
///
/// Points only depend on the composition, never on the upgrade order that led to it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct VillageState {
    levels: BTreeMap<BuildingId, Level>,
    score: Points,
}

impl VillageState {
    pub fn new(levels: BTreeMap<BuildingId, Level>, score: Points) -> Self {
        Self { levels, score }
    }

    pub fn score(&self) -> Points {
        self.score
    }

    pub fn level(&self, building: &BuildingId) -> Option<Level> {
        self.levels.get(building).copied()
    }

    /// Iterates `(building, level)` pairs sorted by building id.
    pub fn levels(&self) -> impl Iterator<Item = (&BuildingId, Level)> {
        self.levels.iter().map(|(id, level)| (id, *level))
    }

    pub fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::from_levels(self.levels())
    }

    /// Returns a copy of this state with `building` one level higher and `points` more score.
    pub(crate) fn upgraded(&self, building: &BuildingId, points: Points) -> Self {
        let mut levels = self.levels.clone();
        if let Some(level) = levels.get_mut(building) {
            *level += 1;
        }
        Self {
            levels,
            score: self.score + points,
        }
    }
}

/// Identity of a composition, used to detect the same village reached through different paths.
///
/// Entries are `id=level`, sorted by id and joined with `;`. Building ids can't contain
/// either separator, so two keys are equal only if the compositions are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub fn from_levels<'a>(levels: impl IntoIterator<Item = (&'a BuildingId, Level)>) -> Self {
        let mut entries: Vec<(&BuildingId, Level)> = levels.into_iter().collect();
        entries.sort_unstable_by_key(|(id, _)| *id);

        let mut key = String::with_capacity(entries.len() * 12);
        for (i, (id, level)) in entries.into_iter().enumerate() {
            if i > 0 {
                key.push(ENTRY_SEPARATOR);
            }
            // Writing into a String never fails.
            let _ = write!(key, "{id}{LEVEL_SEPARATOR}{level}");
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
