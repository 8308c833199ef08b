use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use villagetrace_types::{
    buildings::{BuildingId, BuildingRequirement, Level, Points},
    errors::GameError,
};

use super::village::VillageState;

/// Per-level point costs, keyed by building. `table[L]` is worth upgrading from `L` to `L + 1`.
pub type PointTables = BTreeMap<BuildingId, Vec<Points>>;

/// Prerequisites, keyed by building: other building -> minimum level.
pub type RequirementTables = BTreeMap<BuildingId, BTreeMap<BuildingId, Level>>;

/// Level bounds of a building as published by the game world config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBuilding {
    pub id: BuildingId,
    pub min_level: Level,
    pub max_level: Level,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingDefinition {
    id: BuildingId,
    min_level: Level,
    max_level: Level,
    start_level: Level,
    prerequisites: Vec<BuildingRequirement>,
    point_table: Vec<Points>,
}

impl BuildingDefinition {
    /// Returns a validated building definition.
    ///
    /// The point table is truncated to `max_level` entries. Entries below `start_level`
    /// are never spent by a village, every other entry must be worth something.
    pub fn new(
        id: BuildingId,
        min_level: Level,
        max_level: Level,
        start_level: Level,
        prerequisites: Vec<BuildingRequirement>,
        mut point_table: Vec<Points>,
    ) -> Result<Self, GameError> {
        if max_level < min_level {
            return Err(GameError::InvalidLevelBounds {
                building: id,
                min: min_level,
                max: max_level,
            });
        }

        if start_level > max_level {
            return Err(GameError::InvalidStartLevel {
                building: id,
                start: start_level,
                max: max_level,
            });
        }

        let expected = max_level as usize;
        if point_table.len() < expected {
            return Err(GameError::PointTableTooShort {
                building: id,
                expected,
                actual: point_table.len(),
            });
        }
        point_table.truncate(expected);

        if let Some(level) = (start_level..max_level).find(|&l| point_table[l as usize] == 0) {
            return Err(GameError::ZeroPointUpgrade { building: id, level });
        }

        Ok(Self {
            id,
            min_level,
            max_level,
            start_level,
            prerequisites,
            point_table,
        })
    }

    pub fn id(&self) -> &BuildingId {
        &self.id
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    pub fn max_level(&self) -> Level {
        self.max_level
    }

    pub fn start_level(&self) -> Level {
        self.start_level
    }

    pub fn prerequisites(&self) -> &[BuildingRequirement] {
        &self.prerequisites
    }

    pub fn point_table(&self) -> &[Points] {
        &self.point_table
    }

    /// Points gained by upgrading from `level` to `level + 1`, if such an upgrade exists.
    pub fn upgrade_points(&self, level: Level) -> Option<Points> {
        self.point_table.get(level as usize).copied()
    }
}

/// All the buildings of a game world, sorted by id. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingCatalog {
    buildings: BTreeMap<BuildingId, BuildingDefinition>,
}

impl BuildingCatalog {
    pub fn new(
        definitions: impl IntoIterator<Item = BuildingDefinition>,
    ) -> Result<Self, GameError> {
        let mut buildings = BTreeMap::new();
        for definition in definitions {
            if buildings.contains_key(definition.id()) {
                return Err(GameError::DuplicateBuilding(definition.id));
            }
            buildings.insert(definition.id.clone(), definition);
        }

        for definition in buildings.values() {
            for BuildingRequirement(requirement, _) in &definition.prerequisites {
                if !buildings.contains_key(requirement) {
                    return Err(GameError::UnknownPrerequisite {
                        building: definition.id.clone(),
                        requirement: requirement.clone(),
                    });
                }
            }
        }

        Ok(Self { buildings })
    }

    /// Builds the catalog out of the world config, the point tables and the requirements.
    ///
    /// Buildings listed in `prebuilt` exist from the start at level 1 (or their min level,
    /// if higher). Table entries for buildings the world doesn't have are skipped.
    pub fn assemble(
        raw: Vec<RawBuilding>,
        points: &PointTables,
        requirements: &RequirementTables,
        prebuilt: &[BuildingId],
    ) -> Result<Self, GameError> {
        let world_ids: Vec<&BuildingId> = raw.iter().map(|b| &b.id).collect();
        for id in points.keys().chain(requirements.keys()) {
            if !world_ids.contains(&id) {
                tracing::warn!(building = %id, "Building not present in world config, skipping");
            }
        }
        for id in prebuilt {
            if !world_ids.contains(&id) {
                tracing::warn!(
                    building = %id,
                    "Prebuilt building not present in world config, ignoring"
                );
            }
        }

        let mut definitions = Vec::with_capacity(raw.len());
        for building in raw {
            let point_table = points
                .get(&building.id)
                .cloned()
                .ok_or_else(|| GameError::MissingPointTable(building.id.clone()))?;

            let prerequisites = requirements
                .get(&building.id)
                .map(|reqs| {
                    reqs.iter()
                        .map(|(id, level)| BuildingRequirement(id.clone(), *level))
                        .collect()
                })
                .unwrap_or_default();

            let start_level = if prebuilt.contains(&building.id) {
                building.min_level.max(1)
            } else {
                building.min_level
            };

            definitions.push(BuildingDefinition::new(
                building.id,
                building.min_level,
                building.max_level,
                start_level,
                prerequisites,
                point_table,
            )?);
        }

        Self::new(definitions)
    }

    pub fn get(&self, id: &BuildingId) -> Option<&BuildingDefinition> {
        self.buildings.get(id)
    }

    /// Iterates buildings in id order.
    pub fn iter(&self) -> impl Iterator<Item = &BuildingDefinition> {
        self.buildings.values()
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Returns a freshly founded village: every building at its start level.
    pub fn start_state(&self, starting_score: Points) -> VillageState {
        let levels = self
            .buildings
            .values()
            .map(|b| (b.id.clone(), b.start_level))
            .collect();
        VillageState::new(levels, starting_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{BuildingFactoryOptions, building_factory, id};

    fn raw(name: &str, min_level: Level, max_level: Level) -> RawBuilding {
        RawBuilding {
            id: id(name),
            min_level,
            max_level,
        }
    }

    #[test]
    fn test_new_definition_truncates_point_table() {
        let def = BuildingDefinition::new(id("wall"), 0, 2, 0, vec![], vec![8, 10, 12, 14]).unwrap();

        assert_eq!(def.point_table(), &[8, 10]);
        assert_eq!(def.upgrade_points(1), Some(10));
        assert_eq!(def.upgrade_points(2), None);
    }

    #[test]
    fn test_new_definition_validation() {
        let bounds = BuildingDefinition::new(id("wall"), 3, 2, 0, vec![], vec![1, 1]);
        assert!(matches!(
            bounds,
            Err(GameError::InvalidLevelBounds { min: 3, max: 2, .. })
        ));

        let start = BuildingDefinition::new(id("statue"), 0, 1, 2, vec![], vec![24]);
        assert!(matches!(
            start,
            Err(GameError::InvalidStartLevel { start: 2, max: 1, .. })
        ));

        let short = BuildingDefinition::new(id("main"), 1, 3, 1, vec![], vec![10, 2]);
        assert!(matches!(
            short,
            Err(GameError::PointTableTooShort {
                expected: 3,
                actual: 2,
                ..
            })
        ));

        let zero = BuildingDefinition::new(id("market"), 0, 3, 0, vec![], vec![10, 0, 3]);
        assert!(matches!(
            zero,
            Err(GameError::ZeroPointUpgrade { level: 1, .. })
        ));
    }

    #[test]
    fn test_zero_points_allowed_below_start_level() {
        // The rally point is worth nothing, but every village already has it.
        let place = BuildingDefinition::new(id("place"), 0, 1, 1, vec![], vec![0]).unwrap();
        assert_eq!(place.start_level(), 1);
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let a = building_factory(BuildingFactoryOptions {
            id: Some("wood"),
            ..Default::default()
        });

        let result = BuildingCatalog::new(vec![a.clone(), a]);
        assert!(matches!(result, Err(GameError::DuplicateBuilding(b)) if b.as_str() == "wood"));
    }

    #[test]
    fn test_catalog_rejects_unknown_prerequisite() {
        let smith = building_factory(BuildingFactoryOptions {
            id: Some("smith"),
            requires: Some(vec![("main", 5), ("barracks", 1)]),
            ..Default::default()
        });
        let main = building_factory(BuildingFactoryOptions {
            id: Some("main"),
            ..Default::default()
        });

        let result = BuildingCatalog::new(vec![smith, main]);
        assert!(matches!(
            result,
            Err(GameError::UnknownPrerequisite { building, requirement })
                if building.as_str() == "smith" && requirement.as_str() == "barracks"
        ));
    }

    #[test]
    fn test_assemble_catalog() {
        let raw_buildings = vec![raw("main", 1, 3), raw("barracks", 0, 2), raw("place", 0, 1)];
        let points = PointTables::from([
            (id("main"), vec![10, 2, 2, 3]),
            (id("barracks"), vec![16, 3]),
            (id("place"), vec![0]),
            (id("church"), vec![10, 2, 4]),
        ]);
        let requirements = RequirementTables::from([
            (id("barracks"), BTreeMap::from([(id("main"), 3)])),
            (id("church"), BTreeMap::from([(id("main"), 5)])),
        ]);
        let prebuilt = vec![id("main"), id("place")];

        let catalog =
            BuildingCatalog::assemble(raw_buildings, &points, &requirements, &prebuilt).unwrap();

        assert_eq!(catalog.len(), 3, "church isn't part of this world");
        let ids: Vec<&str> = catalog.iter().map(|b| b.id().as_str()).collect();
        assert_eq!(ids, vec!["barracks", "main", "place"]);

        let main = catalog.get(&id("main")).unwrap();
        assert_eq!(main.start_level(), 1);
        assert_eq!(main.point_table(), &[10, 2, 2]);
        assert!(main.prerequisites().is_empty());

        let barracks = catalog.get(&id("barracks")).unwrap();
        assert_eq!(barracks.start_level(), 0);
        assert_eq!(
            barracks.prerequisites(),
            &[BuildingRequirement(id("main"), 3)]
        );

        let start = catalog.start_state(26);
        assert_eq!(start.score(), 26);
        assert_eq!(start.level(&id("main")), Some(1));
        assert_eq!(start.level(&id("place")), Some(1));
        assert_eq!(start.level(&id("barracks")), Some(0));
    }

    #[test]
    fn test_assemble_requires_point_table() {
        let result = BuildingCatalog::assemble(
            vec![raw("snob", 0, 1)],
            &PointTables::new(),
            &RequirementTables::new(),
            &[],
        );
        assert!(matches!(result, Err(GameError::MissingPointTable(b)) if b.as_str() == "snob"));
    }

    #[test]
    fn test_assemble_rejects_requirement_outside_world() {
        let points = PointTables::from([(id("church"), vec![10, 2, 4])]);
        let requirements =
            RequirementTables::from([(id("church"), BTreeMap::from([(id("main"), 5)]))]);

        let result =
            BuildingCatalog::assemble(vec![raw("church", 0, 3)], &points, &requirements, &[]);
        assert!(matches!(result, Err(GameError::UnknownPrerequisite { .. })));
    }

    #[test]
    fn test_assemble_ignores_prebuilt_outside_world() {
        let points = PointTables::from([(id("main"), vec![10, 2, 2])]);
        let prebuilt = vec![id("main"), id("statue")];

        let catalog = BuildingCatalog::assemble(
            vec![raw("main", 0, 3)],
            &points,
            &RequirementTables::new(),
            &prebuilt,
        )
        .unwrap();

        let start = catalog.start_state(26);
        assert_eq!(start.level(&id("main")), Some(1));
        assert_eq!(start.level(&id("statue")), None);
        assert_eq!(catalog.len(), 1);
    }
}
