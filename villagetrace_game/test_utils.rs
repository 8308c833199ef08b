use rand::Rng;
use std::collections::BTreeMap;

use villagetrace_types::buildings::{BuildingId, BuildingRequirement, Level, Points};

use crate::models::{
    catalog::{BuildingCatalog, BuildingDefinition},
    village::VillageState,
};

#[derive(Default, Clone)]
pub struct BuildingFactoryOptions<'a> {
    pub id: Option<&'a str>,
    pub min_level: Option<Level>,
    pub max_level: Option<Level>,
    pub start_level: Option<Level>,
    pub points: Option<Vec<Points>>,
    pub requires: Option<Vec<(&'a str, Level)>>,
}

pub fn id(name: &str) -> BuildingId {
    BuildingId::new(name).unwrap()
}

pub fn building_factory(options: BuildingFactoryOptions) -> BuildingDefinition {
    let default_id = format!("building_{}", rand::thread_rng().r#gen::<u32>());
    let max_level = options.max_level.unwrap_or(1);
    let points = options
        .points
        .unwrap_or_else(|| vec![1; max_level as usize]);
    let prerequisites = options
        .requires
        .unwrap_or_default()
        .into_iter()
        .map(|(name, level)| BuildingRequirement(id(name), level))
        .collect();

    BuildingDefinition::new(
        id(options.id.unwrap_or(default_id.as_str())),
        options.min_level.unwrap_or(0),
        max_level,
        options.start_level.unwrap_or(0),
        prerequisites,
        points,
    )
    .unwrap()
}

pub fn catalog_factory(buildings: Vec<BuildingDefinition>) -> BuildingCatalog {
    BuildingCatalog::new(buildings).unwrap()
}

/// `a` (2 levels, 1 point each) and `b` (1 level, 2 points), both starting at 0.
pub fn two_building_catalog() -> BuildingCatalog {
    catalog_factory(vec![
        building_factory(BuildingFactoryOptions {
            id: Some("a"),
            max_level: Some(2),
            points: Some(vec![1, 1]),
            ..Default::default()
        }),
        building_factory(BuildingFactoryOptions {
            id: Some("b"),
            max_level: Some(1),
            points: Some(vec![2]),
            ..Default::default()
        }),
    ])
}

pub fn composition(levels: &[(&str, Level)], score: Points) -> VillageState {
    let levels: BTreeMap<BuildingId, Level> = levels
        .iter()
        .map(|(name, level)| (id(name), *level))
        .collect();
    VillageState::new(levels, score)
}
