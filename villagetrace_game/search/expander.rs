use villagetrace_types::{
    buildings::{BuildingId, BuildingRequirement, Points},
    errors::GameError,
};

use crate::models::{
    catalog::{BuildingCatalog, BuildingDefinition},
    village::VillageState,
};

/// Generates the villages one building upgrade away from a given one.
#[derive(Debug, Clone, Copy)]
pub struct StateExpander<'a> {
    catalog: &'a BuildingCatalog,
}

impl<'a> StateExpander<'a> {
    pub fn new(catalog: &'a BuildingCatalog) -> Self {
        Self { catalog }
    }

    /// Whether `building` can be upgraded once in `state` without gaining more than `budget` points.
    ///
    /// Requirements only gate the first level: once built, a building stays unlocked.
    pub fn is_expandable(&self, state: &VillageState, building: &BuildingId, budget: Points) -> bool {
        self.catalog
            .get(building)
            .and_then(|definition| upgrade_points(state, definition, budget))
            .is_some()
    }

    /// Returns `state` with `building` upgraded once. Ignores budget and requirements.
    pub fn expand(
        &self,
        state: &VillageState,
        building: &BuildingId,
    ) -> Result<VillageState, GameError> {
        let definition = self
            .catalog
            .get(building)
            .ok_or_else(|| GameError::BuildingNotFound(building.clone()))?;
        let level = state
            .level(building)
            .ok_or_else(|| GameError::BuildingNotFound(building.clone()))?;
        let points = definition
            .upgrade_points(level)
            .ok_or_else(|| GameError::BuildingMaxLevelReached(building.clone()))?;

        Ok(state.upgraded(building, points))
    }

    /// Returns every village reachable from `state` by upgrading exactly one building
    /// for at most `budget` points.
    pub fn children(&self, state: &VillageState, budget: Points) -> Vec<VillageState> {
        self.catalog
            .iter()
            .filter_map(|definition| {
                upgrade_points(state, definition, budget)
                    .map(|points| state.upgraded(definition.id(), points))
            })
            .collect()
    }
}

/// Points of the next upgrade of `definition`, if it is allowed in `state` within `budget`.
fn upgrade_points(
    state: &VillageState,
    definition: &BuildingDefinition,
    budget: Points,
) -> Option<Points> {
    let level = state.level(definition.id())?;
    if level >= definition.max_level() {
        return None;
    }

    let points = definition.upgrade_points(level)?;
    if points > budget {
        return None;
    }

    if level == 0 {
        let unlocked = definition
            .prerequisites()
            .iter()
            .all(|BuildingRequirement(required, min_level)| {
                state.level(required).is_some_and(|l| l >= *min_level)
            });
        if !unlocked {
            return None;
        }
    }

    Some(points)
}
