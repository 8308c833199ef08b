use serde::Serialize;
use std::collections::BTreeSet;

use villagetrace_game::models::{catalog::BuildingCatalog, village::VillageState};
use villagetrace_types::buildings::Points;

use crate::cqrs::Query;

/// Builds the building catalog of a game world.
pub struct LoadCatalog {
    pub world: String,
}

impl Query for LoadCatalog {
    type Output = BuildingCatalog;
}

/// Finds every building composition consistent with a village's points history.
pub struct ReconstructVillage {
    pub world: String,
    pub village_id: u32,
}

impl Query for ReconstructVillage {
    type Output = Reconstruction;
}

#[derive(Debug, Clone, Serialize)]
pub struct Reconstruction {
    pub world: String,
    pub village_id: u32,
    pub increases: Vec<Points>,
    pub compositions: BTreeSet<VillageState>,
}
