use chrono::{Duration, TimeZone, Utc};
use std::{collections::BTreeMap, sync::Arc};

use villagetrace_game::models::catalog::{PointTables, RawBuilding, RequirementTables};
use villagetrace_types::{
    buildings::{BuildingId, Level, Points},
    errors::ApplicationError,
    history::{HistorySnapshot, VillageHistory},
};

use crate::{
    repository::{BuildingTableRepository, CatalogRepository, HistoryRepository},
    sources::DataSources,
};

fn id(name: &str) -> BuildingId {
    BuildingId::new(name).unwrap()
}

pub fn raw(name: &str, min_level: Level, max_level: Level) -> RawBuilding {
    RawBuilding {
        id: id(name),
        min_level,
        max_level,
    }
}

/// One snapshot per day, starting on 2024-03-01.
pub fn history(points: &[Points]) -> VillageHistory {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let snapshots = points
        .iter()
        .enumerate()
        .map(|(day, points)| HistorySnapshot {
            recorded_at: base + Duration::days(day as i64),
            points: *points,
        })
        .collect();
    VillageHistory::new(snapshots)
}

/// Serves fixed data, whatever world or village is asked for.
#[derive(Debug, Clone, Default)]
pub struct InMemorySources {
    pub raw: Vec<RawBuilding>,
    pub points: PointTables,
    pub requirements: RequirementTables,
    pub history: VillageHistory,
}

impl InMemorySources {
    /// `main` (prebuilt), `barracks` (needs main 3) and two resource fields worth the same.
    pub fn tiny_world() -> Self {
        Self {
            raw: vec![
                raw("main", 1, 3),
                raw("barracks", 0, 2),
                raw("wood", 0, 2),
                raw("stone", 0, 2),
            ],
            points: PointTables::from([
                (id("main"), vec![10, 2, 2]),
                (id("barracks"), vec![16, 3]),
                (id("wood"), vec![6, 1]),
                (id("stone"), vec![6, 1]),
            ]),
            requirements: RequirementTables::from([(
                id("barracks"),
                BTreeMap::from([(id("main"), 3)]),
            )]),
            history: VillageHistory::default(),
        }
    }
}

impl DataSources for InMemorySources {
    fn catalog(&self) -> Arc<dyn CatalogRepository> {
        Arc::new(self.clone())
    }

    fn tables(&self) -> Arc<dyn BuildingTableRepository> {
        Arc::new(self.clone())
    }

    fn history(&self) -> Arc<dyn HistoryRepository> {
        Arc::new(self.clone())
    }
}

#[async_trait::async_trait]
impl CatalogRepository for InMemorySources {
    async fn raw_buildings(&self, _world: &str) -> Result<Vec<RawBuilding>, ApplicationError> {
        Ok(self.raw.clone())
    }
}

#[async_trait::async_trait]
impl BuildingTableRepository for InMemorySources {
    async fn point_tables(&self) -> Result<PointTables, ApplicationError> {
        Ok(self.points.clone())
    }

    async fn requirements(&self) -> Result<RequirementTables, ApplicationError> {
        Ok(self.requirements.clone())
    }
}

#[async_trait::async_trait]
impl HistoryRepository for InMemorySources {
    async fn get_by_village(
        &self,
        _world: &str,
        _village_id: u32,
    ) -> Result<VillageHistory, ApplicationError> {
        Ok(self.history.clone())
    }
}
