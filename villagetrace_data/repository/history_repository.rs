use std::path::PathBuf;

use villagetrace_app::repository::HistoryRepository;
use villagetrace_types::{
    errors::ApplicationError,
    history::{HistorySnapshot, VillageHistory},
};

use crate::files;

/// Reads village point histories exported as `history_{world}_{village_id}.json`.
#[derive(Debug, Clone)]
pub struct JsonHistoryRepository {
    dir: PathBuf,
}

impl JsonHistoryRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn history_path(&self, world: &str, village_id: u32) -> PathBuf {
        self.dir.join(format!("history_{world}_{village_id}.json"))
    }
}

#[async_trait::async_trait]
impl HistoryRepository for JsonHistoryRepository {
    async fn get_by_village(
        &self,
        world: &str,
        village_id: u32,
    ) -> Result<VillageHistory, ApplicationError> {
        let path = self.history_path(world, village_id);
        let contents = files::read_to_string(&path).await?;
        let snapshots: Vec<HistorySnapshot> = serde_json::from_str(&contents)?;
        tracing::debug!(
            world,
            village_id,
            snapshots = snapshots.len(),
            "Loaded village history"
        );

        Ok(VillageHistory::new(snapshots))
    }
}
