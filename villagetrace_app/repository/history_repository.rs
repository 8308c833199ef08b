use villagetrace_types::{errors::ApplicationError, history::VillageHistory};

#[async_trait::async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn get_by_village(
        &self,
        world: &str,
        village_id: u32,
    ) -> Result<VillageHistory, ApplicationError>;
}
