use villagetrace_game::models::catalog::RawBuilding;
use villagetrace_types::errors::ApplicationError;

#[async_trait::async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Level bounds of every building available in `world`.
    async fn raw_buildings(&self, world: &str) -> Result<Vec<RawBuilding>, ApplicationError>;
}
