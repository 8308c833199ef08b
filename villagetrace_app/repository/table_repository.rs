use villagetrace_game::models::catalog::{PointTables, RequirementTables};
use villagetrace_types::errors::ApplicationError;

/// Static building data shared by every world.
#[async_trait::async_trait]
pub trait BuildingTableRepository: Send + Sync {
    async fn point_tables(&self) -> Result<PointTables, ApplicationError>;
    async fn requirements(&self) -> Result<RequirementTables, ApplicationError>;
}
