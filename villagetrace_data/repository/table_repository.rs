use serde::de::DeserializeOwned;
use std::path::PathBuf;

use villagetrace_app::repository::BuildingTableRepository;
use villagetrace_game::models::catalog::{PointTables, RequirementTables};
use villagetrace_types::errors::ApplicationError;

use crate::files;

const POINTS_FILE: &str = "building_points.json";
const REQUIREMENTS_FILE: &str = "building_requirements.json";

/// Reads `building_points.json` and `building_requirements.json` from a resources directory.
#[derive(Debug, Clone)]
pub struct JsonTableRepository {
    dir: PathBuf,
}

impl JsonTableRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T, ApplicationError> {
        let path = self.dir.join(name);
        let contents = files::read_to_string(&path).await?;
        let value = serde_json::from_str(&contents)?;
        tracing::debug!(path = %path.display(), "Loaded building table");
        Ok(value)
    }
}

#[async_trait::async_trait]
impl BuildingTableRepository for JsonTableRepository {
    async fn point_tables(&self) -> Result<PointTables, ApplicationError> {
        self.read_json(POINTS_FILE).await
    }

    async fn requirements(&self) -> Result<RequirementTables, ApplicationError> {
        self.read_json(REQUIREMENTS_FILE).await
    }
}
