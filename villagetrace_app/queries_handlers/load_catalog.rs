use async_trait::async_trait;
use std::sync::Arc;

use villagetrace_game::models::catalog::BuildingCatalog;
use villagetrace_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::LoadCatalog},
    sources::DataSources,
};

use super::helpers::validate_world;

pub struct LoadCatalogHandler {}

impl LoadCatalogHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<LoadCatalog> for LoadCatalogHandler {
    async fn handle(
        &self,
        query: LoadCatalog,
        sources: &dyn DataSources,
        config: &Arc<Config>,
    ) -> Result<<LoadCatalog as Query>::Output, ApplicationError> {
        validate_world(&query.world)?;

        let raw = sources.catalog().raw_buildings(&query.world).await?;
        let tables = sources.tables();
        let points = tables.point_tables().await?;
        let requirements = tables.requirements().await?;

        let catalog = BuildingCatalog::assemble(raw, &points, &requirements, &config.prebuilt)?;
        tracing::info!(
            world = %query.world,
            buildings = catalog.len(),
            "Building catalog loaded"
        );
        Ok(catalog)
    }
}
