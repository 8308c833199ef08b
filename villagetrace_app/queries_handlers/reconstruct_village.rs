use async_trait::async_trait;
use std::sync::Arc;

use villagetrace_game::search::ExpansionPipeline;
use villagetrace_types::errors::{AppError, ApplicationError};

use crate::{
    config::Config,
    cqrs::{
        Query, QueryHandler,
        queries::{LoadCatalog, ReconstructVillage, Reconstruction},
    },
    sources::DataSources,
};

use super::{LoadCatalogHandler, helpers::validate_world};

pub struct ReconstructVillageHandler {}

impl ReconstructVillageHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<ReconstructVillage> for ReconstructVillageHandler {
    async fn handle(
        &self,
        query: ReconstructVillage,
        sources: &dyn DataSources,
        config: &Arc<Config>,
    ) -> Result<<ReconstructVillage as Query>::Output, ApplicationError> {
        validate_world(&query.world)?;

        let catalog = LoadCatalogHandler::new()
            .handle(
                LoadCatalog {
                    world: query.world.clone(),
                },
                sources,
                config,
            )
            .await?;

        let history = sources
            .history()
            .get_by_village(&query.world, query.village_id)
            .await?;
        let increases = history.score_increases_since_founding(config.starting_score)?;
        tracing::info!(
            world = %query.world,
            village_id = query.village_id,
            snapshots = history.snapshots().len(),
            layers = increases.len(),
            "Village history loaded"
        );

        let start = catalog.start_state(config.starting_score);
        let limits = config.search_limits();
        let layers = increases.clone();
        // The search is CPU bound, keep it off the async workers.
        let compositions = tokio::task::spawn_blocking(move || {
            ExpansionPipeline::new(&catalog)
                .with_limits(limits)
                .run(start, &layers)
        })
        .await
        .map_err(|e| AppError::SearchTask(e.to_string()))??;

        tracing::info!(
            compositions = compositions.len(),
            "Village reconstruction completed"
        );

        Ok(Reconstruction {
            world: query.world,
            village_id: query.village_id,
            increases,
            compositions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{InMemorySources, history};
    use villagetrace_game::test_utils::composition;
    use villagetrace_types::errors::GameError;

    fn query() -> ReconstructVillage {
        ReconstructVillage {
            world: "de1".to_string(),
            village_id: 4165,
        }
    }

    #[tokio::test]
    async fn test_reconstruct_village() {
        let mut sources = InMemorySources::tiny_world();
        // +6 is either wood or stone, +3 is main 2 and one more level of the same field
        sources.history = history(&[26, 32, 35]);
        let config = Arc::new(Config::default());

        let result = ReconstructVillageHandler::new()
            .handle(query(), &sources, &config)
            .await
            .unwrap();

        assert_eq!(result.increases, vec![6, 3]);
        let expected = [
            composition(&[("barracks", 0), ("main", 2), ("stone", 0), ("wood", 2)], 35),
            composition(&[("barracks", 0), ("main", 2), ("stone", 2), ("wood", 0)], 35),
        ];
        assert_eq!(result.compositions.into_iter().collect::<Vec<_>>(), expected);
    }

    #[tokio::test]
    async fn test_reconstruct_village_without_match() {
        let mut sources = InMemorySources::tiny_world();
        sources.history = history(&[26, 27]);
        let config = Arc::new(Config::default());

        let result = ReconstructVillageHandler::new()
            .handle(query(), &sources, &config)
            .await
            .unwrap();

        assert_eq!(result.increases, vec![1]);
        assert!(result.compositions.is_empty());
    }

    #[tokio::test]
    async fn test_reconstruct_village_frontier_limit() {
        let mut sources = InMemorySources::tiny_world();
        sources.history = history(&[26, 32, 35]);
        let config = Arc::new(Config {
            max_frontier: Some(1),
            ..Config::default()
        });

        let result = ReconstructVillageHandler::new()
            .handle(query(), &sources, &config)
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Game(GameError::FrontierLimitExceeded { layer: 1, size: 2, .. }))
        ));
    }

    #[tokio::test]
    async fn test_reconstruct_village_points_decrease() {
        let mut sources = InMemorySources::tiny_world();
        sources.history = history(&[26, 32, 30]);
        let config = Arc::new(Config::default());

        let result = ReconstructVillageHandler::new()
            .handle(query(), &sources, &config)
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::App(AppError::ScoreDecrease { from: 32, to: 30, .. }))
        ));
    }
}
