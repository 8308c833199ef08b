use rayon::prelude::*;
use std::collections::BTreeSet;

use villagetrace_types::{buildings::Points, errors::GameError};

use crate::models::{catalog::BuildingCatalog, village::VillageState};

use super::layer::{LayerOutcome, LayerSearch, LayerStats};

/// Bounds on the work a pipeline run may do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of villages carried between layers. `None` means unbounded.
    pub max_frontier: Option<usize>,
}

/// Replays a sequence of score increases, one [`LayerSearch`] per increase.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionPipeline<'a> {
    catalog: &'a BuildingCatalog,
    limits: SearchLimits,
}

impl<'a> ExpansionPipeline<'a> {
    pub fn new(catalog: &'a BuildingCatalog) -> Self {
        Self {
            catalog,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns every village composition reachable from `start` through `increases`, in order.
    ///
    /// An empty result is a valid answer: no composition matches the history.
    /// Villages within a layer are searched in parallel.
    pub fn run(
        &self,
        start: VillageState,
        increases: &[Points],
    ) -> Result<BTreeSet<VillageState>, GameError> {
        if let Some(position) = increases.iter().position(|&increase| increase == 0) {
            return Err(GameError::NonPositiveIncrease {
                layer: position + 1,
            });
        }

        let search = LayerSearch::new(self.catalog);
        let mut frontier = BTreeSet::from([start]);

        for (idx, &increase) in increases.iter().enumerate() {
            let layer = idx + 1;
            if frontier.is_empty() {
                tracing::info!(layer, "Frontier is empty, no composition matches the history");
                break;
            }

            let outcomes: Vec<LayerOutcome> = frontier
                .par_iter()
                .map(|state| search.run(state, state.score().saturating_add(increase)))
                .collect();

            let mut stats = LayerStats::default();
            let mut next = BTreeSet::new();
            for outcome in outcomes {
                stats = stats.merge(outcome.stats);
                next.extend(outcome.terminals);
            }

            tracing::info!(
                layer,
                increase,
                parents = frontier.len(),
                frontier = next.len(),
                visited = stats.visited,
                "Layer completed"
            );

            if let Some(limit) = self.limits.max_frontier {
                if next.len() > limit {
                    return Err(GameError::FrontierLimitExceeded {
                        layer,
                        size: next.len(),
                        limit,
                    });
                }
            }
            frontier = next;
        }

        Ok(frontier)
    }
}
