use std::collections::{BTreeSet, HashSet, VecDeque};

use villagetrace_types::buildings::Points;

use crate::models::{
    catalog::BuildingCatalog,
    village::{CanonicalKey, VillageState},
};

use super::expander::StateExpander;

const TRACE_EVERY: usize = 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerStats {
    /// States popped from the queue.
    pub visited: usize,
    /// States whose children were generated.
    pub expanded: usize,
    /// Largest queue length observed.
    pub peak_queue: usize,
}

impl LayerStats {
    pub fn merge(self, other: LayerStats) -> Self {
        Self {
            visited: self.visited + other.visited,
            expanded: self.expanded + other.expanded,
            peak_queue: self.peak_queue.max(other.peak_queue),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LayerOutcome {
    /// Distinct villages worth exactly the desired score.
    pub terminals: BTreeSet<VillageState>,
    pub stats: LayerStats,
}

/// Breadth-first search of the villages reachable from one parent at an exact score.
#[derive(Debug, Clone, Copy)]
pub struct LayerSearch<'a> {
    expander: StateExpander<'a>,
}

impl<'a> LayerSearch<'a> {
    pub fn new(catalog: &'a BuildingCatalog) -> Self {
        Self {
            expander: StateExpander::new(catalog),
        }
    }

    /// Finds every village built on top of `parent` whose score is exactly `desired_score`.
    ///
    /// A composition is only enqueued if it isn't already waiting in the queue. Its key is
    /// released when dequeued: every path to a composition takes the same number of
    /// upgrades, so in FIFO order all its duplicates show up while the first copy is still
    /// queued.
    pub fn run(&self, parent: &VillageState, desired_score: Points) -> LayerOutcome {
        let mut outcome = LayerOutcome::default();
        if desired_score < parent.score() {
            return outcome;
        }

        let mut queued: HashSet<CanonicalKey> = HashSet::new();
        let mut queue: VecDeque<(CanonicalKey, VillageState)> = VecDeque::new();
        let root_key = parent.canonical_key();
        queued.insert(root_key.clone());
        queue.push_back((root_key, parent.clone()));

        while let Some((key, state)) = queue.pop_front() {
            queued.remove(&key);
            outcome.stats.visited += 1;
            if outcome.stats.visited % TRACE_EVERY == 0 {
                tracing::trace!(
                    visited = outcome.stats.visited,
                    queue = queue.len(),
                    "Layer search in progress"
                );
            }

            if state.score() == desired_score {
                outcome.terminals.insert(state);
                continue;
            }

            outcome.stats.expanded += 1;
            for child in self.expander.children(&state, desired_score - state.score()) {
                let child_key = child.canonical_key();
                if queued.insert(child_key.clone()) {
                    queue.push_back((child_key, child));
                }
            }
            outcome.stats.peak_queue = outcome.stats.peak_queue.max(queue.len());
        }

        tracing::debug!(
            desired_score,
            terminals = outcome.terminals.len(),
            visited = outcome.stats.visited,
            expanded = outcome.stats.expanded,
            peak_queue = outcome.stats.peak_queue,
            "Layer search done"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        BuildingFactoryOptions, building_factory, catalog_factory, composition, id,
        two_building_catalog,
    };

    #[test]
    fn test_layer_finds_every_composition_at_score() {
        let catalog = two_building_catalog();
        let start = catalog.start_state(0);

        let outcome = LayerSearch::new(&catalog).run(&start, 2);

        let expected = BTreeSet::from([
            composition(&[("a", 2), ("b", 0)], 2),
            composition(&[("a", 0), ("b", 1)], 2),
        ]);
        assert_eq!(outcome.terminals, expected);
    }

    #[test]
    fn test_layer_parent_already_at_score() {
        let catalog = two_building_catalog();
        let start = catalog.start_state(5);

        let outcome = LayerSearch::new(&catalog).run(&start, 5);

        assert_eq!(outcome.terminals, BTreeSet::from([start]));
        assert_eq!(outcome.stats.expanded, 0);
    }

    #[test]
    fn test_layer_unreachable_score() {
        let catalog = two_building_catalog();
        let start = catalog.start_state(0);
        let search = LayerSearch::new(&catalog);

        // a:1 + a:1 + b:2 caps the village at 4 points
        assert!(search.run(&start, 5).terminals.is_empty());
        // below the parent score
        let richer = catalog.start_state(10);
        assert!(search.run(&richer, 3).terminals.is_empty());
    }

    #[test]
    fn test_layer_diamond_visits_each_composition_once() {
        // x then y and y then x both lead to {x:1, y:1}
        let catalog = catalog_factory(vec![
            building_factory(BuildingFactoryOptions {
                id: Some("x"),
                max_level: Some(1),
                points: Some(vec![1]),
                ..Default::default()
            }),
            building_factory(BuildingFactoryOptions {
                id: Some("y"),
                max_level: Some(1),
                points: Some(vec![1]),
                ..Default::default()
            }),
            building_factory(BuildingFactoryOptions {
                id: Some("z"),
                max_level: Some(1),
                points: Some(vec![1]),
                ..Default::default()
            }),
        ]);
        let start = catalog.start_state(0);

        let outcome = LayerSearch::new(&catalog).run(&start, 3);

        assert_eq!(
            outcome.terminals,
            BTreeSet::from([composition(&[("x", 1), ("y", 1), ("z", 1)], 3)])
        );
        // root, 3 singles, 3 pairs, 1 triple
        assert_eq!(outcome.stats.visited, 8);
        assert_eq!(outcome.stats.expanded, 7);
    }

    #[test]
    fn test_layer_respects_requirements() {
        let catalog = catalog_factory(vec![
            building_factory(BuildingFactoryOptions {
                id: Some("main"),
                max_level: Some(3),
                points: Some(vec![1, 1, 1]),
                ..Default::default()
            }),
            building_factory(BuildingFactoryOptions {
                id: Some("smith"),
                max_level: Some(1),
                points: Some(vec![2]),
                requires: Some(vec![("main", 2)]),
                ..Default::default()
            }),
        ]);
        let start = catalog.start_state(0);

        let outcome = LayerSearch::new(&catalog).run(&start, 4);

        // main:3 + smith would be 5, main:1 + smith is locked
        assert_eq!(
            outcome.terminals,
            BTreeSet::from([composition(&[("main", 2), ("smith", 1)], 4)])
        );
        assert_eq!(outcome.terminals.first().unwrap().level(&id("smith")), Some(1));
    }
}
