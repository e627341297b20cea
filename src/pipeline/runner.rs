//! Pipeline runner: orchestrates the five ordering stages.
//!
//! [`Pipeline::run`] validates the items, resolves feature weights and then
//! executes, in order: distance matrix, spanning tree, odd-vertex matching,
//! circuit walk and shortcut. The observer is consulted before every stage
//! (and may abort the run there) and notified after it.
//!
//! Every stage is deterministic, so identical items and weights always give
//! an identical ordering.

use crate::errors::{MixError, Result};
use crate::features::{FeatureSchema, WeightVector};
use crate::graph::DistanceMatrix;
use crate::pipeline::artifacts::MixOutcome;
use crate::pipeline::observer::{
    PipelineObserver, StageClock, STAGE_CIRCUIT, STAGE_DISTANCES, STAGE_MATCHING, STAGE_SHORTCUT,
    STAGE_SPANNING_TREE,
};
use crate::tour::{eulerian_walk, match_odd_vertices, shortcut, SpanningTree};
use crate::types::{Item, MixConfig};
use rustc_hash::FxHashSet;

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Poll the observer and announce the stage, or stop the run.
fn enter_stage(observer: &mut impl PipelineObserver, stage: &'static str) -> Result<StageClock> {
    if observer.should_abort(stage) {
        #[cfg(feature = "tracing")]
        tracing::info!(stage, "pipeline aborted by observer");
        return Err(MixError::aborted(stage));
    }
    observer.on_stage_start(stage);
    Ok(StageClock::start(stage))
}

// ============================================================================
// Pipeline
// ============================================================================

/// Christofides-style ordering pipeline.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: MixConfig,
}

impl Pipeline {
    /// Create a pipeline, validating `config`
    pub fn new(config: MixConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &MixConfig {
        &self.config
    }

    /// Order `items`, whose feature vectors follow `schema`.
    ///
    /// Rejects fewer than two items, duplicate item ids, an item count above
    /// `max_items`, and schema features without a configured weight.
    pub fn run(
        &self,
        items: &[Item],
        schema: &FeatureSchema,
        observer: &mut impl PipelineObserver,
    ) -> Result<MixOutcome> {
        self.config.check_item_count(items.len())?;

        let mut ids = FxHashSet::default();
        for item in items {
            if !ids.insert(item.id.as_str()) {
                return Err(MixError::invalid_input(format!(
                    "duplicate item id '{}'",
                    item.id
                )));
            }
        }

        let weights = self.config.weights.resolve(schema)?;
        self.run_with_weights(items, &weights, observer)
    }

    /// Order `items` with an already resolved weight vector
    pub fn run_with_weights(
        &self,
        items: &[Item],
        weights: &WeightVector,
        observer: &mut impl PipelineObserver,
    ) -> Result<MixOutcome> {
        let n = items.len();

        // Stage 1: distances
        let distances = {
            trace_stage!(STAGE_DISTANCES);
            let clock = enter_stage(observer, STAGE_DISTANCES)?;
            let distances = if self.config.use_parallel(n) {
                DistanceMatrix::build_parallel(items, weights)?
            } else {
                DistanceMatrix::build(items, weights)?
            };
            let report = clock.finish(distances.len());
            observer.on_stage_end(STAGE_DISTANCES, &report);
            observer.on_distances(&distances);
            distances
        };

        // Stage 2: spanning tree
        let tree = {
            trace_stage!(STAGE_SPANNING_TREE);
            let clock = enter_stage(observer, STAGE_SPANNING_TREE)?;
            let tree = SpanningTree::build(&distances)?;
            let report = clock.finish(tree.edge_count());
            observer.on_stage_end(STAGE_SPANNING_TREE, &report);
            observer.on_tree(&tree);
            tree
        };
        let tree_weight = tree.total_weight();
        let odd_vertices = tree.graph().odd_vertices().len();
        let start = self.config.walk_start.vertex(n);

        // Stages 3 + 4: matching and circuit walk. With two items the single
        // tree edge already is the route; matching it would only rediscover
        // that edge.
        let (walk, matched_pairs) = if n == 2 {
            {
                trace_stage!(STAGE_MATCHING);
                let clock = enter_stage(observer, STAGE_MATCHING)?;
                observer.on_stage_end(STAGE_MATCHING, &clock.finish(0));
            }

            let walk = {
                trace_stage!(STAGE_CIRCUIT);
                let clock = enter_stage(observer, STAGE_CIRCUIT)?;
                let walk = vec![start, 1 - start, start];
                observer.on_stage_end(STAGE_CIRCUIT, &clock.finish(walk.len()));
                observer.on_walk(&walk);
                walk
            };
            (walk, Vec::new())
        } else {
            let matching = {
                trace_stage!(STAGE_MATCHING);
                let clock = enter_stage(observer, STAGE_MATCHING)?;
                let matching = match_odd_vertices(tree.graph(), &distances)?;
                let report = clock.finish(matching.pairs.len());
                observer.on_stage_end(STAGE_MATCHING, &report);
                observer.on_matching(&matching);
                matching
            };

            let walk = {
                trace_stage!(STAGE_CIRCUIT);
                let clock = enter_stage(observer, STAGE_CIRCUIT)?;
                let walk = eulerian_walk(&matching.graph, start)?;
                let report = clock.finish(walk.len());
                observer.on_stage_end(STAGE_CIRCUIT, &report);
                observer.on_walk(&walk);
                walk
            };
            (walk, matching.pairs)
        };

        // Stage 5: shortcut
        let ordering = {
            trace_stage!(STAGE_SHORTCUT);
            let clock = enter_stage(observer, STAGE_SHORTCUT)?;
            let ordering = shortcut(&walk, n)?;
            let report = clock.finish(ordering.len());
            observer.on_stage_end(STAGE_SHORTCUT, &report);
            observer.on_ordering(&ordering);
            ordering
        };

        let path_cost = distances.path_cost(&ordering);

        #[cfg(feature = "tracing")]
        tracing::debug!(items = n, tree_weight, path_cost, "ordering complete");

        Ok(MixOutcome {
            ordering,
            walk,
            tree_weight,
            path_cost,
            odd_vertices,
            matched_pairs,
        })
    }
}
