//! # tsp_mix
//!
//! Orders a collection of feature-vector items so that neighbours in the
//! order are similar, using a Christofides-style travelling-salesman
//! heuristic. Built to turn a music playlist into a smooth-flowing mix.
//!
//! ## Stages
//!
//! 1. **Distances**: weighted L1 distance between every pair of items
//! 2. **Spanning tree**: Prim's minimum spanning tree
//! 3. **Matching**: greedy pairing of odd-degree tree vertices
//! 4. **Circuit**: Hierholzer walk over the augmented graph
//! 5. **Shortcut**: first visit of each item gives the ordering
//!
//! ```
//! use tsp_mix::{FeatureSchema, FeatureWeights, Item, MixConfig, NoopObserver, Pipeline};
//!
//! let items: Vec<Item> = [0.0, 1.0, 5.0, 6.0]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, x)| Item::bare(format!("t{}", i), vec![*x]))
//!     .collect();
//! let config = MixConfig::default().with_weights(FeatureWeights::new().with("x", 1.0));
//! let outcome = Pipeline::new(config)?
//!     .run(&items, &FeatureSchema::new(["x"]), &mut NoopObserver)?;
//! assert_eq!(outcome.ordering, vec![0, 1, 2, 3]);
//! # Ok::<(), tsp_mix::MixError>(())
//! ```

pub mod errors;
pub mod features;
pub mod graph;
pub mod io;
pub mod json;
pub mod mix;
pub mod pipeline;
pub mod tour;
pub mod types;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use errors::{ErrorCode, MixError, Result};
pub use features::{FeatureSchema, FeatureWeights, WeightVector};
pub use types::{Item, MixConfig, Track, WalkStart};

// Re-export main functionality
pub use graph::{DistanceMatrix, Graph};
pub use io::{ItemSource, JsonOrderSink, OrderSink, PlaylistLibrary, VecSink, VecSource};
pub use mix::MixSession;
pub use pipeline::{
    MixOutcome, NoopObserver, Pipeline, PipelineObserver, PipelineRuntimeError,
    StageTimingObserver,
};
pub use tour::{eulerian_walk, match_odd_vertices, shortcut, Matching, SpanningTree};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Initialize the Python module
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register_module(m)?;
    Ok(())
}
