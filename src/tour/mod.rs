//! Christofides-style tour stages
//!
//! Spanning tree → odd-vertex matching → circuit walk → shortcut. Each stage
//! consumes the previous stage's output and never depends on a later one.

pub mod circuit;
pub mod matching;
pub mod shortcut;
pub mod spanning;

pub use circuit::eulerian_walk;
pub use matching::{match_odd_vertices, verify_even_degrees, Matching};
pub use shortcut::shortcut;
pub use spanning::{SpanningTree, TreeEdge};
