//! Graph construction: distance matrix and index-keyed adjacency.

pub mod adjacency;
pub mod distance;

pub use adjacency::Graph;
pub use distance::DistanceMatrix;
