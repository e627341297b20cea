//! Minimum spanning tree via Prim's algorithm
//!
//! The tree is rooted at vertex 0. Each vertex outside the tree keeps its
//! cheapest known connection into the tree, refreshed only against the vertex
//! that joined last, which keeps the whole build at O(N²).
//!
//! Ties are broken by index: among equally short candidate edges `(u, v)`
//! with `u` in the tree, the smallest `u` wins, then the smallest `v`. A
//! connection is only replaced by a strictly shorter one (or an equally short
//! one from a smaller tree vertex).

use crate::errors::{MixError, Result};
use crate::graph::{DistanceMatrix, Graph};
use crate::types::Item;

/// One tree edge in the order Prim's algorithm added it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeEdge {
    /// Endpoint already in the tree when the edge was added
    pub parent: usize,
    /// Endpoint the edge brought into the tree
    pub child: usize,
    /// Edge length
    pub weight: f64,
}

/// A spanning tree over all N vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    graph: Graph,
    edges: Vec<TreeEdge>,
}

impl SpanningTree {
    /// Run Prim's algorithm over `distances`.
    ///
    /// Fails with [`MixError::SearchExhausted`] if some vertex never gets a
    /// usable link into the tree, which a validated matrix rules out.
    pub fn build(distances: &DistanceMatrix) -> Result<Self> {
        let n = distances.len();
        let mut graph = Graph::new(n);
        let mut edges = Vec::with_capacity(n.saturating_sub(1));
        if n == 0 {
            return Ok(Self { graph, edges });
        }

        let mut included = vec![false; n];
        // Cheapest known link into the tree for every outside vertex.
        let mut best_dist = vec![f64::INFINITY; n];
        let mut best_parent = vec![usize::MAX; n];

        included[0] = true;
        relax(distances, 0, &included, &mut best_dist, &mut best_parent);

        for _ in 1..n {
            let mut pick: Option<usize> = None;
            for v in 0..n {
                if included[v] {
                    continue;
                }
                pick = match pick {
                    None => Some(v),
                    Some(p) => {
                        let better = best_dist[v] < best_dist[p]
                            || (best_dist[v] == best_dist[p] && best_parent[v] < best_parent[p]);
                        if better {
                            Some(v)
                        } else {
                            Some(p)
                        }
                    }
                };
            }

            let Some(child) = pick else { break };
            let parent = best_parent[child];
            if !graph.add_edge(parent, child) {
                return Err(MixError::search_exhausted(edges.len() + 1, n));
            }
            edges.push(TreeEdge {
                parent,
                child,
                weight: best_dist[child],
            });

            included[child] = true;
            relax(distances, child, &included, &mut best_dist, &mut best_parent);
        }

        Ok(Self { graph, edges })
    }

    /// Tree as an adjacency graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consume the tree, keeping its adjacency graph
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Edges in insertion order
    pub fn edges(&self) -> &[TreeEdge] {
        &self.edges
    }

    /// Number of edges (N - 1)
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Total edge weight
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Text view of the tree: every vertex followed by its neighbours.
    ///
    /// ```text
    /// 0. Song A  -  Artist A
    ///  ㄴ-- 1. Song B  -  Artist B
    /// ```
    pub fn render(&self, items: &[Item]) -> String {
        let label = |i: usize| match items.get(i) {
            Some(item) => format!(
                "{}. {}  -  {}",
                i,
                item.payload.name,
                item.payload.artist_line()
            ),
            None => format!("{}.", i),
        };

        let mut out = String::new();
        for v in 0..self.graph.node_count() {
            out.push_str(&label(v));
            out.push('\n');
            for &u in self.graph.neighbors(v) {
                out.push_str(" ㄴ-- ");
                out.push_str(&label(u));
                out.push('\n');
            }
        }
        out
    }
}

/// Refresh cheapest links against the vertex `added` that just joined.
fn relax(
    distances: &DistanceMatrix,
    added: usize,
    included: &[bool],
    best_dist: &mut [f64],
    best_parent: &mut [usize],
) {
    let row = distances.row(added);
    for v in 0..row.len() {
        if included[v] {
            continue;
        }
        let d = row[v];
        if d < best_dist[v] || (d == best_dist[v] && added < best_parent[v]) {
            best_dist[v] = d;
            best_parent[v] = added;
        }
    }
}
