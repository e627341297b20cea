//! Undirected graph keyed by item index
//!
//! Neighbour lists are kept sorted so every traversal visits neighbours in
//! ascending index order. Parallel edges and self-loops are refused, so the
//! graph stays simple even after odd-vertex augmentation.

use crate::graph::distance::DistanceMatrix;

/// Simple undirected graph over vertices `0..n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Create a graph with `n` vertices and no edges
    pub fn new(n: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); n],
            edge_count: 0,
        }
    }

    /// Build a graph from an edge list
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::new(n);
        for &(u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    /// Add the undirected edge `(u, v)`.
    ///
    /// Returns `false` (and leaves the graph unchanged) for self-loops,
    /// out-of-range vertices and edges that already exist.
    pub fn add_edge(&mut self, u: usize, v: usize) -> bool {
        let n = self.adjacency.len();
        if u == v || u >= n || v >= n {
            return false;
        }
        match self.adjacency[u].binary_search(&v) {
            Ok(_) => false,
            Err(pos_u) => {
                self.adjacency[u].insert(pos_u, v);
                if let Err(pos_v) = self.adjacency[v].binary_search(&u) {
                    self.adjacency[v].insert(pos_v, u);
                }
                self.edge_count += 1;
                true
            }
        }
    }

    /// Check whether `u` and `v` are directly connected
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency
            .get(u)
            .is_some_and(|nbrs| nbrs.binary_search(&v).is_ok())
    }

    /// Neighbours of `v` in ascending order
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjacency[v]
    }

    /// Degree of `v`
    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    /// Number of vertices
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Every edge once, as `(u, v)` with `u < v`, in ascending order
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, nbrs)| nbrs.iter().filter(move |&&v| v > u).map(move |&v| (u, v)))
    }

    /// Vertices with odd degree, ascending
    pub fn odd_vertices(&self) -> Vec<usize> {
        (0..self.node_count())
            .filter(|&v| self.degree(v) % 2 == 1)
            .collect()
    }

    /// Check that every vertex is reachable from vertex 0
    pub fn is_connected(&self) -> bool {
        let n = self.node_count();
        if n == 0 {
            return true;
        }
        let mut seen = vec![false; n];
        let mut stack = vec![0];
        seen[0] = true;
        let mut reached = 1;
        while let Some(u) = stack.pop() {
            for &v in self.neighbors(u) {
                if !seen[v] {
                    seen[v] = true;
                    reached += 1;
                    stack.push(v);
                }
            }
        }
        reached == n
    }

    /// Sum of edge weights looked up in `distances`
    pub fn total_weight(&self, distances: &DistanceMatrix) -> f64 {
        self.edges().map(|(u, v)| distances.get(u, v)).sum()
    }
}
