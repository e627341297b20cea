//! Closed walk over the augmented graph (Hierholzer)
//!
//! Follows unused edges from the start vertex, always taking the unused edge
//! to the smallest neighbour, and splices in sub-circuits as the stack
//! unwinds. On a connected graph where every vertex has even degree this
//! consumes every edge exactly once in O(E) and therefore visits every
//! vertex. The walk is closed: it ends where it started.

use crate::errors::{MixError, Result};
use crate::graph::Graph;

/// Build a closed walk from `start` that uses every edge once.
///
/// Fails with [`MixError::SearchExhausted`] when the walk cannot reach every
/// vertex, which only happens for a disconnected graph.
pub fn eulerian_walk(graph: &Graph, start: usize) -> Result<Vec<usize>> {
    let n = graph.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }
    if start >= n {
        return Err(MixError::invalid_input(format!(
            "walk start {} is outside 0..{}",
            start, n
        )));
    }

    // Incidence lists of (neighbour, edge id), ascending by neighbour.
    let mut incidence: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
    let mut edge_total = 0;
    for (id, (u, v)) in graph.edges().enumerate() {
        incidence[u].push((v, id));
        incidence[v].push((u, id));
        edge_total += 1;
    }
    for list in &mut incidence {
        list.sort_unstable();
    }

    let mut used = vec![false; edge_total];
    let mut cursor = vec![0usize; n];
    let mut stack = vec![start];
    let mut walk = Vec::with_capacity(edge_total + 1);

    while let Some(&v) = stack.last() {
        let list = &incidence[v];
        while cursor[v] < list.len() && used[list[cursor[v]].1] {
            cursor[v] += 1;
        }
        if let Some(&(next, id)) = list.get(cursor[v]) {
            used[id] = true;
            cursor[v] += 1;
            stack.push(next);
        } else {
            walk.push(v);
            stack.pop();
        }
    }
    walk.reverse();

    let mut seen = vec![false; n];
    let mut visited = 0;
    for &v in &walk {
        if !seen[v] {
            seen[v] = true;
            visited += 1;
        }
    }
    if visited < n {
        return Err(MixError::search_exhausted(visited, n));
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(start, edges = edge_total, walk_len = walk.len(), "circuit walk built");

    Ok(walk)
}
