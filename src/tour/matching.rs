//! Greedy pairing of odd-degree vertices
//!
//! By the handshake lemma a tree has an even number of odd-degree vertices.
//! They are paired greedily: the globally cheapest pair of still-unmatched
//! odd vertices is taken first (ties: smallest first vertex, then smallest
//! second vertex). A pair that is already a tree edge is rejected, since
//! linking it again would create a parallel edge; its endpoints stay in the
//! pool.
//!
//! This is greedy nearest-pair matching, not a minimum-weight perfect
//! matching, so the classic Christofides 3/2 bound does not apply to the
//! resulting tour.
//!
//! Repeatedly taking the cheapest remaining pair is the same as walking all
//! candidate pairs once in ascending `(distance, first, second)` order and
//! skipping pairs with an already-matched endpoint, which is how it is
//! implemented here.

use crate::errors::{MixError, Result};
use crate::graph::{DistanceMatrix, Graph};

/// Augmented graph plus a record of how it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Matching {
    /// Tree plus matching edges; every vertex has even degree
    pub graph: Graph,
    /// Accepted pairs `(u, v)` with `u < v`, in acceptance order
    pub pairs: Vec<(usize, usize)>,
    /// Number of odd-degree vertices in the input tree
    pub odd_before: usize,
    /// Candidate pairs rejected because they were already adjacent
    pub rejected: usize,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    dist: f64,
    a: usize,
    b: usize,
}

/// Pair up the odd-degree vertices of `tree`, adding one edge per pair.
///
/// Fails with [`MixError::MatchingExhausted`] when unmatched vertices remain
/// but every pair between them is already adjacent, and with
/// [`MixError::NotEulerian`] if the result still has an odd-degree vertex.
pub fn match_odd_vertices(tree: &Graph, distances: &DistanceMatrix) -> Result<Matching> {
    let odd = tree.odd_vertices();
    let odd_before = odd.len();
    let mut graph = tree.clone();

    let mut candidates = Vec::with_capacity(odd.len() * odd.len().saturating_sub(1) / 2);
    for (x, &a) in odd.iter().enumerate() {
        for &b in &odd[x + 1..] {
            candidates.push(Candidate {
                dist: distances.get(a, b),
                a,
                b,
            });
        }
    }
    candidates.sort_by(|p, q| {
        p.dist
            .total_cmp(&q.dist)
            .then(p.a.cmp(&q.a))
            .then(p.b.cmp(&q.b))
    });

    let mut matched = vec![false; graph.node_count()];
    let mut unmatched = odd.len();
    let mut pairs = Vec::with_capacity(odd.len() / 2);
    let mut rejected = 0;

    for c in candidates {
        if unmatched == 0 {
            break;
        }
        if matched[c.a] || matched[c.b] {
            continue;
        }
        if graph.has_edge(c.a, c.b) {
            rejected += 1;
            #[cfg(feature = "tracing")]
            tracing::trace!(a = c.a, b = c.b, "matching pair rejected: already adjacent");
            continue;
        }
        graph.add_edge(c.a, c.b);
        matched[c.a] = true;
        matched[c.b] = true;
        unmatched -= 2;
        pairs.push((c.a, c.b));
    }

    if unmatched > 0 {
        return Err(MixError::matching_exhausted(unmatched, rejected));
    }

    verify_even_degrees(&graph)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        odd_vertices = odd_before,
        pairs = pairs.len(),
        rejected,
        "odd vertices matched"
    );

    Ok(Matching {
        graph,
        pairs,
        odd_before,
        rejected,
    })
}

/// Check that every vertex of `graph` has even degree
pub fn verify_even_degrees(graph: &Graph) -> Result<()> {
    let odd = graph.odd_vertices();
    if odd.is_empty() {
        Ok(())
    } else {
        Err(MixError::not_eulerian(odd))
    }
}
