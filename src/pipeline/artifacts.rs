//! Pipeline output artifact.

use crate::types::Item;
use serde::{Deserialize, Serialize};

/// Everything one pipeline run produces.
///
/// `ordering` is the externally visible result: a permutation of the input
/// item indices. The remaining fields describe how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixOutcome {
    /// Visiting order, a permutation of `0..N`
    pub ordering: Vec<usize>,
    /// Closed covering walk the ordering was shortcut from
    pub walk: Vec<usize>,
    /// Total weight of the minimum spanning tree
    pub tree_weight: f64,
    /// Sum of distances between consecutive ordering entries
    pub path_cost: f64,
    /// Odd-degree vertices in the spanning tree
    pub odd_vertices: usize,
    /// Pairs joined by the odd-vertex matching
    pub matched_pairs: Vec<(usize, usize)>,
}

impl MixOutcome {
    /// Number of ordered items
    pub fn len(&self) -> usize {
        self.ordering.len()
    }

    /// Check if nothing was ordered
    pub fn is_empty(&self) -> bool {
        self.ordering.is_empty()
    }

    /// Borrow `items` in visiting order
    pub fn ordered<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        self.ordering.iter().filter_map(|&i| items.get(i)).collect()
    }

    /// Item ids in visiting order
    pub fn ids<'a>(&self, items: &'a [Item]) -> Vec<&'a str> {
        self.ordered(items).into_iter().map(|it| it.id.as_str()).collect()
    }
}
