//! Shortcutting a covering walk into a visiting order
//!
//! Keeps the first occurrence of every vertex and drops later repeats. With a
//! metric distance, skipping a repeated vertex never makes the route longer.

use crate::errors::{MixError, Result};

/// Reduce `walk` to the first-visit order of vertices `0..n`.
///
/// The result must be a permutation of `0..n`; a walk that misses a vertex
/// or names one outside the range is rejected.
pub fn shortcut(walk: &[usize], n: usize) -> Result<Vec<usize>> {
    let mut seen = vec![false; n];
    let mut order = Vec::with_capacity(n);

    for &v in walk {
        if v >= n {
            return Err(MixError::invalid_input(format!(
                "walk names vertex {} outside 0..{}",
                v, n
            )));
        }
        if !seen[v] {
            seen[v] = true;
            order.push(v);
        }
    }

    if order.len() != n {
        return Err(MixError::search_exhausted(order.len(), n));
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_walk() {
        assert_eq!(shortcut(&[0, 1, 2, 3, 0], 4).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_keeps_first_visit_order() {
        assert_eq!(
            shortcut(&[0, 1, 2, 3, 4, 2, 0], 5).unwrap(),
            vec![0, 1, 2, 3, 4]
        );
        assert_eq!(shortcut(&[3, 1, 3, 0, 2, 1, 3], 4).unwrap(), vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_missing_vertex() {
        assert_eq!(
            shortcut(&[0, 1, 0], 3).unwrap_err(),
            MixError::search_exhausted(2, 3)
        );
    }

    #[test]
    fn test_out_of_range() {
        assert!(shortcut(&[0, 5], 2).is_err());
    }
}
