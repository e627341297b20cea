//! Weighted distance matrix
//!
//! Distances are weighted L1 (Manhattan) over the feature vectors:
//! `d(i, j) = Σ_k w[k] * |x_i[k] - x_j[k]|`. This is a metric, which the
//! shortcut step relies on. The diagonal is `+inf` so a vertex is never its
//! own nearest neighbour.
//!
//! The matrix is stored row-major in one flat buffer and never mutated after
//! construction.

use crate::errors::{MixError, Result};
use crate::features::WeightVector;
use crate::types::Item;
use rayon::prelude::*;

/// Dense, symmetric N×N distance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

/// Weighted L1 distance between two equal-length vectors.
///
/// Zero-weight columns are skipped, not multiplied: `0 * inf` is NaN when a
/// difference overflows.
#[inline]
fn weighted_l1(a: &[f64], b: &[f64], weights: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .zip(weights)
        .filter(|(_, w)| **w != 0.0)
        .map(|((x, y), w)| w * (x - y).abs())
        .sum()
}

impl DistanceMatrix {
    /// Build the matrix from items and a resolved weight vector
    pub fn build(items: &[Item], weights: &WeightVector) -> Result<Self> {
        let vectors: Vec<&[f64]> = items.iter().map(|it| it.features.as_slice()).collect();
        Self::from_vectors(&vectors, weights)
    }

    /// Build the matrix with rows computed in parallel.
    ///
    /// Every entry is computed by the same expression as [`Self::build`], so
    /// the result is bit-identical.
    pub fn build_parallel(items: &[Item], weights: &WeightVector) -> Result<Self> {
        let vectors: Vec<&[f64]> = items.iter().map(|it| it.features.as_slice()).collect();
        validate_vectors(&vectors, weights)?;

        let n = vectors.len();
        let w = weights.as_slice();
        let data: Vec<f64> = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| {
                let vectors = &vectors;
                (0..n).map(move |j| {
                    if i == j {
                        f64::INFINITY
                    } else {
                        weighted_l1(vectors[i], vectors[j], w)
                    }
                })
            })
            .collect();

        check_finite(n, &data)?;
        Ok(Self { n, data })
    }

    /// Build the matrix from raw feature vectors
    pub fn from_vectors<V: AsRef<[f64]>>(vectors: &[V], weights: &WeightVector) -> Result<Self> {
        let vectors: Vec<&[f64]> = vectors.iter().map(AsRef::as_ref).collect();
        validate_vectors(&vectors, weights)?;

        let n = vectors.len();
        let w = weights.as_slice();
        let mut data = vec![f64::INFINITY; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = weighted_l1(vectors[i], vectors[j], w);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        check_finite(n, &data)?;
        Ok(Self { n, data })
    }

    /// Wrap a raw row-major buffer without any checks
    #[cfg(test)]
    pub(crate) fn from_raw(n: usize, data: Vec<f64>) -> Self {
        Self { n, data }
    }

    /// Number of vertices (N)
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always false for a successfully built matrix (N >= 2)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between `i` and `j`; `+inf` when `i == j`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Full row `i`
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Sum of distances between consecutive entries of `order`
    pub fn path_cost(&self, order: &[usize]) -> f64 {
        order.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}

/// Off-diagonal entries must be finite; finite inputs can still overflow.
fn check_finite(n: usize, data: &[f64]) -> Result<()> {
    let bad = data
        .iter()
        .enumerate()
        .find(|&(idx, d)| idx / n != idx % n && !d.is_finite());
    match bad {
        Some((idx, _)) => Err(MixError::invalid_input(format!(
            "distance between items {} and {} is not finite",
            idx / n,
            idx % n
        ))),
        None => Ok(()),
    }
}

fn validate_vectors(vectors: &[&[f64]], weights: &WeightVector) -> Result<()> {
    if vectors.len() < 2 {
        return Err(MixError::invalid_input(format!(
            "at least 2 items are required, got {}",
            vectors.len()
        )));
    }

    let dim = weights.len();
    if dim == 0 {
        return Err(MixError::invalid_input("feature dimension must be > 0"));
    }

    for (i, v) in vectors.iter().enumerate() {
        if v.len() != dim {
            return Err(MixError::invalid_input(format!(
                "item {} has {} features, expected {}",
                i,
                v.len(),
                dim
            )));
        }
        if v.iter().any(|x| !x.is_finite()) {
            return Err(MixError::invalid_input(format!(
                "item {} has a non-finite feature value",
                i
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(w: &[f64]) -> WeightVector {
        WeightVector::new(w.to_vec()).unwrap()
    }

    #[test]
    fn test_four_point_line() {
        let m = DistanceMatrix::from_vectors(
            &[vec![0.0], vec![1.0], vec![5.0], vec![6.0]],
            &weights(&[1.0]),
        )
        .unwrap();

        assert_eq!(m.len(), 4);
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.get(0, 2), 5.0);
        assert_eq!(m.get(0, 3), 6.0);
        assert_eq!(m.get(1, 2), 4.0);
        assert_eq!(m.get(1, 3), 5.0);
        assert_eq!(m.get(2, 3), 1.0);
        for i in 0..4 {
            assert!(m.get(i, i).is_infinite());
        }
    }

    #[test]
    fn test_symmetric_and_non_negative() {
        let m = DistanceMatrix::from_vectors(
            &[vec![0.3, 9.0], vec![-2.0, 1.5], vec![4.0, 4.0]],
            &weights(&[2.0, 0.5]),
        )
        .unwrap();

        for i in 0..3 {
            for j in 0..3 {
                if i != j {
                    assert_eq!(m.get(i, j), m.get(j, i));
                    assert!(m.get(i, j) >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_zero_weight_nullifies_feature() {
        let m = DistanceMatrix::from_vectors(
            &[vec![0.0, 100.0], vec![1.0, -100.0]],
            &weights(&[1.0, 0.0]),
        )
        .unwrap();
        assert_eq!(m.get(0, 1), 1.0);
    }

    #[test]
    fn test_two_items() {
        let m = DistanceMatrix::from_vectors(&[vec![1.0], vec![3.0]], &weights(&[0.5])).unwrap();
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.get(1, 0), 1.0);
    }

    #[test]
    fn test_too_few_items() {
        let err = DistanceMatrix::from_vectors(&[vec![1.0]], &weights(&[1.0])).unwrap_err();
        assert!(matches!(err, MixError::InvalidInput { .. }));

        let empty: Vec<Vec<f64>> = Vec::new();
        assert!(DistanceMatrix::from_vectors(&empty, &weights(&[1.0])).is_err());
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = DistanceMatrix::from_vectors(&[vec![1.0, 2.0], vec![3.0]], &weights(&[1.0, 1.0]))
            .unwrap_err();
        assert!(err.to_string().contains("item 1 has 1 features, expected 2"));
    }

    #[test]
    fn test_zero_dimension() {
        let err = DistanceMatrix::from_vectors(&[vec![], vec![]], &weights(&[])).unwrap_err();
        assert!(err.to_string().contains("dimension"));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let err = DistanceMatrix::from_vectors(&[vec![f64::NAN], vec![1.0]], &weights(&[1.0]))
            .unwrap_err();
        assert!(matches!(err, MixError::InvalidInput { .. }));
    }

    #[test]
    fn test_zero_weight_ignores_overflowing_column() {
        let vectors = [
            vec![0.0, 1e308],
            vec![1.0, -1e308],
            vec![2.0, 0.0],
            vec![3.0, 0.0],
        ];
        let w = weights(&[1.0, 0.0]);
        let m = DistanceMatrix::from_vectors(&vectors, &w).unwrap();
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.get(1, 2), 1.0);
        assert_eq!(m.get(0, 3), 3.0);

        let items: Vec<Item> = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| Item::bare(format!("t{}", i), v.clone()))
            .collect();
        assert_eq!(DistanceMatrix::build_parallel(&items, &w).unwrap(), m);
    }

    #[test]
    fn test_overflowing_distance_rejected() {
        let vectors = [vec![1e308], vec![-1e308]];
        let err = DistanceMatrix::from_vectors(&vectors, &weights(&[1.0])).unwrap_err();
        assert!(err.to_string().contains("between items 0 and 1 is not finite"));

        let items = vec![Item::bare("a", vec![1e308]), Item::bare("b", vec![-1e308])];
        let err = DistanceMatrix::build_parallel(&items, &weights(&[1.0])).unwrap_err();
        assert!(matches!(err, MixError::InvalidInput { .. }));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let items: Vec<Item> = (0..40)
            .map(|i| {
                let x = i as f64;
                Item::bare(format!("t{}", i), vec![(x * 0.37).sin(), x % 7.0, 1.0 / (x + 1.0)])
            })
            .collect();
        let w = weights(&[2.2, 0.1, 4.0]);

        let seq = DistanceMatrix::build(&items, &w).unwrap();
        let par = DistanceMatrix::build_parallel(&items, &w).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_path_cost() {
        let m = DistanceMatrix::from_vectors(
            &[vec![0.0], vec![1.0], vec![5.0], vec![6.0]],
            &weights(&[1.0]),
        )
        .unwrap();
        assert_eq!(m.path_cost(&[0, 1, 2, 3]), 6.0);
        assert_eq!(m.path_cost(&[3, 0, 1, 2]), 11.0);
        assert_eq!(m.path_cost(&[2]), 0.0);
    }
}
