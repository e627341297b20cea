//! Native Python interface
//!
//! Plain Python lists in, a `MixOutcome` object out.

use std::collections::BTreeMap;

use crate::errors::MixError;
use crate::features::{FeatureWeights, WeightVector};
use crate::graph::DistanceMatrix;
use crate::pipeline::{MixOutcome, NoopObserver, Pipeline};
use crate::types::{Item, MixConfig, WalkStart};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(err: MixError) -> PyErr {
    if err.is_internal_defect() {
        PyRuntimeError::new_err(err.to_string())
    } else {
        PyValueError::new_err(err.to_string())
    }
}

/// Result of ordering a set of vectors
#[pyclass(name = "MixOutcome")]
#[derive(Clone)]
pub struct PyMixOutcome {
    #[pyo3(get)]
    pub ordering: Vec<usize>,
    #[pyo3(get)]
    pub walk: Vec<usize>,
    #[pyo3(get)]
    pub tree_weight: f64,
    #[pyo3(get)]
    pub path_cost: f64,
}

#[pymethods]
impl PyMixOutcome {
    fn __repr__(&self) -> String {
        format!(
            "MixOutcome(items={}, path_cost={:.4}, tree_weight={:.4})",
            self.ordering.len(),
            self.path_cost,
            self.tree_weight
        )
    }

    fn __len__(&self) -> usize {
        self.ordering.len()
    }
}

impl From<MixOutcome> for PyMixOutcome {
    fn from(o: MixOutcome) -> Self {
        Self {
            ordering: o.ordering,
            walk: o.walk,
            tree_weight: o.tree_weight,
            path_cost: o.path_cost,
        }
    }
}

/// Order raw feature vectors
///
/// Args:
///     vectors: one list of floats per item, all the same length
///     weights: one non-negative weight per column
///     start_last: start the walk at the last item instead of the first
#[pyfunction]
#[pyo3(signature = (vectors, weights, start_last = false))]
pub fn order_vectors(
    py: Python<'_>,
    vectors: Vec<Vec<f64>>,
    weights: Vec<f64>,
    start_last: bool,
) -> PyResult<PyMixOutcome> {
    py.allow_threads(|| {
        let weights = WeightVector::new(weights)?;
        let walk_start = if start_last {
            WalkStart::HighestIndex
        } else {
            WalkStart::Root
        };
        let items: Vec<Item> = vectors
            .into_iter()
            .enumerate()
            .map(|(i, v)| Item::bare(i.to_string(), v))
            .collect();

        // Column weights are given directly, so named weights only need to pass validation.
        let config = MixConfig::default().with_walk_start(walk_start);
        let outcome = Pipeline::new(config)?.run_with_weights(&items, &weights, &mut NoopObserver)?;
        Ok::<_, MixError>(PyMixOutcome::from(outcome))
    })
    .map_err(to_py_err)
}

/// Default audio-feature weights as a dict
#[pyfunction]
pub fn default_weights() -> BTreeMap<String, f64> {
    FeatureWeights::audio_defaults()
        .iter()
        .map(|(name, w)| (name.to_string(), w))
        .collect()
}

/// Weighted distance between two vectors
#[pyfunction]
pub fn distance(a: Vec<f64>, b: Vec<f64>, weights: Vec<f64>) -> PyResult<f64> {
    let weights = WeightVector::new(weights).map_err(to_py_err)?;
    let pair = [a, b];
    let m = DistanceMatrix::from_vectors(&pair[..], &weights).map_err(to_py_err)?;
    Ok(m.get(0, 1))
}
