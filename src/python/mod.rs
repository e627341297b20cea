//! Python bindings via PyO3
//!
//! This module provides the Python interface for tsp_mix.

pub mod json;
pub mod native;

use pyo3::prelude::*;

/// Register all Python classes and functions
pub fn register_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    // Native interface
    m.add_class::<native::PyMixOutcome>()?;
    m.add_function(wrap_pyfunction!(native::order_vectors, m)?)?;
    m.add_function(wrap_pyfunction!(native::default_weights, m)?)?;
    m.add_function(wrap_pyfunction!(native::distance, m)?)?;

    // JSON interface
    m.add_function(wrap_pyfunction!(json::order_from_json, m)?)?;

    Ok(())
}
