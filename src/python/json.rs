//! JSON interface
//!
//! Passing one JSON document keeps Python↔Rust conversions to a single
//! string each way.

use pyo3::prelude::*;

/// Order items described by a JSON request
///
/// Args:
///     json_input: JSON string with `features`, `items` and optional
///         `weights` / `config`
///
/// Returns:
///     JSON string with `ordering` and `ids`, or an `error` object
#[pyfunction]
#[pyo3(signature = (json_input))]
pub fn order_from_json(py: Python<'_>, json_input: &str) -> String {
    py.allow_threads(|| crate::json::order_from_json(json_input))
}
