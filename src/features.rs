//! Feature schema and per-feature weights
//!
//! A [`FeatureSchema`] fixes the order and count (D) of the numeric features
//! every item carries. [`FeatureWeights`] maps feature names to weights and is
//! resolved against a schema into a dense [`WeightVector`] before distances
//! are computed.

use crate::errors::{MixError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Audio features used by the playlist mixer, in column order.
pub const AUDIO_FEATURE_KEYS: [&str; 11] = [
    "danceability",
    "energy",
    "key",
    "loudness",
    "mode",
    "speechiness",
    "acousticness",
    "instrumentalness",
    "liveness",
    "valence",
    "tempo",
];

/// Default weights matching [`AUDIO_FEATURE_KEYS`] position for position.
pub const AUDIO_FEATURE_WEIGHTS: [f64; 11] = [2.2, 4.0, 0.1, 1.5, 1.0, 1.0, 1.0, 1.0, 1.0, 4.0, 3.3];

// ============================================================================
// Schema
// ============================================================================

/// Ordered feature names shared by every item in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    /// Create a schema from feature names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The schema of audio features used by the playlist mixer
    pub fn audio_features() -> Self {
        Self::new(AUDIO_FEATURE_KEYS)
    }

    /// Feature names in column order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of features (D)
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the schema has no features
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column index of a feature
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Pull the schema's features out of a name → value map, in column order.
    ///
    /// `owner` names the item in the error message.
    pub fn extract(&self, values: &BTreeMap<String, f64>, owner: &str) -> Result<Vec<f64>> {
        self.names
            .iter()
            .map(|name| {
                values.get(name).copied().ok_or_else(|| {
                    MixError::invalid_input(format!(
                        "item '{}' has no value for feature '{}'",
                        owner, name
                    ))
                })
            })
            .collect()
    }
}

// ============================================================================
// Weights
// ============================================================================

/// Dense weight vector, one non-negative weight per schema column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// Build a weight vector, rejecting negative or non-finite entries
    pub fn new(weights: Vec<f64>) -> Result<Self> {
        if let Some((k, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(MixError::invalid_input(format!(
                "weight {} at dimension {} must be finite and >= 0",
                w, k
            )));
        }
        Ok(Self(weights))
    }

    /// Weights as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of dimensions
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no dimensions
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Feature name → weight. A weight of `0` removes the feature from the
/// distance entirely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureWeights(BTreeMap<String, f64>);

impl FeatureWeights {
    /// Create an empty weight map
    pub fn new() -> Self {
        Self::default()
    }

    /// Default weights for [`FeatureSchema::audio_features`]
    pub fn audio_defaults() -> Self {
        AUDIO_FEATURE_KEYS
            .iter()
            .zip(AUDIO_FEATURE_WEIGHTS.iter())
            .map(|(k, w)| (k.to_string(), *w))
            .collect()
    }

    /// Builder method: set one weight
    pub fn with(mut self, feature: impl Into<String>, weight: f64) -> Self {
        self.0.insert(feature.into(), weight);
        self
    }

    /// Set one weight in place
    pub fn set(&mut self, feature: impl Into<String>, weight: f64) {
        self.0.insert(feature.into(), weight);
    }

    /// Look up a weight
    pub fn get(&self, feature: &str) -> Option<f64> {
        self.0.get(feature).copied()
    }

    /// Number of configured features
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no weights are configured
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate weights in feature-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Check every weight is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(MixError::invalid_input("feature weights must not be empty"));
        }
        for (name, w) in &self.0 {
            if !w.is_finite() || *w < 0.0 {
                return Err(MixError::invalid_input(format!(
                    "weight for feature '{}' must be finite and >= 0, got {}",
                    name, w
                )));
            }
        }
        Ok(())
    }

    /// Resolve into a dense vector following `schema` column order.
    ///
    /// Every schema feature needs a weight; weights for features the schema
    /// does not carry are ignored.
    pub fn resolve(&self, schema: &FeatureSchema) -> Result<WeightVector> {
        if schema.is_empty() {
            return Err(MixError::invalid_input("feature schema must not be empty"));
        }
        let dense = schema
            .names()
            .iter()
            .map(|name| {
                self.get(name).ok_or_else(|| {
                    MixError::invalid_input(format!("missing weight for feature '{}'", name))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        WeightVector::new(dense)
    }
}

impl FromIterator<(String, f64)> for FeatureWeights {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
