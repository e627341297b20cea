//! Core types for tsp_mix
//!
//! This module defines the items being ordered, their opaque track payload,
//! and the run configuration.

use crate::errors::{MixError, Result};
use crate::features::FeatureWeights;
use serde::{Deserialize, Serialize};

// ============================================================================
// Track payload
// ============================================================================

/// Descriptive data carried alongside an item. The ordering never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Track {
    /// Catalog URI used when the ordering is written back
    pub uri: String,
    /// Track title
    pub name: String,
    /// Credited artists, in catalog order
    #[serde(default)]
    pub artists: Vec<String>,
}

impl Track {
    /// Create a new track payload
    pub fn new(uri: impl Into<String>, name: impl Into<String>, artists: Vec<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            artists,
        }
    }

    /// All artists joined with ", " (empty when there are none)
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}

// ============================================================================
// Item
// ============================================================================

/// One thing to be ordered: an identifier, a payload and its feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque identifier
    pub id: String,
    /// Opaque payload
    pub payload: Track,
    /// Feature values in schema column order
    pub features: Vec<f64>,
}

impl Item {
    /// Create a new item
    pub fn new(id: impl Into<String>, payload: Track, features: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            payload,
            features,
        }
    }

    /// Create an item with an empty payload (useful for raw vectors)
    pub fn bare(id: impl Into<String>, features: Vec<f64>) -> Self {
        Self::new(id, Track::default(), features)
    }
}

// ============================================================================
// Walk start
// ============================================================================

/// Vertex the circuit walk starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkStart {
    /// Vertex 0, the spanning-tree root
    #[default]
    Root,
    /// Vertex N-1
    HighestIndex,
}

impl WalkStart {
    /// Resolve to a concrete vertex for a graph of `n` vertices (`n > 0`)
    pub fn vertex(self, n: usize) -> usize {
        match self {
            WalkStart::Root => 0,
            WalkStart::HighestIndex => n.saturating_sub(1),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for one ordering run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixConfig {
    /// Weight per feature name
    #[serde(default = "FeatureWeights::audio_defaults")]
    pub weights: FeatureWeights,
    /// Where the circuit walk starts
    #[serde(default)]
    pub walk_start: WalkStart,
    /// Build distance rows in parallel once N reaches this size
    #[serde(default)]
    pub parallel_threshold: Option<usize>,
    /// Maximum item count before rejecting the input
    #[serde(default)]
    pub max_items: Option<usize>,
    /// Appended to the source collection name when the result is submitted
    #[serde(default = "default_mix_suffix")]
    pub mix_suffix: String,
}

fn default_mix_suffix() -> String {
    " - mix".to_string()
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            weights: FeatureWeights::audio_defaults(),
            walk_start: WalkStart::Root,
            parallel_threshold: None,
            max_items: None,
            mix_suffix: default_mix_suffix(),
        }
    }
}

impl MixConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;

        if self.max_items.is_some_and(|m| m < 2) {
            return Err(MixError::invalid_input("max_items must be >= 2"));
        }

        if self.parallel_threshold == Some(0) {
            return Err(MixError::invalid_input("parallel_threshold must be > 0"));
        }

        Ok(())
    }

    /// Check `n` against the configured item limit
    pub fn check_item_count(&self, n: usize) -> Result<()> {
        match self.max_items {
            Some(max) if n > max => Err(MixError::invalid_input(format!(
                "{} items exceed max_items = {}",
                n, max
            ))),
            _ => Ok(()),
        }
    }

    /// Whether distance rows for `n` items should be built in parallel
    pub fn use_parallel(&self, n: usize) -> bool {
        self.parallel_threshold.is_some_and(|t| n >= t)
    }

    /// Builder method: replace all weights
    pub fn with_weights(mut self, weights: FeatureWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Builder method: set one feature weight
    pub fn with_weight(mut self, feature: impl Into<String>, weight: f64) -> Self {
        self.weights.set(feature, weight);
        self
    }

    /// Builder method: set walk start vertex
    pub fn with_walk_start(mut self, start: WalkStart) -> Self {
        self.walk_start = start;
        self
    }

    /// Builder method: set parallel threshold
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = Some(threshold);
        self
    }

    /// Builder method: set maximum item count
    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Builder method: set mix name suffix
    pub fn with_mix_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.mix_suffix = suffix.into();
        self
    }
}
