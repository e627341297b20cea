//! String-in, string-out JSON interface
//!
//! Keeps foreign callers away from the Rust types: one JSON document in,
//! one JSON document out. Failures come back as an `{"error": ...}` object
//! rather than a panic or a foreign exception.
//!
//! Input:
//!
//! ```json
//! {
//!   "name": "optional label",
//!   "features": ["energy", "valence"],
//!   "weights": {"energy": 4.0, "valence": 4.0},
//!   "items": [{"id": "a", "values": [0.1, 0.9]}, {"id": "b", "values": [0.5, 0.2]}],
//!   "config": {"walk_start": "root"}
//! }
//! ```
//!
//! `weights` replaces `config.weights` when present; both default to the
//! audio-feature weights.

use serde::{Deserialize, Serialize};

use crate::errors::MixError;
use crate::features::{FeatureSchema, FeatureWeights};
use crate::pipeline::{
    Pipeline, PipelineRuntimeError, StageTracker, STAGE_CONFIG, STAGE_DECODE, STAGE_INPUT,
};
use crate::types::{Item, MixConfig};

/// Item entry in a JSON request
#[derive(Debug, Clone, Deserialize)]
pub struct JsonItem {
    pub id: String,
    pub values: Vec<f64>,
}

/// Ordering request
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub features: Vec<String>,
    #[serde(default)]
    pub weights: Option<FeatureWeights>,
    pub items: Vec<JsonItem>,
    #[serde(default)]
    pub config: Option<MixConfig>,
}

/// Successful ordering response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ordering: Vec<usize>,
    pub ids: Vec<String>,
    pub path_cost: f64,
    pub tree_weight: f64,
}

#[derive(Debug, Serialize)]
struct JsonErrorResponse {
    error: PipelineRuntimeError,
}

/// Order the items of a parsed request.
///
/// Failures are reported against the stage that raised them: `config` for
/// a config that fails validation, `input` for items rejected before the
/// first stage, otherwise the running stage.
pub fn order_request(
    request: JsonRequest,
) -> std::result::Result<JsonResponse, PipelineRuntimeError> {
    let mut config = request.config.unwrap_or_default();
    if let Some(weights) = request.weights {
        config.weights = weights;
    }

    let schema = FeatureSchema::new(request.features);
    let items: Vec<Item> = request
        .items
        .into_iter()
        .map(|it| Item::bare(it.id, it.values))
        .collect();

    let pipeline =
        Pipeline::new(config).map_err(|e| PipelineRuntimeError::at_stage(&e, STAGE_CONFIG))?;

    let mut tracker = StageTracker::new();
    let result = pipeline.run(&items, &schema, &mut tracker);
    let outcome = result.map_err(|e| {
        PipelineRuntimeError::at_stage(&e, tracker.current().unwrap_or(STAGE_INPUT))
    })?;

    Ok(JsonResponse {
        name: request.name,
        ids: outcome.ids(&items).into_iter().map(str::to_string).collect(),
        ordering: outcome.ordering,
        path_cost: outcome.path_cost,
        tree_weight: outcome.tree_weight,
    })
}

/// Order the items of a JSON request and return the JSON response.
pub fn order_from_json(input: &str) -> String {
    let result = serde_json::from_str::<JsonRequest>(input)
        .map_err(|e| PipelineRuntimeError::at_stage(&MixError::from(e), STAGE_DECODE))
        .and_then(order_request);

    let encoded = match result {
        Ok(response) => serde_json::to_string(&response),
        Err(error) => serde_json::to_string(&JsonErrorResponse { error }),
    };

    encoded.unwrap_or_else(|e| {
        format!(
            r#"{{"error":{{"code":"serialization","stage":"encode","message":{:?}}}}}"#,
            e.to_string()
        )
    })
}
