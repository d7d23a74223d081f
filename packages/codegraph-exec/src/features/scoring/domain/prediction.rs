//! Predictor output model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Symbol table the predictor reported for one visited block
///
/// Values are literal text, e.g. `"(2, int)"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedState {
    pub block_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_table: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedError {
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_block: Option<u32>,
}

/// Parsed walk of one predictor response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedExecution {
    pub block_order: Vec<u32>,
    pub states: Vec<PredictedState>,
    #[serde(default)]
    pub error: PredictedError,
}
