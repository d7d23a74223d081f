//! Configuration I/O (YAML schema)
//!
//! Defines the on-disk schema. Loading and saving live in `exec_config.rs`.

use super::stage_configs::{BatchConfig, CfgConfig, ScoringConfig, TraceConfig};
use serde::{Deserialize, Serialize};

/// Schema versions this build understands
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1); optional here so a missing field
    /// reports `MissingVersion` instead of a generic YAML error
    #[serde(default)]
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfg: Option<CfgConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<BatchConfig>,
}
