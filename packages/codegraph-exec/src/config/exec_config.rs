//! Top-level configuration
//!
//! ```rust,ignore
//! use codegraph_exec::config::ExecConfig;
//!
//! // Defaults match the benchmark's wrapper layout
//! let config = ExecConfig::default();
//!
//! // Or load a team file
//! let config = ExecConfig::from_yaml("bench.yaml")?;
//! ```

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, SUPPORTED_VERSIONS};
use super::stage_configs::{BatchConfig, CfgConfig, ScoringConfig, TraceConfig};
use super::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Complete configuration for canonicalization, tracing, scoring and batching
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecConfig {
    pub cfg: CfgConfig,
    pub trace: TraceConfig,
    pub scoring: ScoringConfig,
    pub batch: BatchConfig,
}

impl ExecConfig {
    /// Load and validate a YAML configuration file
    pub fn from_yaml(path: &str) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = Self {
            cfg: export.cfg.unwrap_or_default(),
            trace: export.trace.unwrap_or_default(),
            scoring: export.scoring.unwrap_or_default(),
            batch: export.batch.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Export to YAML (schema v1, every section written out)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            cfg: Some(self.cfg.clone()),
            trace: Some(self.trace.clone()),
            scoring: Some(self.scoring.clone()),
            batch: Some(self.batch.clone()),
        };

        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }
}

impl Validatable for ExecConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.cfg.validate()?;
        self.trace.validate()?;
        self.scoring.validate()?;
        self.batch.validate()
    }

    fn config_name(&self) -> &'static str {
        "ExecConfig"
    }
}
