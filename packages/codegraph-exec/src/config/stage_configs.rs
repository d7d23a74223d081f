//! Stage-specific configuration types
//!
//! Each stage has its own configuration struct with validation. Defaults
//! reproduce the benchmark's fixed wrapper layout: submissions wrapped in a
//! one-line `def` header, CFG entry `<entry:testFun>`, instrumented module
//! `example.py` calling `test_function`.

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use serde::{Deserialize, Serialize};

// ============================================================================
// Block canonicalization
// ============================================================================

/// Block canonicalization configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CfgConfig {
    /// Label of the raw block that marks the analyzed function's entry
    pub entry_label: String,

    /// Label of the error-raising sentinel block
    pub raise_label: String,

    /// Wrapper header lines subtracted from raw CFG line numbers (0..=16)
    pub line_offset: u32,

    /// Skip blocks whose successor is the raise sentinel
    pub exclude_raise_successors: bool,

    /// Treat a branch that resolves to no block as a discard instead of a null edge
    pub discard_unresolved_edges: bool,
}

impl Default for CfgConfig {
    fn default() -> Self {
        Self {
            entry_label: "<entry:testFun>".to_string(),
            raise_label: "<raise>".to_string(),
            line_offset: 1,
            exclude_raise_successors: false,
            discard_unresolved_edges: false,
        }
    }
}

impl Validatable for CfgConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.entry_label.is_empty() {
            return Err(ConfigError::empty(
                "cfg.entry_label",
                "Blocks are only collected after the entry block",
            ));
        }
        if self.line_offset > 16 {
            return Err(ConfigError::range_with_hint(
                "cfg.line_offset",
                self.line_offset,
                0,
                16,
                "Offset counts wrapper header lines",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "CfgConfig"
    }
}

// ============================================================================
// Instrumentation log parsing
// ============================================================================

/// Instrumentation log configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceConfig {
    /// Module name in `<module>:<line>` markers
    pub module_marker: String,

    /// Wrapper function named in the exception trailer
    pub wrapper_function: String,

    /// Literal token that signals the run ended in an exception
    pub exception_token: String,

    /// Prefix of post-mortem continuation lines
    pub continuation_prefix: String,

    /// Wrapper header lines subtracted from logged line numbers (0..=16)
    pub line_offset: u32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            module_marker: "example.py".to_string(),
            wrapper_function: "test_function".to_string(),
            exception_token: "exception".to_string(),
            continuation_prefix: "...".to_string(),
            line_offset: 1,
        }
    }
}

impl Validatable for TraceConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.module_marker.is_empty() {
            return Err(ConfigError::empty(
                "trace.module_marker",
                "Execution order is read from '<module>:<line>' markers",
            ));
        }
        if self.exception_token.is_empty() {
            return Err(ConfigError::empty(
                "trace.exception_token",
                "An empty token would flag every line as an exception",
            ));
        }
        if self.wrapper_function.is_empty() {
            return Err(ConfigError::empty(
                "trace.wrapper_function",
                "The exception trailer names the wrapper function",
            ));
        }
        if self.continuation_prefix.trim().is_empty() {
            return Err(ConfigError::empty(
                "trace.continuation_prefix",
                "An empty prefix would fold every line after the exception into its state",
            ));
        }
        if self.line_offset > 16 {
            return Err(ConfigError::range_with_hint(
                "trace.line_offset",
                self.line_offset,
                0,
                16,
                "Offset counts wrapper header lines",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "TraceConfig"
    }
}

// ============================================================================
// Scoring
// ============================================================================

/// Scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Exception classes the error-type metric distinguishes
    pub recognized_error_classes: Vec<String>,

    /// Abort symbol-table accuracy when any predicted value fails to parse
    pub strict_symbol_table: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            recognized_error_classes: vec!["TypeError".to_string()],
            strict_symbol_table: true,
        }
    }
}

impl Validatable for ScoringConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.recognized_error_classes.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::empty(
                "scoring.recognized_error_classes",
                "Remove blank class names",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "ScoringConfig"
    }
}

// ============================================================================
// Batch orchestration
// ============================================================================

/// Batch orchestration configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Wall-clock budget per collaborator call in seconds (1..=3600)
    pub timeout_seconds: u64,

    /// Worker threads (None = 75% of cores, 1..=1024)
    pub num_threads: Option<usize>,

    /// Timed-out collaborator calls that may still be running before new
    /// calls are refused (1..=4096)
    pub max_overrunning_workers: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            num_threads: None,
            max_overrunning_workers: 64,
        }
    }
}

impl BatchConfig {
    /// Worker threads actually used
    pub fn effective_threads(&self) -> usize {
        match self.num_threads {
            Some(n) => n,
            None => std::cmp::max(1, (num_cpus::get() * 3) / 4),
        }
    }
}

impl Validatable for BatchConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.timeout_seconds == 0 || self.timeout_seconds > 3600 {
            return Err(ConfigError::range_with_hint(
                "batch.timeout_seconds",
                self.timeout_seconds,
                1,
                3600,
                "Collaborators need at least one second",
            ));
        }
        if self.max_overrunning_workers == 0 || self.max_overrunning_workers > 4096 {
            return Err(ConfigError::range_with_hint(
                "batch.max_overrunning_workers",
                self.max_overrunning_workers,
                1,
                4096,
                "Each timed-out call holds a thread until its collaborator returns",
            ));
        }
        if let Some(n) = self.num_threads {
            if n == 0 || n > 1024 {
                return Err(ConfigError::range_with_hint(
                    "batch.num_threads",
                    n,
                    1,
                    1024,
                    "Omit the field to use 75% of available cores",
                ));
            }
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "BatchConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(CfgConfig::default().validate().is_ok());
        assert!(TraceConfig::default().validate().is_ok());
        assert!(ScoringConfig::default().validate().is_ok());
        assert!(BatchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_batch_timeout_range() {
        let config = BatchConfig {
            timeout_seconds: 0,
            ..BatchConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn test_batch_threads_range() {
        let config = BatchConfig {
            num_threads: Some(0),
            ..BatchConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(BatchConfig::default().effective_threads() >= 1);
    }

    #[test]
    fn test_batch_overrunning_workers_range() {
        let config = BatchConfig {
            max_overrunning_workers: 0,
            ..BatchConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_overrunning_workers"));
    }

    #[test]
    fn test_cfg_line_offset_range() {
        let config = CfgConfig {
            line_offset: 40,
            ..CfgConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_continuation_prefix_rejected() {
        for prefix in ["", "   "] {
            let config = TraceConfig {
                continuation_prefix: prefix.to_string(),
                ..TraceConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("continuation_prefix"));
        }
    }

    #[test]
    fn test_blank_error_class_rejected() {
        let config = ScoringConfig {
            recognized_error_classes: vec!["TypeError".into(), " ".into()],
            ..ScoringConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
