//! Configuration System
//!
//! Two levels:
//! - Level 1: `ExecConfig::default()` reproduces the benchmark's fixed layout
//! - Level 2: YAML v1 file overriding any section
//!
//! ```yaml
//! version: 1
//! cfg:
//!   exclude_raise_successors: false
//! trace:
//!   module_marker: example.py
//! scoring:
//!   strict_symbol_table: true
//! batch:
//!   timeout_seconds: 10
//! ```

pub mod error;
pub mod exec_config;
pub mod io;
pub mod stage_configs;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use exec_config::ExecConfig;
pub use io::ConfigExportV1;
pub use stage_configs::{BatchConfig, CfgConfig, ScoringConfig, TraceConfig};
pub use validation::Validatable;
