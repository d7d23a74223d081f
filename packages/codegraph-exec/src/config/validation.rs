//! Configuration validation
//!
//! Every section implements [`Validatable`]; [`ExecConfig`] validates by
//! delegating to its sections.
//!
//! [`ExecConfig`]: super::ExecConfig

use super::error::ConfigResult;

/// Trait for validatable configuration objects
///
/// # Example
/// ```rust,ignore
/// use codegraph_exec::config::Validatable;
///
/// fn start<C: Validatable>(config: C) -> Result<(), ConfigError> {
///     config.validate()?;
///     // ... run
/// }
/// ```
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}
