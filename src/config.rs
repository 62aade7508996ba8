//! Configuration management for razorscope
//!
//! Tool-level settings are loaded from environment variables with sensible
//! defaults. Project-level settings (template selection, reload overrides,
//! the workaround flag) are *not* configured here: they are MSBuild properties
//! carried by [`BuildProperties`](crate::project::BuildProperties) and read by
//! the individual collectors.
//!
//! # Environment Variables
//!
//! - `RAZORSCOPE_CONFIGURATION`: Build configuration used when neither the
//!   project nor the command line sets one - default: "Debug"
//! - `RAZORSCOPE_LOG_LEVEL`: Logging level - default: "warn"
//! - `RAZORSCOPE_LOG_JSON`: Emit JSON log records (true|false) - default: "false"
//!
//! # Example
//!
//! ```no_run
//! use razorscope::RazorscopeConfig;
//!
//! let config = RazorscopeConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_CONFIGURATION: &str = "Debug";
const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_LOG_JSON: bool = false;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A `-p` argument that is not of the form `KEY=VALUE`
    #[error("Invalid property assignment '{0}'. Expected KEY=VALUE")]
    InvalidProperty(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Tool configuration for razorscope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RazorscopeConfig {
    /// Build configuration name (Debug, Release, ...)
    pub configuration: String,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit log records as JSON
    pub log_json: bool,
}

impl Default for RazorscopeConfig {
    /// Loads configuration from `RAZORSCOPE_*` environment variables, falling
    /// back to defaults for anything unset.
    fn default() -> Self {
        let configuration = env::var("RAZORSCOPE_CONFIGURATION")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIGURATION.to_string());

        let log_level = env::var("RAZORSCOPE_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("RAZORSCOPE_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_LOG_JSON);

        Self {
            configuration,
            log_level,
            log_json,
        }
    }
}

impl RazorscopeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if the configuration name is blank
    /// or the log level is unknown.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.configuration.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Configuration name cannot be empty".to_string(),
            ));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        Ok(())
    }
}

impl fmt::Display for RazorscopeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Razorscope Configuration:")?;
        writeln!(f, "  Configuration: {}", self.configuration)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        write!(f, "  JSON Logs: {}", self.log_json)
    }
}
