//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `SABBPE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use sabbpe_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod gateway;
mod processor;

pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use processor::ProcessorConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Merchant credential bundle
    pub gateway: GatewayConfig,

    /// Processor endpoints and transport policy
    pub processor: ProcessorConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `SABBPE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `SABBPE__GATEWAY__MERCH_ID=446442` -> `gateway.merch_id`
    /// - `SABBPE__PROCESSOR__AUTH_URL=...` -> `processor.auth_url`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SABBPE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.gateway.validate()?;
        self.processor.validate()?;
        Ok(())
    }
}
