//! Application configuration module
//!
//! Configuration is read from environment variables with the `COMPLAINT_DESK`
//! prefix; nested values are separated by a double underscore.
//!
//! # Example
//!
//! ```no_run
//! use complaint_desk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod server;
mod workflow;

pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_LEN};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use workflow::WorkflowConfig;

use serde::Deserialize;

use crate::adapters::auth::JwtConfig;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Bearer token verification
    pub auth: AuthConfig,

    /// Duplicate guard and pagination tuning
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `COMPLAINT_DESK__SECTION__KEY`
    /// variables, e.g. `COMPLAINT_DESK__DATABASE__URL` or
    /// `COMPLAINT_DESK__WORKFLOW__DUPLICATE_WINDOW_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or a value
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COMPLAINT_DESK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.workflow.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Token verification settings for the session validator.
    pub fn jwt_config(&self) -> JwtConfig {
        let config = JwtConfig::new(self.auth.jwt_secret.clone());
        match &self.auth.issuer {
            Some(issuer) => config.with_issuer(issuer.clone()),
            None => config,
        }
    }
}
