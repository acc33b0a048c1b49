//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HMAC secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Bearer token configuration (HS256 tokens issued by the login service)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret
    pub jwt_secret: SecretString,

    /// Expected `iss` claim, if the login service sets one
    #[serde(default)]
    pub issuer: Option<String>,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// Any non-empty secret is accepted in development; production requires
    /// at least `MIN_PRODUCTION_SECRET_LEN` bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("COMPLAINT_DESK__AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::WeakJwtSecret(MIN_PRODUCTION_SECRET_LEN));
        }
        Ok(())
    }
}
