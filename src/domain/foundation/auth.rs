//! Authentication types for the domain layer.
//!
//! These types represent the caller of every core operation. They have
//! **no external dependencies** - any token scheme can populate them via
//! the `SessionValidator` port, and the core trusts what it receives.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after token validation:
//! let user = AuthenticatedUser::new(
//!     UserId::new("tech-7")?,
//!     "budi",
//!     Some("Budi Santoso".to_string()),
//!     Role::Technician,
//! );
//!
//! request.extensions_mut().insert(user);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::UserId;

/// Role carried by an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Files complaints and follows their progress.
    Customer,
    /// Claims complaints from the pool and works them to completion.
    Technician,
    /// Oversees all complaints; bypasses assignee checks.
    Admin,
}

impl Role {
    /// Returns true for roles allowed to change complaint status.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Technician | Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Technician => "technician",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "technician" => Ok(Role::Technician),
            "admin" => Ok(Role::Admin),
            _ => Err(AuthError::InvalidToken),
        }
    }
}

/// Authenticated caller extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// Login name.
    pub username: String,

    /// Full name if the provider supplied one.
    pub display_name: Option<String>,

    /// Role used for every authorization decision in the core.
    pub role: Role,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        display_name: Option<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            display_name,
            role,
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}
