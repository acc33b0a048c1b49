//! Mock authentication adapter for testing.
//!
//! Implements the `SessionValidator` port without signing anything.
//!
//! # Example
//!
//! ```ignore
//! use complaint_desk::adapters::auth::MockSessionValidator;
//! use complaint_desk::domain::foundation::Role;
//!
//! let validator = MockSessionValidator::new()
//!     .with_test_user("tech-token", "tech-1", Role::Technician);
//!
//! let result = validator.validate("tech-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, UserId};
use crate::ports::SessionValidator;

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Adds a valid token for a user with the given ID and role.
    ///
    /// # Panics
    ///
    /// If `user_id` is blank.
    pub fn with_test_user(
        self,
        token: impl Into<String>,
        user_id: impl Into<String>,
        role: Role,
    ) -> Self {
        let user_id = user_id.into();
        let user = AuthenticatedUser::new(
            UserId::new(&user_id).expect("test user id must not be blank"),
            user_id.clone(),
            Some(format!("Test User {}", user_id)),
            role,
        );
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        if let Ok(mut forced) = self.force_error.write() {
            *forced = Some(error);
        }
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(token.into(), user);
        }
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let poisoned = || AuthError::service_unavailable("mock validator lock poisoned");

        if let Some(error) = self.force_error.read().map_err(|_| poisoned())?.clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .map_err(|_| poisoned())?
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
