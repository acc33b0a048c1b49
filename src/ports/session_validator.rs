//! Session validation port for bearer token validation.
//!
//! This port defines the contract for validating access tokens and extracting
//! the caller's identity and role. It is provider-agnostic: a signed-JWT
//! implementation and a mock for tests exist, and the core trusts whatever
//! `AuthenticatedUser` comes back.
//!
//! # Example Implementation
//!
//! ```ignore
//! pub struct JwtSessionValidator { ... }
//!
//! #[async_trait]
//! impl SessionValidator for JwtSessionValidator {
//!     async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
//!         // 1. Verify signature and exp
//!         // 2. Map sub/username/role claims to AuthenticatedUser
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// HTTP middleware uses this to validate Bearer tokens before any handler runs.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature
/// - Return `AuthError::InvalidToken` for malformed tokens, bad signatures or unknown roles
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate an access token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Role, UserId};
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    }

    impl TestSessionValidator {
        fn new() -> Self {
            Self {
                tokens: RwLock::new(HashMap::new()),
            }
        }

        fn add_valid_token(&self, token: &str, user: AuthenticatedUser) {
            self.tokens.write().unwrap().insert(token.to_string(), user);
        }
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn returns_user_for_known_token() {
        let validator = TestSessionValidator::new();
        validator.add_valid_token(
            "tok",
            AuthenticatedUser::new(UserId::new("tech-1").unwrap(), "tech1", None, Role::Technician),
        );

        let user = validator.validate("tok").await.unwrap();
        assert_eq!(user.id.as_str(), "tech-1");
        assert_eq!(user.role, Role::Technician);
    }

    #[tokio::test]
    async fn rejects_unknown_token() {
        let validator = TestSessionValidator::new();
        assert!(matches!(
            validator.validate("nope").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn session_validator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
