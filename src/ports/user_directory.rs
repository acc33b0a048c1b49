//! User directory port.
//!
//! Read-only lookup of public profile fields used to annotate audit history.
//! Account management lives elsewhere.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, UserId};

/// Public identity fields of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub id: UserId,
    pub username: String,
    pub display_name: Option<String>,
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up several users at once. Unknown IDs are simply absent from the result.
    async fn find_profiles(&self, ids: &[UserId]) -> Result<Vec<PublicProfile>, DomainError>;
}
