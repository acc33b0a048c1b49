//! In-memory user directory.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{PublicProfile, UserDirectory};

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    profiles: Arc<RwLock<HashMap<UserId, PublicProfile>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, profile: PublicProfile) {
        self.profiles.write().await.insert(profile.id.clone(), profile);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_profiles(&self, ids: &[UserId]) -> Result<Vec<PublicProfile>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(ids.iter().filter_map(|id| profiles.get(id).cloned()).collect())
    }
}
