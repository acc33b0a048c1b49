//! PostgreSQL implementation of UserDirectory.
//!
//! Reads the `users` table owned by the login service. Never writes.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{PublicProfile, UserDirectory};

use super::{column, db_error};

#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_profiles(&self, ids: &[UserId]) -> Result<Vec<PublicProfile>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();
        let rows = sqlx::query("SELECT id, username, display_name FROM users WHERE id = ANY($1)")
            .bind(&keys)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("fetch user profiles", e))?;

        rows.iter()
            .map(|row| -> Result<PublicProfile, DomainError> {
                let id: String = column(row, "id")?;
                Ok(PublicProfile {
                    id: UserId::new(id)
                        .map_err(|e| DomainError::database(format!("Invalid user id: {}", e)))?,
                    username: column(row, "username")?,
                    display_name: column(row, "display_name")?,
                })
            })
            .collect()
    }
}
