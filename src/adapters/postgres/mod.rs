//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresComplaintRepository` - Complaint rows and the conditional claim
//! - `PostgresStatusEventStore` - Append-only audit trail
//! - `PostgresUserDirectory` - Read-only profile lookup

mod complaint_repository;
mod status_event_store;
mod user_directory;

pub use complaint_repository::PostgresComplaintRepository;
pub use status_event_store::PostgresStatusEventStore;
pub use user_directory::PostgresUserDirectory;

use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};

use crate::domain::foundation::DomainError;

fn db_error(action: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, action, "database operation failed");
    DomainError::database(format!("Failed to {}: {}", action, err))
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}
