//! PostgreSQL implementation of StatusEventStore.
//!
//! Only INSERT and SELECT are issued against `complaint_status_events`.
//! `seq` is assigned by the database on insert and breaks timestamp ties, so
//! newest-first holds even for events written in the same instant.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::complaint::{ComplaintStatus, StatusEvent};
use crate::domain::foundation::{ComplaintId, DomainError, StatusEventId, Timestamp, UserId};
use crate::ports::StatusEventStore;

use super::{column, db_error};

const HISTORY_SQL: &str = r#"
    SELECT id, complaint_id, status, actor_id, reason, created_at
    FROM complaint_status_events
    WHERE complaint_id = $1
    ORDER BY created_at DESC, seq DESC
"#;

const LATEST_MATCHING_SQL: &str = r#"
    SELECT id, complaint_id, status, actor_id, reason, created_at
    FROM complaint_status_events
    WHERE complaint_id = $1 AND status = $2 AND actor_id = $3 AND created_at >= $4
    ORDER BY created_at DESC, seq DESC
    LIMIT 1
"#;

#[derive(Clone)]
pub struct PostgresStatusEventStore {
    pool: PgPool,
}

impl PostgresStatusEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusEventStore for PostgresStatusEventStore {
    async fn append(&self, event: &StatusEvent) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO complaint_status_events (
                id, complaint_id, status, actor_id, reason, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(event.id().as_uuid())
        .bind(event.complaint_id().as_uuid())
        .bind(event.status().as_str())
        .bind(event.actor_id().map(|a| a.as_str()))
        .bind(event.reason())
        .bind(event.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert status event", e))?;

        Ok(())
    }

    async fn history(&self, complaint_id: &ComplaintId) -> Result<Vec<StatusEvent>, DomainError> {
        let rows = sqlx::query(HISTORY_SQL)
            .bind(complaint_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("fetch status history", e))?;

        rows.into_iter().map(row_to_event).collect()
    }

    async fn latest_matching(
        &self,
        complaint_id: &ComplaintId,
        status: ComplaintStatus,
        actor: &UserId,
        since: Timestamp,
    ) -> Result<Option<StatusEvent>, DomainError> {
        let row = sqlx::query(LATEST_MATCHING_SQL)
            .bind(complaint_id.as_uuid())
            .bind(status.as_str())
            .bind(actor.as_str())
            .bind(since.as_datetime())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch latest status event", e))?;

        row.map(row_to_event).transpose()
    }
}

fn row_to_event(row: PgRow) -> Result<StatusEvent, DomainError> {
    let status: String = column(&row, "status")?;
    let status: ComplaintStatus = status
        .parse()
        .map_err(|e| DomainError::database(format!("Invalid event status: {}", e)))?;
    let actor: Option<String> = column(&row, "actor_id")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;

    Ok(StatusEvent::reconstitute(
        StatusEventId::from_uuid(column(&row, "id")?),
        ComplaintId::from_uuid(column(&row, "complaint_id")?),
        status,
        actor
            .map(UserId::new)
            .transpose()
            .map_err(|e| DomainError::database(format!("Invalid actor_id: {}", e)))?,
        column(&row, "reason")?,
        Timestamp::from_datetime(created_at),
    ))
}
