//! Status event store port.
//!
//! The append-only audit trail. There is no update or delete.

use async_trait::async_trait;

use crate::domain::complaint::{ComplaintStatus, StatusEvent};
use crate::domain::foundation::{ComplaintId, DomainError, Timestamp, UserId};

#[async_trait]
pub trait StatusEventStore: Send + Sync {
    /// Append one event.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn append(&self, event: &StatusEvent) -> Result<(), DomainError>;

    /// Full history of a complaint, newest first.
    async fn history(&self, complaint_id: &ComplaintId) -> Result<Vec<StatusEvent>, DomainError>;

    /// Most recent event for (complaint, status, actor) created at or after `since`.
    async fn latest_matching(
        &self,
        complaint_id: &ComplaintId,
        status: ComplaintStatus,
        actor: &UserId,
        since: Timestamp,
    ) -> Result<Option<StatusEvent>, DomainError>;
}
