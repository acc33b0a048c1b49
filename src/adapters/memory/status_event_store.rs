//! In-memory status event store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::complaint::{ComplaintStatus, StatusEvent};
use crate::domain::foundation::{ComplaintId, DomainError, Timestamp, UserId};
use crate::ports::StatusEventStore;

/// Append-only event log held in a vector.
///
/// `fail_appends` and `fail_reads` simulate an unavailable store so the
/// reconciliation and degraded-history paths can be exercised.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatusEventStore {
    events: Arc<RwLock<Vec<StatusEvent>>>,
    fail_appends: Arc<AtomicBool>,
    fail_reads: Arc<AtomicBool>,
}

impl InMemoryStatusEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Total events across all complaints.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    fn check_reads(&self) -> Result<(), DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::database("status event store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl StatusEventStore for InMemoryStatusEventStore {
    async fn append(&self, event: &StatusEvent) -> Result<(), DomainError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(DomainError::database("status event store unavailable"));
        }
        self.events.write().await.push(event.clone());
        Ok(())
    }

    async fn history(&self, complaint_id: &ComplaintId) -> Result<Vec<StatusEvent>, DomainError> {
        self.check_reads()?;
        let events = self.events.read().await;
        // Reverse insertion order first so equal timestamps keep newest-appended on top.
        let mut history: Vec<StatusEvent> = events
            .iter()
            .rev()
            .filter(|e| e.complaint_id() == complaint_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(history)
    }

    async fn latest_matching(
        &self,
        complaint_id: &ComplaintId,
        status: ComplaintStatus,
        actor: &UserId,
        since: Timestamp,
    ) -> Result<Option<StatusEvent>, DomainError> {
        self.check_reads()?;
        let events = self.events.read().await;
        // max_by_key keeps the last maximum, so ties resolve to the newest append
        Ok(events
            .iter()
            .filter(|e| {
                e.complaint_id() == complaint_id
                    && e.status() == status
                    && e.actor_id() == Some(actor)
                    && !e.created_at().is_before(&since)
            })
            .max_by_key(|e| *e.created_at())
            .cloned())
    }
}
