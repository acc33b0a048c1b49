//! DuplicateSubmissionGuard - rejects rapid-fire repeats of a status update.

use std::sync::Arc;

use crate::domain::complaint::{ComplaintStatus, DuplicateRule};
use crate::domain::foundation::{ComplaintId, DomainError, UserId};
use crate::ports::{Clock, StatusEventStore};

/// Looks up the latest matching audit entry and applies `DuplicateRule`.
///
/// Reads only; holds no lock between this check and the caller's write.
pub struct DuplicateSubmissionGuard {
    events: Arc<dyn StatusEventStore>,
    clock: Arc<dyn Clock>,
    rule: DuplicateRule,
}

impl DuplicateSubmissionGuard {
    pub fn new(
        events: Arc<dyn StatusEventStore>,
        clock: Arc<dyn Clock>,
        rule: DuplicateRule,
    ) -> Self {
        Self { events, clock, rule }
    }

    /// `reason` must already have the default applied.
    pub async fn is_duplicate(
        &self,
        complaint_id: &ComplaintId,
        status: ComplaintStatus,
        actor: &UserId,
        reason: &str,
        resolution_notes: Option<&str>,
    ) -> Result<bool, DomainError> {
        let now = self.clock.now();
        let prior = self
            .events
            .latest_matching(complaint_id, status, actor, self.rule.window_start(now))
            .await?;

        Ok(prior.is_some_and(|event| self.rule.is_repeat(&event, reason, resolution_notes, now)))
    }
}
