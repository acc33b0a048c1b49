//! StatusEvent - one immutable audit record of a status change.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ComplaintId, StatusEventId, Timestamp, UserId};

use super::ComplaintStatus;

/// Reason recorded when a customer files a complaint.
pub const FILED_REASON: &str = "complaint filed";

/// Reason recorded for every successful claim.
pub const CLAIM_REASON: &str = "claimed by technician";

/// Reason used when a transition request carries none.
pub fn default_reason(status: ComplaintStatus) -> String {
    format!("status changed to {}", status)
}

/// Audit trail entry.
///
/// There are no setters: once built an event is only ever appended and read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    id: StatusEventId,
    complaint_id: ComplaintId,
    status: ComplaintStatus,
    actor_id: Option<UserId>,
    reason: String,
    created_at: Timestamp,
}

impl StatusEvent {
    pub fn new(
        complaint_id: ComplaintId,
        status: ComplaintStatus,
        actor_id: Option<UserId>,
        reason: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: StatusEventId::new(),
            complaint_id,
            status,
            actor_id,
            reason: reason.into(),
            created_at,
        }
    }

    /// The event written alongside a newly filed complaint.
    pub fn filed(complaint_id: ComplaintId, at: Timestamp) -> Self {
        Self::new(complaint_id, ComplaintStatus::Filed, None, FILED_REASON, at)
    }

    /// The event written for a successful claim.
    pub fn claimed(complaint_id: ComplaintId, technician: UserId, at: Timestamp) -> Self {
        Self::new(
            complaint_id,
            ComplaintStatus::Assigned,
            Some(technician),
            CLAIM_REASON,
            at,
        )
    }

    /// Reconstitute from persistence.
    pub fn reconstitute(
        id: StatusEventId,
        complaint_id: ComplaintId,
        status: ComplaintStatus,
        actor_id: Option<UserId>,
        reason: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            complaint_id,
            status,
            actor_id,
            reason,
            created_at,
        }
    }

    pub fn id(&self) -> &StatusEventId {
        &self.id
    }

    pub fn complaint_id(&self) -> &ComplaintId {
        &self.complaint_id
    }

    pub fn status(&self) -> ComplaintStatus {
        self.status
    }

    pub fn actor_id(&self) -> Option<&UserId> {
        self.actor_id.as_ref()
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
