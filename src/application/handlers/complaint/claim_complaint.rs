//! ClaimComplaintHandler - the single-claim assignment protocol.
//!
//! The pre-read only picks the right error for the common cases. Exclusivity
//! comes from `ComplaintRepository::claim`, a conditional write that matches
//! for exactly one concurrent caller.

use std::sync::Arc;

use crate::domain::complaint::{Complaint, ComplaintError, ComplaintStatus, StatusEvent};
use crate::domain::foundation::{AuthenticatedUser, ComplaintId, Role};
use crate::ports::{ClaimOutcome, Clock, ComplaintRepository, StatusEventStore};

use super::audit::append_or_reconcile;

/// Command to claim a complaint from the pool.
#[derive(Debug, Clone)]
pub struct ClaimComplaintCommand {
    pub actor: AuthenticatedUser,
    pub complaint_id: ComplaintId,
}

/// Handler for claiming complaints.
pub struct ClaimComplaintHandler {
    complaints: Arc<dyn ComplaintRepository>,
    events: Arc<dyn StatusEventStore>,
    clock: Arc<dyn Clock>,
}

impl ClaimComplaintHandler {
    pub fn new(
        complaints: Arc<dyn ComplaintRepository>,
        events: Arc<dyn StatusEventStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            complaints,
            events,
            clock,
        }
    }

    pub async fn handle(&self, cmd: ClaimComplaintCommand) -> Result<Complaint, ComplaintError> {
        if cmd.actor.role != Role::Technician {
            return Err(ComplaintError::forbidden("only technicians can claim complaints"));
        }
        let technician = &cmd.actor.id;

        let current = self
            .complaints
            .find_by_id(&cmd.complaint_id)
            .await?
            .ok_or(ComplaintError::NotFound(cmd.complaint_id))?;

        if current.status() != ComplaintStatus::Filed {
            return Err(ComplaintError::AlreadyInProgress);
        }
        if current.assignee_id().is_some() {
            return Err(ComplaintError::AlreadyClaimed);
        }

        let now = self.clock.now();
        match self.complaints.claim(&cmd.complaint_id, technician, now).await? {
            ClaimOutcome::Claimed(complaint) => {
                append_or_reconcile(
                    self.events.as_ref(),
                    &StatusEvent::claimed(cmd.complaint_id, technician.clone(), now),
                )
                .await;

                tracing::info!(
                    complaint_id = %cmd.complaint_id,
                    technician = %technician,
                    "complaint claimed"
                );
                Ok(complaint)
            }
            ClaimOutcome::Lost(winner) => {
                tracing::warn!(
                    complaint_id = %cmd.complaint_id,
                    technician = %technician,
                    holder = ?winner.assignee_id().map(|a| a.as_str()),
                    "claim lost to a concurrent claimant"
                );
                Err(ComplaintError::AlreadyClaimed)
            }
            ClaimOutcome::Missing => Err(ComplaintError::NotFound(cmd.complaint_id)),
        }
    }
}
