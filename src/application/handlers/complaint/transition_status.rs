//! TransitionStatusHandler - Command handler for lifecycle status changes.
//!
//! Checks run in a fixed order and all of them happen before any write:
//!
//! 1. role (technician or admin)
//! 2. complaint exists
//! 3. requested status is recognized
//! 4. a technician may only touch an unassigned complaint or their own
//! 5. completed-with-resolution complaints are frozen
//! 6. duplicate-submission guard
//! 7. transition policy table
//!
//! Then the complaint is updated and one status event appended. The write is
//! conditional on the status, assignee and resolution the checks saw, so a
//! claim that lands in between is never overwritten.

use std::sync::Arc;

use crate::domain::complaint::{
    default_reason, Complaint, ComplaintError, ComplaintStatus, ComplaintUpdate, StatusEvent,
    TransitionPolicy,
};
use crate::domain::foundation::{AuthenticatedUser, ComplaintId, Role};
use crate::ports::{Clock, ComplaintRepository, ExpectedState, StatusEventStore, UpdateOutcome};

use super::audit::append_or_reconcile;
use super::DuplicateSubmissionGuard;

/// Command to move a complaint to a new status.
#[derive(Debug, Clone)]
pub struct TransitionStatusCommand {
    pub actor: AuthenticatedUser,
    pub complaint_id: ComplaintId,
    /// Raw status as received; parsed by the handler.
    pub status: String,
    pub reason: Option<String>,
    pub resolution_notes: Option<String>,
}

/// Updated complaint plus its full history, newest first.
#[derive(Debug, Clone)]
pub struct TransitionStatusResult {
    pub complaint: Complaint,
    pub history: Vec<StatusEvent>,
}

/// Handler for status transitions.
pub struct TransitionStatusHandler {
    complaints: Arc<dyn ComplaintRepository>,
    events: Arc<dyn StatusEventStore>,
    guard: DuplicateSubmissionGuard,
    clock: Arc<dyn Clock>,
}

impl TransitionStatusHandler {
    pub fn new(
        complaints: Arc<dyn ComplaintRepository>,
        events: Arc<dyn StatusEventStore>,
        guard: DuplicateSubmissionGuard,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            complaints,
            events,
            guard,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: TransitionStatusCommand,
    ) -> Result<TransitionStatusResult, ComplaintError> {
        let actor = &cmd.actor;
        if !actor.role.is_staff() {
            return Err(ComplaintError::forbidden(
                "only technicians and admins can change complaint status",
            ));
        }

        let complaint = self
            .complaints
            .find_by_id(&cmd.complaint_id)
            .await?
            .ok_or(ComplaintError::NotFound(cmd.complaint_id))?;

        let target: ComplaintStatus = cmd
            .status
            .parse()
            .map_err(|_| ComplaintError::InvalidStatus(cmd.status.clone()))?;

        if actor.role == Role::Technician && complaint.is_claimed_by_other(&actor.id) {
            return Err(ComplaintError::forbidden(
                "complaint is assigned to another technician",
            ));
        }

        if complaint.is_finalized() {
            return Err(ComplaintError::Finalized);
        }

        let reason = cmd
            .reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_reason(target));
        let notes = cmd
            .resolution_notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        if self
            .guard
            .is_duplicate(&cmd.complaint_id, target, &actor.id, &reason, notes)
            .await?
        {
            tracing::warn!(
                complaint_id = %cmd.complaint_id,
                actor = %actor.id,
                status = %target,
                "duplicate status submission rejected"
            );
            return Err(ComplaintError::DuplicateSubmission);
        }

        let from = complaint.status();
        if !TransitionPolicy::permits(actor.role, from, target) {
            return Err(ComplaintError::TransitionNotAllowed { from, to: target });
        }

        let now = self.clock.now();
        let mut update = ComplaintUpdate::touch(now).with_status(target);
        if actor.role == Role::Technician {
            update = update.with_assignee(actor.id.clone());
        }
        if target == ComplaintStatus::Completed {
            if let Some(notes) = notes {
                update = update.with_resolution_notes(notes);
            }
        }

        let updated = match self
            .complaints
            .update_if(&cmd.complaint_id, &ExpectedState::of(&complaint), update)
            .await?
        {
            UpdateOutcome::Applied(updated) => updated,
            UpdateOutcome::Stale(current) => {
                tracing::info!(
                    complaint_id = %cmd.complaint_id,
                    actor = %actor.id,
                    status = %current.status(),
                    "complaint changed before status update was written"
                );
                return Err(
                    if actor.role == Role::Technician && current.is_claimed_by_other(&actor.id) {
                        ComplaintError::AlreadyClaimed
                    } else {
                        ComplaintError::ConcurrentUpdate
                    },
                );
            }
            UpdateOutcome::Missing => return Err(ComplaintError::NotFound(cmd.complaint_id)),
        };
        append_or_reconcile(
            self.events.as_ref(),
            &StatusEvent::new(cmd.complaint_id, target, Some(actor.id.clone()), reason, now),
        )
        .await;

        tracing::info!(
            complaint_id = %cmd.complaint_id,
            actor = %actor.id,
            role = %actor.role,
            from = %from,
            to = %target,
            "complaint status changed"
        );

        let history = match self.events.history(&cmd.complaint_id).await {
            Ok(history) => history,
            Err(err) => {
                tracing::warn!(
                    complaint_id = %cmd.complaint_id,
                    error = %err,
                    "status history unavailable after transition"
                );
                Vec::new()
            }
        };

        Ok(TransitionStatusResult {
            complaint: updated,
            history,
        })
    }
}
