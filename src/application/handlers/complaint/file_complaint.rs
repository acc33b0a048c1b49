//! FileComplaintHandler - Command handler for filing a new complaint.

use std::sync::Arc;

use crate::domain::complaint::{Complaint, ComplaintDraft, ComplaintError, StatusEvent};
use crate::domain::foundation::{AuthenticatedUser, ComplaintId, Role};
use crate::ports::{Clock, ComplaintRepository, StatusEventStore};

use super::audit::append_or_reconcile;

/// Command to file a complaint.
#[derive(Debug, Clone)]
pub struct FileComplaintCommand {
    pub actor: AuthenticatedUser,
    pub draft: ComplaintDraft,
}

/// Handler for filing complaints.
pub struct FileComplaintHandler {
    complaints: Arc<dyn ComplaintRepository>,
    events: Arc<dyn StatusEventStore>,
    clock: Arc<dyn Clock>,
}

impl FileComplaintHandler {
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

    pub async fn handle(&self, cmd: FileComplaintCommand) -> Result<Complaint, ComplaintError> {
        if cmd.actor.role != Role::Customer {
            return Err(ComplaintError::forbidden("only customers can file complaints"));
        }

        let now = self.clock.now();
        let complaint = Complaint::file(ComplaintId::new(), cmd.actor.id.clone(), cmd.draft, now)?;

        self.complaints.create(&complaint).await?;
        append_or_reconcile(self.events.as_ref(), &StatusEvent::filed(*complaint.id(), now)).await;

        tracing::info!(
            complaint_id = %complaint.id(),
            owner = %complaint.owner_id(),
            category = complaint.category(),
            "complaint filed"
        );

        Ok(complaint)
    }
}
