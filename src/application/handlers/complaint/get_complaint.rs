//! GetComplaintHandler - Query handler for a single complaint.

use std::sync::Arc;

use crate::domain::complaint::{Complaint, ComplaintError};
use crate::domain::foundation::{AuthenticatedUser, ComplaintId};
use crate::ports::ComplaintRepository;

/// Query for one complaint.
#[derive(Debug, Clone)]
pub struct GetComplaintQuery {
    pub actor: AuthenticatedUser,
    pub complaint_id: ComplaintId,
}

/// Handler for complaint detail.
pub struct GetComplaintHandler {
    complaints: Arc<dyn ComplaintRepository>,
}

impl GetComplaintHandler {
    pub fn new(complaints: Arc<dyn ComplaintRepository>) -> Self {
        Self { complaints }
    }

    pub async fn handle(&self, query: GetComplaintQuery) -> Result<Complaint, ComplaintError> {
        let complaint = self
            .complaints
            .find_by_id(&query.complaint_id)
            .await?
            .ok_or(ComplaintError::NotFound(query.complaint_id))?;

        ensure_can_view(&query.actor, &complaint)?;
        Ok(complaint)
    }
}

/// Owners see their own complaints; staff see all of them.
pub(crate) fn ensure_can_view(
    actor: &AuthenticatedUser,
    complaint: &Complaint,
) -> Result<(), ComplaintError> {
    if actor.role.is_staff() || complaint.is_owner(&actor.id) {
        Ok(())
    } else {
        Err(ComplaintError::forbidden("not your complaint"))
    }
}
