//! GetTechnicianDashboardHandler - counts for the technician landing page.

use std::sync::Arc;

use futures::future::try_join4;

use crate::domain::complaint::{ComplaintError, ComplaintStatus, DashboardCounts};
use crate::domain::foundation::{AuthenticatedUser, Role};
use crate::ports::ComplaintRepository;

#[derive(Debug, Clone)]
pub struct GetTechnicianDashboardQuery {
    pub actor: AuthenticatedUser,
}

/// Recomputes every count on each call. Nothing is cached.
pub struct GetTechnicianDashboardHandler {
    complaints: Arc<dyn ComplaintRepository>,
}

impl GetTechnicianDashboardHandler {
    pub fn new(complaints: Arc<dyn ComplaintRepository>) -> Self {
        Self { complaints }
    }

    pub async fn handle(
        &self,
        query: GetTechnicianDashboardQuery,
    ) -> Result<DashboardCounts, ComplaintError> {
        if query.actor.role != Role::Technician {
            return Err(ComplaintError::forbidden("dashboard is for technicians"));
        }
        let technician = &query.actor.id;

        let (ready, in_progress, completed, pending) = try_join4(
            self.complaints.count_unassigned(),
            self.complaints
                .count_by_assignee(technician, Some(ComplaintStatus::Assigned)),
            self.complaints
                .count_by_assignee(technician, Some(ComplaintStatus::Completed)),
            self.complaints
                .count_by_assignee(technician, Some(ComplaintStatus::Pending)),
        )
        .await?;

        Ok(DashboardCounts::new(ready, in_progress, completed, pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryComplaintRepository;
    use crate::domain::complaint::{Complaint, ComplaintDraft, ComplaintUpdate, ErrorKind};
    use crate::domain::foundation::{ComplaintId, Timestamp, UserId};
    use crate::ports::ExpectedState;

    async fn file(repo: &InMemoryComplaintRepository) -> Complaint {
        let complaint = Complaint::file(
            ComplaintId::new(),
            UserId::new("cust-1").unwrap(),
            ComplaintDraft {
                title: "Outage".to_string(),
                category: "network".to_string(),
                ..Default::default()
            },
            Timestamp::now(),
        )
        .unwrap();
        repo.create(&complaint).await.unwrap();
        complaint
    }

    async fn assign(repo: &InMemoryComplaintRepository, tech: &str, status: ComplaintStatus) {
        let complaint = file(repo).await;
        repo.update_if(
            complaint.id(),
            &ExpectedState::of(&complaint),
            ComplaintUpdate::touch(Timestamp::now())
                .with_status(status)
                .with_assignee(UserId::new(tech).unwrap()),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn ready_is_global_and_the_rest_are_scoped() {
        let repo = Arc::new(InMemoryComplaintRepository::new());
        for _ in 0..5 {
            file(&repo).await;
        }
        assign(&repo, "tech-1", ComplaintStatus::Assigned).await;
        assign(&repo, "tech-1", ComplaintStatus::Assigned).await;
        assign(&repo, "tech-1", ComplaintStatus::Completed).await;
        assign(&repo, "tech-2", ComplaintStatus::Pending).await;

        let handler = GetTechnicianDashboardHandler::new(repo);
        let actor = AuthenticatedUser::new(UserId::new("tech-1").unwrap(), "t", None, Role::Technician);
        let counts = handler.handle(GetTechnicianDashboardQuery { actor }).await.unwrap();

        assert_eq!(counts, DashboardCounts::new(5, 2, 1, 0));
        assert_eq!(counts.total_assigned, 3);
    }

    #[tokio::test]
    async fn customers_have_no_dashboard() {
        let handler = GetTechnicianDashboardHandler::new(Arc::new(InMemoryComplaintRepository::new()));
        let actor = AuthenticatedUser::new(UserId::new("c").unwrap(), "c", None, Role::Customer);
        let err = handler.handle(GetTechnicianDashboardQuery { actor }).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }
}
