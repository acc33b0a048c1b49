//! ListComplaintsHandler - Query handler for the paginated complaint lists.
//!
//! Three lists share the handler: a customer's own filings, the claimable
//! pool, and a technician's assigned queue.

use std::sync::Arc;

use crate::domain::complaint::{ComplaintError, ComplaintStatus};
use crate::domain::foundation::{AuthenticatedUser, Role};
use crate::ports::{ComplaintPage, ComplaintRepository, ListOptions};

/// Which list to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Complaints the actor filed.
    Mine,
    /// The unassigned pool.
    Ready,
    /// Complaints assigned to the actor. Requires a status filter.
    Assigned,
}

/// Statuses a technician queue can be filtered to.
pub const QUEUE_STATUSES: [ComplaintStatus; 3] = [
    ComplaintStatus::Assigned,
    ComplaintStatus::Pending,
    ComplaintStatus::Completed,
];

/// Pagination limits applied to every list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListComplaintsQuery {
    pub actor: AuthenticatedUser,
    pub scope: ListScope,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Raw status filter as received.
    pub status: Option<String>,
    pub category: Option<String>,
}

impl ListComplaintsQuery {
    pub fn new(actor: AuthenticatedUser, scope: ListScope) -> Self {
        Self {
            actor,
            scope,
            page: None,
            page_size: None,
            status: None,
            category: None,
        }
    }

    pub fn page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

pub struct ListComplaintsHandler {
    complaints: Arc<dyn ComplaintRepository>,
    limits: PageLimits,
}

impl ListComplaintsHandler {
    pub fn new(complaints: Arc<dyn ComplaintRepository>, limits: PageLimits) -> Self {
        Self { complaints, limits }
    }

    pub async fn handle(&self, query: ListComplaintsQuery) -> Result<ComplaintPage, ComplaintError> {
        let status = query
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<ComplaintStatus>()
                    .map_err(|_| ComplaintError::InvalidStatus(s.to_string()))
            })
            .transpose()?;

        let options = self.to_list_options(&query, status);
        let actor = &query.actor;

        match query.scope {
            ListScope::Mine => Ok(self.complaints.find_by_owner(&actor.id, &options).await?),
            ListScope::Ready => {
                if !actor.role.is_staff() {
                    return Err(ComplaintError::forbidden("only staff can view the pool"));
                }
                Ok(self.complaints.find_unassigned(&options).await?)
            }
            ListScope::Assigned => {
                if actor.role != Role::Technician {
                    return Err(ComplaintError::forbidden("only technicians have a queue"));
                }
                match status {
                    Some(s) if QUEUE_STATUSES.contains(&s) => {}
                    Some(s) => return Err(ComplaintError::InvalidStatus(s.to_string())),
                    None => return Err(ComplaintError::InvalidStatus("missing".to_string())),
                }
                Ok(self.complaints.find_by_assignee(&actor.id, &options).await?)
            }
        }
    }

    fn to_list_options(
        &self,
        query: &ListComplaintsQuery,
        status: Option<ComplaintStatus>,
    ) -> ListOptions {
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query
            .page_size
            .unwrap_or(self.limits.default_page_size)
            .clamp(1, self.limits.max_page_size.max(1));

        let mut options = ListOptions::paginated(page, page_size);
        if let Some(status) = status {
            options = options.with_status(status);
        }
        if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
            options = options.with_category(category);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryComplaintRepository;
    use crate::domain::complaint::{Complaint, ComplaintDraft, ErrorKind};
    use crate::domain::foundation::{ComplaintId, Timestamp, UserId};

    fn user(id: &str, role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(id).unwrap(), id, None, role)
    }

    async fn seeded(count: u64) -> Arc<InMemoryComplaintRepository> {
        let repo = Arc::new(InMemoryComplaintRepository::new());
        for n in 0..count {
            let complaint = Complaint::file(
                ComplaintId::new(),
                UserId::new("cust-1").unwrap(),
                ComplaintDraft {
                    title: format!("Issue {}", n),
                    category: if n % 2 == 0 { "network" } else { "billing" }.to_string(),
                    ..Default::default()
                },
                Timestamp::from_unix_secs(1_000 + n),
            )
            .unwrap();
            repo.create(&complaint).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn page_zero_reads_as_first_page_and_size_is_clamped() {
        let repo = seeded(5).await;
        let handler = ListComplaintsHandler::new(repo, PageLimits { default_page_size: 2, max_page_size: 3 });

        let page = handler
            .handle(ListComplaintsQuery::new(user("cust-1", Role::Customer), ListScope::Mine).page(0, 50))
            .await
            .unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 3);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.items[0].title(), "Issue 4");
    }

    #[tokio::test]
    async fn default_page_size_applies() {
        let repo = seeded(5).await;
        let handler = ListComplaintsHandler::new(repo, PageLimits { default_page_size: 2, max_page_size: 3 });
        let page = handler
            .handle(ListComplaintsQuery::new(user("cust-1", Role::Customer), ListScope::Mine))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
    }

    #[tokio::test]
    async fn category_and_status_filters() {
        let repo = seeded(5).await;
        let handler = ListComplaintsHandler::new(repo, PageLimits::default());

        let network = handler
            .handle(
                ListComplaintsQuery::new(user("cust-1", Role::Customer), ListScope::Mine)
                    .with_category("network")
                    .with_status("filed"),
            )
            .await
            .unwrap();
        assert_eq!(network.total, 3);

        let err = handler
            .handle(ListComplaintsQuery::new(user("cust-1", Role::Customer), ListScope::Mine).with_status("open"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidStatus);
    }

    #[tokio::test]
    async fn pool_is_staff_only() {
        let repo = seeded(2).await;
        let handler = ListComplaintsHandler::new(repo, PageLimits::default());

        let pool = handler
            .handle(ListComplaintsQuery::new(user("tech-1", Role::Technician), ListScope::Ready))
            .await
            .unwrap();
        assert_eq!(pool.total, 2);

        let err = handler
            .handle(ListComplaintsQuery::new(user("cust-1", Role::Customer), ListScope::Ready))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn queue_requires_technician_and_queue_status() {
        let repo = seeded(1).await;
        let handler = ListComplaintsHandler::new(repo, PageLimits::default());

        let empty = handler
            .handle(
                ListComplaintsQuery::new(user("tech-1", Role::Technician), ListScope::Assigned)
                    .with_status("pending"),
            )
            .await
            .unwrap();
        assert_eq!(empty.total, 0);

        let err = handler
            .handle(
                ListComplaintsQuery::new(user("tech-1", Role::Technician), ListScope::Assigned)
                    .with_status("filed"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidStatus);

        let err = handler
            .handle(
                ListComplaintsQuery::new(user("admin-1", Role::Admin), ListScope::Assigned)
                    .with_status("pending"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }
}
