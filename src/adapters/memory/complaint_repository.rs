//! In-memory complaint repository.
//!
//! Backs tests and local development. Each conditional write (claim and
//! `update_if`) checks and writes under one write-lock acquisition, which
//! gives the same guarantee as the conditional UPDATEs in Postgres.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::complaint::{Complaint, ComplaintStatus, ComplaintUpdate};
use crate::domain::foundation::{ComplaintId, DomainError, Timestamp, UserId};
use crate::ports::{
    ClaimOutcome, ComplaintPage, ComplaintRepository, ExpectedState, ListOptions, UpdateOutcome,
};

#[derive(Debug, Clone, Default)]
pub struct InMemoryComplaintRepository {
    complaints: Arc<RwLock<HashMap<ComplaintId, Complaint>>>,
}

impl InMemoryComplaintRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored complaints.
    pub async fn len(&self) -> usize {
        self.complaints.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.complaints.read().await.is_empty()
    }

    async fn page_where<F>(&self, options: &ListOptions, keep: F) -> ComplaintPage
    where
        F: Fn(&Complaint) -> bool,
    {
        let complaints = self.complaints.read().await;
        let mut matching: Vec<&Complaint> = complaints.values().filter(|c| keep(*c)).collect();
        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(a.created_at())
                .then_with(|| b.id().as_uuid().cmp(a.id().as_uuid()))
        });

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(options.offset() as usize)
            .take(options.limit() as usize)
            .cloned()
            .collect();

        ComplaintPage {
            items,
            total,
            page: options.page.max(1),
            page_size: options.limit(),
        }
    }

    async fn count_where<F>(&self, keep: F) -> u64
    where
        F: Fn(&Complaint) -> bool,
    {
        self.complaints
            .read()
            .await
            .values()
            .filter(|c| keep(*c))
            .count() as u64
    }
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn create(&self, complaint: &Complaint) -> Result<(), DomainError> {
        let mut complaints = self.complaints.write().await;
        if complaints.contains_key(complaint.id()) {
            return Err(DomainError::database("duplicate complaint id")
                .with_detail("complaint_id", complaint.id().to_string()));
        }
        complaints.insert(*complaint.id(), complaint.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ComplaintId) -> Result<Option<Complaint>, DomainError> {
        Ok(self.complaints.read().await.get(id).cloned())
    }

    async fn update_if(
        &self,
        id: &ComplaintId,
        expected: &ExpectedState,
        update: ComplaintUpdate,
    ) -> Result<UpdateOutcome, DomainError> {
        let mut complaints = self.complaints.write().await;
        let Some(complaint) = complaints.get_mut(id) else {
            return Ok(UpdateOutcome::Missing);
        };
        if !expected.matches(complaint) {
            return Ok(UpdateOutcome::Stale(complaint.clone()));
        }
        complaint.apply(update);
        Ok(UpdateOutcome::Applied(complaint.clone()))
    }

    async fn claim(
        &self,
        id: &ComplaintId,
        technician: &UserId,
        at: Timestamp,
    ) -> Result<ClaimOutcome, DomainError> {
        let mut complaints = self.complaints.write().await;
        let Some(complaint) = complaints.get_mut(id) else {
            return Ok(ClaimOutcome::Missing);
        };

        if !complaint.is_claimable() {
            return Ok(ClaimOutcome::Lost(complaint.clone()));
        }

        complaint.apply(
            ComplaintUpdate::touch(at)
                .with_status(ComplaintStatus::Assigned)
                .with_assignee(technician.clone()),
        );
        Ok(ClaimOutcome::Claimed(complaint.clone()))
    }

    async fn find_by_owner(
        &self,
        owner: &UserId,
        options: &ListOptions,
    ) -> Result<ComplaintPage, DomainError> {
        Ok(self
            .page_where(options, |c| c.is_owner(owner) && options.matches(c))
            .await)
    }

    async fn find_by_assignee(
        &self,
        technician: &UserId,
        options: &ListOptions,
    ) -> Result<ComplaintPage, DomainError> {
        Ok(self
            .page_where(options, |c| {
                c.assignee_id() == Some(technician) && options.matches(c)
            })
            .await)
    }

    async fn find_unassigned(&self, options: &ListOptions) -> Result<ComplaintPage, DomainError> {
        let category = options.category.as_deref();
        Ok(self
            .page_where(options, |c| {
                c.is_claimable() && category.map_or(true, |cat| c.category() == cat)
            })
            .await)
    }

    async fn count_by_owner(
        &self,
        owner: &UserId,
        status: Option<ComplaintStatus>,
    ) -> Result<u64, DomainError> {
        Ok(self
            .count_where(|c| c.is_owner(owner) && status.map_or(true, |s| c.status() == s))
            .await)
    }

    async fn count_by_assignee(
        &self,
        technician: &UserId,
        status: Option<ComplaintStatus>,
    ) -> Result<u64, DomainError> {
        Ok(self
            .count_where(|c| {
                c.assignee_id() == Some(technician) && status.map_or(true, |s| c.status() == s)
            })
            .await)
    }

    async fn count_unassigned(&self) -> Result<u64, DomainError> {
        Ok(self.count_where(Complaint::is_claimable).await)
    }
}
