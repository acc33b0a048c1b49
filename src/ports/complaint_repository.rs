//! Complaint repository port.
//!
//! Owns complaint records: creation, partial update, the conditional claim
//! write, and filtered/paginated/counted queries keyed by owner, assignee or
//! the unassigned pool.
//!
//! # Design
//!
//! - **Injected handle**: handlers receive an `Arc<dyn ComplaintRepository>`
//! - **Conditional writes**: `claim` and `update_if` are compare-and-swap
//!   primitives; implementations must not read-then-write
//! - **Offset pagination**: pages are 1-indexed, results newest first

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::complaint::{Complaint, ComplaintStatus, ComplaintUpdate};
use crate::domain::foundation::{ComplaintId, DomainError, Timestamp, UserId};

/// Repository port for complaint persistence.
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    /// Persist a newly filed complaint.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, complaint: &Complaint) -> Result<(), DomainError>;

    /// Find a complaint by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ComplaintId) -> Result<Option<Complaint>, DomainError>;

    /// Apply a partial update if the row still matches `expected`.
    ///
    /// Always stamps `updated_at` from the update. `created_at` cannot be
    /// expressed in a `ComplaintUpdate` and is never touched. The match and
    /// the write must be a single step.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn update_if(
        &self,
        id: &ComplaintId,
        expected: &ExpectedState,
        update: ComplaintUpdate,
    ) -> Result<UpdateOutcome, DomainError>;

    /// Atomically move a complaint from the pool to `technician`.
    ///
    /// The write only happens if the row is still `filed` with no assignee.
    /// Matching, writing and reporting must be a single step.
    async fn claim(
        &self,
        id: &ComplaintId,
        technician: &UserId,
        at: Timestamp,
    ) -> Result<ClaimOutcome, DomainError>;

    /// Complaints filed by `owner`.
    async fn find_by_owner(
        &self,
        owner: &UserId,
        options: &ListOptions,
    ) -> Result<ComplaintPage, DomainError>;

    /// Complaints assigned to `technician`.
    async fn find_by_assignee(
        &self,
        technician: &UserId,
        options: &ListOptions,
    ) -> Result<ComplaintPage, DomainError>;

    /// The claimable pool: `filed` and unassigned. Status filters are ignored.
    async fn find_unassigned(&self, options: &ListOptions) -> Result<ComplaintPage, DomainError>;

    /// Count complaints filed by `owner`, optionally by status.
    async fn count_by_owner(
        &self,
        owner: &UserId,
        status: Option<ComplaintStatus>,
    ) -> Result<u64, DomainError>;

    /// Count complaints assigned to `technician`, optionally by status.
    async fn count_by_assignee(
        &self,
        technician: &UserId,
        status: Option<ComplaintStatus>,
    ) -> Result<u64, DomainError>;

    /// Count the claimable pool.
    async fn count_unassigned(&self) -> Result<u64, DomainError>;
}

/// Result of a conditional claim write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// This caller's write matched; carries the updated complaint.
    Claimed(Complaint),
    /// The predicate no longer matched; carries the row as it is now.
    Lost(Complaint),
    /// No complaint with that ID.
    Missing,
}

/// The fields a status decision was made against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedState {
    pub status: ComplaintStatus,
    pub assignee_id: Option<UserId>,
    pub resolution_notes: Option<String>,
}

impl ExpectedState {
    /// Snapshot of `complaint` as it was read.
    pub fn of(complaint: &Complaint) -> Self {
        Self {
            status: complaint.status(),
            assignee_id: complaint.assignee_id().cloned(),
            resolution_notes: complaint.resolution_notes().map(str::to_string),
        }
    }

    pub fn matches(&self, complaint: &Complaint) -> bool {
        complaint.status() == self.status
            && complaint.assignee_id() == self.assignee_id.as_ref()
            && complaint.resolution_notes() == self.resolution_notes.as_deref()
    }
}

/// Result of a conditional update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The row matched and was written.
    Applied(Complaint),
    /// The row changed since it was read; carries it as it is now.
    Stale(Complaint),
    /// No complaint with that ID.
    Missing,
}

/// Filters and window for list queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// 1-indexed page number.
    pub page: u32,

    /// Rows per page.
    pub page_size: u32,

    /// Filter by status (None = all statuses).
    pub status: Option<ComplaintStatus>,

    /// Filter by exact category.
    pub category: Option<String>,
}

impl ListOptions {
    /// Create options for a paginated query. Page 0 is read as page 1 and
    /// the page size is at least 1.
    pub fn paginated(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            status: None,
            category: None,
        }
    }

    /// Filter to a specific status.
    pub fn with_status(mut self, status: ComplaintStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter to a specific category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.limit())
    }

    pub fn limit(&self) -> u32 {
        self.page_size.max(1)
    }

    /// True if `complaint` passes the status and category filters.
    pub fn matches(&self, complaint: &Complaint) -> bool {
        self.status.map_or(true, |s| complaint.status() == s)
            && self
                .category
                .as_deref()
                .map_or(true, |c| complaint.category() == c)
    }
}

/// One page of complaints plus the total matching count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintPage {
    pub items: Vec<Complaint>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl ComplaintPage {
    pub fn empty(options: &ListOptions) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: options.page.max(1),
            page_size: options.limit(),
        }
    }

    /// ceil(total / page_size).
    pub fn total_pages(&self) -> u64 {
        let size = u64::from(self.page_size.max(1));
        self.total.div_ceil(size)
    }
}
