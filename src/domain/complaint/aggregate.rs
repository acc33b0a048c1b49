//! Complaint aggregate entity.
//!
//! A complaint is one service issue filed by a customer. It is mutated only
//! through the claim protocol and the lifecycle state machine, and never
//! deleted: it ends in `completed` or `rejected` instead.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ComplaintId, Timestamp, UserId, ValidationError};

use super::ComplaintStatus;

/// Maximum length for complaint title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for complaint category.
pub const MAX_CATEGORY_LENGTH: usize = 100;

/// Where the technician has to go. All fields are free text and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLocation {
    pub address: String,
    pub city: String,
    pub district: String,
    pub contact_phone: String,
    pub notes: String,
}

/// Customer input for a new complaint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintDraft {
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub location: ServiceLocation,
}

/// Partial field update applied through `ComplaintRepository::update`.
///
/// There is deliberately no way to express a change to `created_at`, the
/// owner, or the free-text fields. `assignee_id` can only be set, never
/// cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintUpdate {
    pub status: Option<ComplaintStatus>,
    pub assignee_id: Option<UserId>,
    pub resolution_notes: Option<String>,
    pub updated_at: Timestamp,
}

impl ComplaintUpdate {
    /// An update that only refreshes `updated_at`.
    pub fn touch(at: Timestamp) -> Self {
        Self {
            status: None,
            assignee_id: None,
            resolution_notes: None,
            updated_at: at,
        }
    }

    pub fn with_status(mut self, status: ComplaintStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee_id = Some(assignee);
        self
    }

    pub fn with_resolution_notes(mut self, notes: impl Into<String>) -> Self {
        self.resolution_notes = Some(notes.into());
        self
    }
}

/// Complaint aggregate.
///
/// # Invariants
///
/// - `assignee_id` is `None` iff `status` is `Filed`
/// - `resolution_notes` is `Some` only when `status` is `Completed`
/// - every update refreshes `updated_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    id: ComplaintId,
    owner_id: UserId,
    title: String,
    category: String,
    description: String,
    location: ServiceLocation,
    status: ComplaintStatus,
    assignee_id: Option<UserId>,
    resolution_notes: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Complaint {
    /// File a new complaint into the unassigned pool.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if title or category is blank
    /// - `TooLong` if title or category exceeds its limit
    pub fn file(
        id: ComplaintId,
        owner_id: UserId,
        draft: ComplaintDraft,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let title = validate_text("title", &draft.title, MAX_TITLE_LENGTH)?;
        let category = validate_text("category", &draft.category, MAX_CATEGORY_LENGTH)?;

        Ok(Self {
            id,
            owner_id,
            title,
            category,
            description: draft.description.unwrap_or_default(),
            location: draft.location,
            status: ComplaintStatus::Filed,
            assignee_id: None,
            resolution_notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a complaint from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ComplaintId,
        owner_id: UserId,
        title: String,
        category: String,
        description: String,
        location: ServiceLocation,
        status: ComplaintStatus,
        assignee_id: Option<UserId>,
        resolution_notes: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            title,
            category,
            description,
            location,
            status,
            assignee_id,
            resolution_notes,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ComplaintId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &ServiceLocation {
        &self.location
    }

    pub fn status(&self) -> ComplaintStatus {
        self.status
    }

    pub fn assignee_id(&self) -> Option<&UserId> {
        self.assignee_id.as_ref()
    }

    pub fn resolution_notes(&self) -> Option<&str> {
        self.resolution_notes.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// True while the complaint can be claimed.
    pub fn is_claimable(&self) -> bool {
        self.status == ComplaintStatus::Filed && self.assignee_id.is_none()
    }

    /// A completed complaint with a recorded resolution accepts no further changes.
    pub fn is_finalized(&self) -> bool {
        self.status == ComplaintStatus::Completed && self.resolution_notes.is_some()
    }

    /// True when another technician holds the claim.
    pub fn is_claimed_by_other(&self, user_id: &UserId) -> bool {
        matches!(&self.assignee_id, Some(assignee) if assignee != user_id)
    }

    /// Checks the aggregate invariants. Used by adapters' tests and debug assertions.
    pub fn invariants_hold(&self) -> bool {
        let assignee_matches_pool = self.assignee_id.is_none() == self.status.is_unassigned();
        let notes_only_when_completed =
            self.resolution_notes.is_none() || self.status == ComplaintStatus::Completed;
        assignee_matches_pool && notes_only_when_completed && !self.updated_at.is_before(&self.created_at)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a partial update. Storage adapters call this after their own checks.
    pub fn apply(&mut self, update: ComplaintUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(assignee) = update.assignee_id {
            self.assignee_id = Some(assignee);
        }
        if let Some(notes) = update.resolution_notes {
            self.resolution_notes = Some(notes);
        }
        self.updated_at = update.updated_at;
    }
}

fn validate_text(field: &str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let len = trimmed.chars().count();
    if len > max {
        return Err(ValidationError::too_long(field, max, len));
    }
    Ok(trimmed.to_string())
}
