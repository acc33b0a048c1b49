//! HTTP DTOs for complaint endpoints.
//!
//! These types are the JSON boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::application::HistoryEntry;
use crate::domain::complaint::{Complaint, ComplaintDraft, ComplaintStatus, ServiceLocation, StatusEvent};
use crate::domain::foundation::Timestamp;
use crate::ports::{ComplaintPage, PublicProfile};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/complaints`.
#[derive(Debug, Clone, Deserialize)]
pub struct FileComplaintRequest {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<LocationRequest>,
}

/// Service location; every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LocationRequest {
    pub address: String,
    pub city: String,
    pub district: String,
    pub contact_phone: String,
    pub notes: String,
}

impl From<FileComplaintRequest> for ComplaintDraft {
    fn from(req: FileComplaintRequest) -> Self {
        let location = req.location.unwrap_or_default();
        ComplaintDraft {
            title: req.title,
            category: req.category,
            description: req.description,
            location: ServiceLocation {
                address: location.address,
                city: location.city,
                district: location.district,
                contact_phone: location.contact_phone,
                notes: location.notes,
            },
        }
    }
}

/// Body of the status transition endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionStatusRequest {
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub resolution_notes: Option<String>,
}

/// Query string of the list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub category: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

fn rfc3339(ts: &Timestamp) -> String {
    ts.as_datetime().to_rfc3339()
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationResponse {
    pub address: String,
    pub city: String,
    pub district: String,
    pub contact_phone: String,
    pub notes: String,
}

/// Full complaint view.
#[derive(Debug, Clone, Serialize)]
pub struct ComplaintResponse {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub location: LocationResponse,
    pub status: ComplaintStatus,
    pub assignee_id: Option<String>,
    pub resolution_notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Complaint> for ComplaintResponse {
    fn from(c: &Complaint) -> Self {
        let location = c.location();
        Self {
            id: c.id().to_string(),
            owner_id: c.owner_id().to_string(),
            title: c.title().to_string(),
            category: c.category().to_string(),
            description: c.description().to_string(),
            location: LocationResponse {
                address: location.address.clone(),
                city: location.city.clone(),
                district: location.district.clone(),
                contact_phone: location.contact_phone.clone(),
                notes: location.notes.clone(),
            },
            status: c.status(),
            assignee_id: c.assignee_id().map(|id| id.to_string()),
            resolution_notes: c.resolution_notes().map(str::to_string),
            created_at: rfc3339(c.created_at()),
            updated_at: rfc3339(c.updated_at()),
        }
    }
}

/// One page of complaints.
#[derive(Debug, Clone, Serialize)]
pub struct ComplaintPageResponse {
    pub items: Vec<ComplaintResponse>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl From<ComplaintPage> for ComplaintPageResponse {
    fn from(page: ComplaintPage) -> Self {
        Self {
            total_pages: page.total_pages(),
            items: page.items.iter().map(ComplaintResponse::from).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
        }
    }
}

/// Audit entry without actor annotation.
#[derive(Debug, Clone, Serialize)]
pub struct StatusEventResponse {
    pub id: String,
    pub status: ComplaintStatus,
    pub actor_id: Option<String>,
    pub reason: String,
    pub created_at: String,
}

impl From<&StatusEvent> for StatusEventResponse {
    fn from(event: &StatusEvent) -> Self {
        Self {
            id: event.id().to_string(),
            status: event.status(),
            actor_id: event.actor_id().map(|id| id.to_string()),
            reason: event.reason().to_string(),
            created_at: rfc3339(event.created_at()),
        }
    }
}

/// Public identity of the user behind an audit entry.
#[derive(Debug, Clone, Serialize)]
pub struct ActorResponse {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
}

impl From<PublicProfile> for ActorResponse {
    fn from(profile: PublicProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username,
            display_name: profile.display_name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntryResponse {
    #[serde(flatten)]
    pub event: StatusEventResponse,
    pub actor: Option<ActorResponse>,
}

impl From<HistoryEntry> for HistoryEntryResponse {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            event: StatusEventResponse::from(&entry.event),
            actor: entry.actor.map(ActorResponse::from),
        }
    }
}

/// Updated complaint plus its refreshed audit trail.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionStatusResponse {
    pub complaint: ComplaintResponse,
    pub history: Vec<StatusEventResponse>,
}

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
