//! HTTP handlers for technician endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;

use crate::application::{ClaimComplaintCommand, GetTechnicianDashboardQuery, ListScope};
use crate::domain::complaint::{ComplaintError, ComplaintStatus};

use super::super::complaint::dto::{ComplaintPageResponse, ComplaintResponse, ListParams};
use super::super::complaint::handlers::{list_query, parse_complaint_id};
use super::super::complaint::{ComplaintApiError, ComplaintAppState};
use super::super::middleware::RequireAuth;
use super::dto::DashboardResponse;

/// Path segment of a technician queue to the status it lists.
///
/// `progress` is the wire name for `assigned`.
pub fn queue_status(queue: &str) -> Option<ComplaintStatus> {
    match queue {
        "progress" => Some(ComplaintStatus::Assigned),
        "pending" => Some(ComplaintStatus::Pending),
        "completed" => Some(ComplaintStatus::Completed),
        _ => None,
    }
}

/// GET /api/technician/dashboard
pub async fn get_dashboard(
    State(state): State<ComplaintAppState>,
    RequireAuth(actor): RequireAuth,
) -> Result<impl IntoResponse, ComplaintApiError> {
    let counts = state
        .dashboard_handler()
        .handle(GetTechnicianDashboardQuery { actor })
        .await?;
    Ok(Json(DashboardResponse::from(counts)))
}

/// GET /api/technician/complaints/ready - The claimable pool
pub async fn list_ready(
    State(state): State<ComplaintAppState>,
    RequireAuth(actor): RequireAuth,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ComplaintApiError> {
    let params = ListParams {
        status: None,
        ..params
    };
    let page = state
        .list_handler()
        .handle(list_query(actor, ListScope::Ready, params))
        .await?;
    Ok(Json(ComplaintPageResponse::from(page)))
}

/// GET /api/technician/complaints/:queue - progress | pending | completed
pub async fn list_queue(
    State(state): State<ComplaintAppState>,
    RequireAuth(actor): RequireAuth,
    Path(queue): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ComplaintApiError> {
    let status = queue_status(&queue).ok_or_else(|| ComplaintError::InvalidStatus(queue.clone()))?;
    let params = ListParams {
        status: Some(status.to_string()),
        ..params
    };
    let page = state
        .list_handler()
        .handle(list_query(actor, ListScope::Assigned, params))
        .await?;
    Ok(Json(ComplaintPageResponse::from(page)))
}

/// PATCH /api/technician/complaints/:id/claim
pub async fn claim_complaint(
    State(state): State<ComplaintAppState>,
    RequireAuth(actor): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ComplaintApiError> {
    let cmd = ClaimComplaintCommand {
        actor,
        complaint_id: parse_complaint_id(&id)?,
    };
    let complaint = state.claim_handler().handle(cmd).await?;
    Ok(Json(ComplaintResponse::from(&complaint)))
}
