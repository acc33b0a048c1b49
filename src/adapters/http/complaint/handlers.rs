//! HTTP handlers for complaint endpoints.
//!
//! These handlers connect axum routes to the application layer handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::{
    ClaimComplaintHandler, DuplicateSubmissionGuard, FileComplaintCommand, FileComplaintHandler,
    GetComplaintHandler, GetComplaintQuery, GetStatusHistoryHandler, GetStatusHistoryQuery,
    GetTechnicianDashboardHandler, ListComplaintsHandler, ListComplaintsQuery, ListScope,
    PageLimits, TransitionStatusCommand, TransitionStatusHandler,
};
use crate::domain::complaint::{ComplaintError, DuplicateRule, ErrorKind};
use crate::domain::foundation::{AuthenticatedUser, ComplaintId, ValidationError};
use crate::ports::{Clock, ComplaintRepository, StatusEventStore, UserDirectory};

use super::super::middleware::RequireAuth;
use super::dto::{
    ComplaintPageResponse, ComplaintResponse, ErrorResponse, FileComplaintRequest,
    HistoryEntryResponse, ListParams, StatusEventResponse, TransitionStatusRequest,
    TransitionStatusResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for complaint and technician endpoints.
///
/// Cloned per request; handlers are built on demand from the shared ports.
#[derive(Clone)]
pub struct ComplaintAppState {
    pub complaints: Arc<dyn ComplaintRepository>,
    pub events: Arc<dyn StatusEventStore>,
    pub users: Arc<dyn UserDirectory>,
    pub clock: Arc<dyn Clock>,
    pub duplicate_rule: DuplicateRule,
    pub page_limits: PageLimits,
}

impl ComplaintAppState {
    pub fn file_handler(&self) -> FileComplaintHandler {
        FileComplaintHandler::new(self.complaints.clone(), self.events.clone(), self.clock.clone())
    }

    pub fn claim_handler(&self) -> ClaimComplaintHandler {
        ClaimComplaintHandler::new(self.complaints.clone(), self.events.clone(), self.clock.clone())
    }

    pub fn transition_handler(&self) -> TransitionStatusHandler {
        let guard = DuplicateSubmissionGuard::new(
            self.events.clone(),
            self.clock.clone(),
            self.duplicate_rule,
        );
        TransitionStatusHandler::new(
            self.complaints.clone(),
            self.events.clone(),
            guard,
            self.clock.clone(),
        )
    }

    pub fn get_handler(&self) -> GetComplaintHandler {
        GetComplaintHandler::new(self.complaints.clone())
    }

    pub fn history_handler(&self) -> GetStatusHistoryHandler {
        GetStatusHistoryHandler::new(self.complaints.clone(), self.events.clone(), self.users.clone())
    }

    pub fn list_handler(&self) -> ListComplaintsHandler {
        ListComplaintsHandler::new(self.complaints.clone(), self.page_limits)
    }

    pub fn dashboard_handler(&self) -> GetTechnicianDashboardHandler {
        GetTechnicianDashboardHandler::new(self.complaints.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════════

pub(crate) fn parse_complaint_id(raw: &str) -> Result<ComplaintId, ComplaintApiError> {
    raw.parse().map_err(|_| {
        ComplaintError::from(ValidationError::invalid_format(
            "complaint_id",
            format!("'{}' is not a UUID", raw),
        ))
        .into()
    })
}

pub(crate) fn list_query(
    actor: AuthenticatedUser,
    scope: ListScope,
    params: ListParams,
) -> ListComplaintsQuery {
    let mut query = ListComplaintsQuery::new(actor, scope);
    query.page = params.page;
    query.page_size = params.limit;
    query.status = params.status;
    query.category = params.category;
    query
}

// ════════════════════════════════════════════════════════════════════════════════
// Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/complaints - File a new complaint
pub async fn file_complaint(
    State(state): State<ComplaintAppState>,
    RequireAuth(actor): RequireAuth,
    Json(request): Json<FileComplaintRequest>,
) -> Result<impl IntoResponse, ComplaintApiError> {
    let cmd = FileComplaintCommand {
        actor,
        draft: request.into(),
    };
    let complaint = state.file_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(ComplaintResponse::from(&complaint))))
}

/// GET /api/complaints - The caller's own complaints
pub async fn list_my_complaints(
    State(state): State<ComplaintAppState>,
    RequireAuth(actor): RequireAuth,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ComplaintApiError> {
    let page = state
        .list_handler()
        .handle(list_query(actor, ListScope::Mine, params))
        .await?;
    Ok(Json(ComplaintPageResponse::from(page)))
}

/// GET /api/complaints/:id - Complaint detail
pub async fn get_complaint(
    State(state): State<ComplaintAppState>,
    RequireAuth(actor): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ComplaintApiError> {
    let query = GetComplaintQuery {
        actor,
        complaint_id: parse_complaint_id(&id)?,
    };
    let complaint = state.get_handler().handle(query).await?;
    Ok(Json(ComplaintResponse::from(&complaint)))
}

/// PATCH /api/complaints/:id/status and /api/technician/complaints/:id/status
pub async fn transition_status(
    State(state): State<ComplaintAppState>,
    RequireAuth(actor): RequireAuth,
    Path(id): Path<String>,
    Json(request): Json<TransitionStatusRequest>,
) -> Result<impl IntoResponse, ComplaintApiError> {
    let cmd = TransitionStatusCommand {
        actor,
        complaint_id: parse_complaint_id(&id)?,
        status: request.status,
        reason: request.reason,
        resolution_notes: request.resolution_notes,
    };
    let result = state.transition_handler().handle(cmd).await?;
    Ok(Json(TransitionStatusResponse {
        complaint: ComplaintResponse::from(&result.complaint),
        history: result.history.iter().map(StatusEventResponse::from).collect(),
    }))
}

/// GET /api/complaints/:id/history - Audit trail, newest first
pub async fn get_status_history(
    State(state): State<ComplaintAppState>,
    RequireAuth(actor): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ComplaintApiError> {
    let query = GetStatusHistoryQuery {
        actor,
        complaint_id: parse_complaint_id(&id)?,
    };
    let entries = state.history_handler().handle(query).await?;
    let body: Vec<HistoryEntryResponse> = entries.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper mapping `ComplaintError` kinds onto HTTP status codes.
#[derive(Debug)]
pub struct ComplaintApiError(pub ComplaintError);

impl From<ComplaintError> for ComplaintApiError {
    fn from(err: ComplaintError) -> Self {
        Self(err)
    }
}

pub(crate) fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::InvalidStatus | ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for ComplaintApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.kind());
        if status == StatusCode::SERVICE_UNAVAILABLE {
            tracing::error!(error = %self.0, "complaint store unavailable");
        }
        let body = ErrorResponse::new(self.0.code(), self.0.to_string());
        (status, Json(body)).into_response()
    }
}
