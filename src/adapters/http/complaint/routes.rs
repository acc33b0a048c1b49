//! Axum router for complaint endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{
    file_complaint, get_complaint, get_status_history, list_my_complaints, transition_status,
    ComplaintAppState,
};

/// Routes mounted at `/api/complaints`.
///
/// - `POST /` - File a complaint (customer)
/// - `GET /` - Caller's own complaints, `?status=&category=&page=&limit=`
/// - `GET /:id` - Detail (owner or staff)
/// - `PATCH /:id/status` - Transition (staff)
/// - `GET /:id/history` - Audit trail (owner or staff)
pub fn complaint_routes() -> Router<ComplaintAppState> {
    Router::new()
        .route("/", get(list_my_complaints).post(file_complaint))
        .route("/:id", get(get_complaint))
        .route("/:id/status", patch(transition_status))
        .route("/:id/history", get(get_status_history))
}
