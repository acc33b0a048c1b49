//! Axum router for technician endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::super::complaint::handlers::transition_status;
use super::super::complaint::ComplaintAppState;
use super::handlers::{claim_complaint, get_dashboard, list_queue, list_ready};

/// Routes mounted at `/api/technician`.
///
/// `ready` is a static segment and wins over the `:id` queue parameter.
pub fn technician_routes() -> Router<ComplaintAppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/complaints/ready", get(list_ready))
        .route("/complaints/:id", get(list_queue))
        .route("/complaints/:id/claim", patch(claim_complaint))
        .route("/complaints/:id/status", patch(transition_status))
}
