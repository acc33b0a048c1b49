//! HTTP adapter for complaint endpoints.
//!
//! - `POST /api/complaints` - File a complaint
//! - `GET /api/complaints` - List the caller's complaints
//! - `GET /api/complaints/:id` - Complaint detail
//! - `PATCH /api/complaints/:id/status` - Change status
//! - `GET /api/complaints/:id/history` - Status history

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use handlers::{ComplaintApiError, ComplaintAppState};
pub use routes::complaint_routes;
