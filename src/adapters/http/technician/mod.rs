//! HTTP adapter for technician endpoints.
//!
//! - `GET /api/technician/dashboard` - Workload counts
//! - `GET /api/technician/complaints/ready` - Claimable pool
//! - `GET /api/technician/complaints/:queue` - Own queue (progress, pending, completed)
//! - `PATCH /api/technician/complaints/:id/claim` - Claim from the pool
//! - `PATCH /api/technician/complaints/:id/status` - Change status

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::technician_routes;
