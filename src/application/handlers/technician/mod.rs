//! Technician-facing query handlers.

mod get_dashboard;

pub use get_dashboard::{GetTechnicianDashboardHandler, GetTechnicianDashboardQuery};
